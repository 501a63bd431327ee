use drape::{Cloth, ClothConfig, Integrator, NoOpStepObserver, Scene};

#[test]
fn hammock_energy_stays_bounded() {
    for integrator in [Integrator::Euler, Integrator::Verlet] {
        let config = ClothConfig::new().with_integrator(integrator);
        let mut cloth: Cloth<f32> = Cloth::with_scene(10, Scene::Hammock, config).unwrap();
        let initial_potential = cloth.potential_energy();
        assert!(initial_potential > 0.0);

        for step in 0..1000 {
            cloth.step(0.01, &mut NoOpStepObserver);
            let kinetic = cloth.kinetic_energy();
            assert!(
                kinetic.is_finite() && kinetic <= 2.0 * initial_potential,
                "{:?}: kinetic energy {} at step {} exceeds bound {}",
                integrator, kinetic, step, 2.0 * initial_potential,
            );
        }
    }
}

#[test]
fn floor_is_never_penetrated() {
    for integrator in [Integrator::Euler, Integrator::Verlet] {
        let config = ClothConfig::new().with_integrator(integrator);
        let floor = config.floor.height;
        let mut cloth: Cloth<f32> = Cloth::with_scene(10, Scene::CornerDrape, config).unwrap();

        let mut touched = false;
        for step in 0..500 {
            cloth.step(0.01, &mut NoOpStepObserver);
            for (i, p) in cloth.points().iter().enumerate() {
                assert!(!p.sphere_collider);
                assert!(
                    p.position.y >= floor - 1e-4,
                    "{:?}: point {} at y = {} below floor at step {}",
                    integrator, i, p.position.y, step,
                );
                touched |= p.position.y < floor + 0.05;
            }
        }
        assert!(touched, "{:?}: cloth never reached the floor", integrator);
    }
}

#[test]
fn sphere_drape_stays_outside_sphere() {
    for integrator in [Integrator::Euler, Integrator::Verlet] {
        let config = ClothConfig::new().with_integrator(integrator);
        let sphere = config.sphere;
        let mut cloth: Cloth<f32> = Cloth::with_scene(10, Scene::SphereDrape, config).unwrap();

        for _ in 0..2000 {
            cloth.step(0.01, &mut NoOpStepObserver);
        }

        for p in cloth.points().iter().filter(|p| p.sphere_collider) {
            let d = p.position.distance(sphere.center);
            assert!(d >= sphere.radius - 1e-3, "{:?}: point at distance {}", integrator, d);
        }
    }
}

#[test]
fn self_collision_keeps_energy_bounded() {
    for integrator in [Integrator::Euler, Integrator::Verlet] {
        let config = ClothConfig::new().with_integrator(integrator);
        let mut cloth: Cloth<f32> = Cloth::with_scene(10, Scene::CenterDrape, config).unwrap();
        cloth.set_self_collisions(true).unwrap();
        let pinned = cloth.points().iter().position(|p| p.pinned).unwrap();
        let anchor = cloth.points()[pinned].position;
        let bound = 2.0 * cloth.potential_energy();

        for step in 0..1000 {
            cloth.step(0.01, &mut NoOpStepObserver);
            let kinetic = cloth.kinetic_energy();
            assert!(
                kinetic.is_finite() && kinetic <= bound,
                "{:?}: kinetic energy {} at step {} exceeds bound {}",
                integrator, kinetic, step, bound,
            );
        }
        assert!(cloth.points().iter().all(|p| p.position.is_finite() && p.velocity.is_finite()));
        assert_eq!(cloth.points()[pinned].position, anchor);
    }
}

#[test]
fn zero_time_step_changes_nothing() {
    let mut cloth: Cloth<f32> = Cloth::new(4, ClothConfig::new()).unwrap();
    cloth.step(0.01, &mut NoOpStepObserver);
    let before = cloth.points().to_vec();
    let mesh = cloth.positions().to_vec();
    cloth.step(0.0, &mut NoOpStepObserver);
    cloth.set_time_step(0.0).unwrap();
    cloth.step_frame(&mut NoOpStepObserver);
    assert_eq!(cloth.points(), &before[..]);
    assert_eq!(cloth.positions(), &mesh[..]);
}

#[test]
fn euler_tolerates_non_uniform_time_steps() {
    let config = ClothConfig::new().with_integrator(Integrator::Euler);
    let mut cloth: Cloth<f64> = Cloth::with_scene(8, Scene::Hammock, config).unwrap();
    let steps = [0.008, 0.012, 0.01, 0.005, 0.015];
    for n in 0..600 {
        cloth.step(steps[n % steps.len()], &mut NoOpStepObserver);
    }
    assert!(cloth.points().iter().all(|p| p.position.is_finite()));
    assert!(cloth.kinetic_energy() < cloth.potential_energy() * 2.0 + 1.0);
}

fn assert_verlet_bounded(steps: &[f32]) {
    let config = ClothConfig::new().with_integrator(Integrator::Verlet);
    let mut cloth: Cloth<f32> = Cloth::with_scene(10, Scene::Hammock, config).unwrap();
    let bound = 2.0 * cloth.potential_energy();
    for n in 0..2000 {
        cloth.step(steps[n % steps.len()], &mut NoOpStepObserver);
        let kinetic = cloth.kinetic_energy();
        assert!(
            kinetic.is_finite() && kinetic <= bound,
            "steps {:?}: kinetic energy {} at step {} exceeds bound {}",
            steps, kinetic, n, bound,
        );
    }
}

#[test]
fn verlet_tolerates_non_uniform_time_steps() {
    assert_verlet_bounded(&[0.004, 0.02, 0.01, 0.002, 0.016]);
}

#[test]
fn verlet_tolerates_short_remainder_steps() {
    // The pattern a fixed-size sub-stepper leaves behind.
    assert_verlet_bounded(&[0.01, 0.01, 0.0005]);
}
