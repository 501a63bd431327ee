//! Run with `cargo test --features serde`.
#![cfg(feature = "serde")]

use drape::{Cloth, ClothConfig, Integrator, NoOpStepObserver, Point, Scene, SpringKind, Vec3};

#[test]
fn config_round_trips_through_json() {
    let config: ClothConfig<f32> = ClothConfig::new()
        .with_integrator(Integrator::Euler)
        .with_wind(true, 6.5)
        .with_drag(0.25)
        .with_self_collisions(true);
    let json = serde_json::to_string(&config).unwrap();
    let back: ClothConfig<f32> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn simulated_points_round_trip_through_json() {
    let mut cloth: Cloth<f64> = Cloth::with_scene(4, Scene::SphereDrape, ClothConfig::new()).unwrap();
    for _ in 0..20 {
        cloth.step_frame(&mut NoOpStepObserver);
    }
    let json = serde_json::to_string(cloth.points()).unwrap();
    let back: Vec<Point<f64>> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.as_slice(), cloth.points());
}

#[test]
fn enums_serialize_by_variant_name() {
    assert_eq!(serde_json::to_string(&Scene::CenterDrape).unwrap(), "\"CenterDrape\"");
    assert_eq!(serde_json::to_string(&Integrator::Verlet).unwrap(), "\"Verlet\"");
    let kind: SpringKind = serde_json::from_str("\"Flexion\"").unwrap();
    assert_eq!(kind, SpringKind::Flexion);
    let v: Vec3<f32> = serde_json::from_str(r#"{"x":1.0,"y":-2.5,"z":0.0}"#).unwrap();
    assert_eq!(v, Vec3::new(1.0, -2.5, 0.0));
}
