//! The cloth simulation instance driven once per rendered frame.

use crate::collision::resolve_self_collisions;
use crate::config::{non_negative, ClothConfig, Integrator};
use crate::error::ClothError;
use crate::float::Float;
use crate::force::accumulate_forces;
use crate::grid::ClothGrid;
use crate::integrator::{integrate, is_usable_time_step};
use crate::mesh::{NormalMode, SurfaceMesh};
use crate::observer::StepObserver;
use crate::point::Point;
use crate::scene::Scene;
use crate::spring::SpringNetwork;
use tracing::{debug, trace, warn};

/// Grid density used by the interactive demo.
pub const DEFAULT_DENSITY: usize = 10;

/// Above this many point pairs the all-pairs self-collision scan is logged
/// as a performance hazard (roughly density 30).
pub const SELF_COLLISION_PAIR_WARNING: usize = 500_000;

/// A mass-spring cloth with its configuration, scene and render buffers.
///
/// Each frame the host calls [`Cloth::step`] (or [`Cloth::step_frame`]),
/// which accumulates forces, integrates, resolves collisions and rebuilds
/// the surface mesh, then reads [`Cloth::positions`], [`Cloth::normals`] and
/// [`Cloth::indices`]. Setters may be called between frames and apply from
/// the next step.
///
/// ```
/// use drape::{Cloth, ClothConfig, NoOpStepObserver};
///
/// let mut cloth: Cloth<f32> = Cloth::new(8, ClothConfig::new()).unwrap();
/// cloth.set_scene(2).unwrap();
/// for _ in 0..10 {
///     cloth.step_frame(&mut NoOpStepObserver);
/// }
/// assert_eq!(cloth.indices().len(), cloth.positions().len() / 4);
/// ```
#[derive(Clone, Debug)]
pub struct Cloth<F: Float> {
    grid: ClothGrid<F>,
    config: ClothConfig<F>,
    scene: Scene,
    time: F,
    /// Length of the last integrated step; zero right after a load.
    last_dt: F,
    mesh: SurfaceMesh,
}

impl<F: Float> Cloth<F> {
    /// A cloth in the default scene.
    pub fn new(density: usize, config: ClothConfig<F>) -> Result<Self, ClothError> {
        Self::with_scene(density, Scene::default(), config)
    }

    pub fn with_scene(density: usize, scene: Scene, config: ClothConfig<F>) -> Result<Self, ClothError> {
        config.validate()?;
        let grid = scene.build(density, &config)?;
        let mut cloth = Cloth {
            grid,
            config,
            scene,
            time: F::zero(),
            last_dt: F::zero(),
            mesh: SurfaceMesh::default(),
        };
        cloth.update_mesh();
        debug!(
            scene = scene.name(),
            density,
            points = cloth.grid.point_count(),
            springs = cloth.grid.spring_count(),
            "cloth created"
        );
        Ok(cloth)
    }

    /// Switch to the scene with control-panel number `id`.
    ///
    /// Unknown ids are rejected and leave the current state untouched.
    pub fn set_scene(&mut self, id: u32) -> Result<(), ClothError> {
        let scene = Scene::try_from(id)?;
        self.load(scene, self.grid.density())
    }

    /// Restart the current scene from its initial layout.
    pub fn reset(&mut self) -> Result<(), ClothError> {
        self.load(self.scene, self.grid.density())
    }

    /// Rebuild the current scene at a new grid density.
    pub fn set_density(&mut self, density: usize) -> Result<(), ClothError> {
        self.load(self.scene, density)
    }

    /// Replace points and springs in one assignment once the new grid is
    /// fully built, so a failed build changes nothing.
    fn load(&mut self, scene: Scene, density: usize) -> Result<(), ClothError> {
        let grid = scene.build(density, &self.config)?;
        self.grid = grid;
        self.scene = scene;
        self.time = F::zero();
        self.last_dt = F::zero();
        self.update_mesh();
        debug!(
            scene = scene.name(),
            density,
            points = self.grid.point_count(),
            springs = self.grid.spring_count(),
            "scene loaded"
        );
        Ok(())
    }

    /// Set the tensile parameter all spring classes derive from.
    pub fn set_stiffness(&mut self, tensile: F) -> Result<(), ClothError> {
        non_negative("tensile", tensile)?;
        trace!(tensile = ?tensile, "stiffness updated");
        self.config.tensile = tensile;
        Ok(())
    }

    pub fn set_wind(&mut self, strength: F) -> Result<(), ClothError> {
        non_negative("wind_strength", strength)?;
        trace!(strength = ?strength, "wind strength updated");
        self.config.wind_strength = strength;
        Ok(())
    }

    /// Step length used by [`Cloth::step_frame`]. Zero pauses the simulation.
    pub fn set_time_step(&mut self, time_step: F) -> Result<(), ClothError> {
        non_negative("time_step", time_step)?;
        trace!(time_step = ?time_step, "time step updated");
        self.config.time_step = time_step;
        Ok(())
    }

    pub fn set_drag(&mut self, drag: F) -> Result<(), ClothError> {
        non_negative("drag", drag)?;
        trace!(drag = ?drag, "drag updated");
        self.config.drag = drag;
        Ok(())
    }

    pub fn toggle_wind(&mut self) {
        self.set_wind_enabled(!self.config.wind_enabled);
    }

    pub fn set_wind_enabled(&mut self, enabled: bool) {
        trace!(enabled, "wind toggled");
        self.config.wind_enabled = enabled;
    }

    pub fn set_integrator(&mut self, integrator: Integrator) {
        trace!(integrator = ?integrator, "integrator selected");
        self.config.integrator = integrator;
    }

    /// Switch between smoothed and flat normals; the mesh is rebuilt at once.
    pub fn set_smoothed_normals(&mut self, smoothed: bool) {
        self.config.smoothed_normals = smoothed;
        self.update_mesh();
    }

    pub fn toggle_smoothed_normals(&mut self) {
        self.set_smoothed_normals(!self.config.smoothed_normals);
    }

    /// Enable or disable self-collision.
    ///
    /// Enabling also restarts the current scene, so the pass never starts
    /// from an already tangled sheet. This is the only setter with that side
    /// effect.
    pub fn set_self_collisions(&mut self, enabled: bool) -> Result<(), ClothError> {
        self.config.self_collisions = enabled;
        if !enabled {
            return Ok(());
        }
        let n = self.grid.point_count();
        let pairs = n * n.saturating_sub(1) / 2;
        if pairs > SELF_COLLISION_PAIR_WARNING {
            warn!(points = n, pairs, "self-collision is an all-pairs scan; expect slow frames");
        }
        self.reset()
    }

    /// Advance the simulation by `dt` and rebuild the mesh.
    ///
    /// `dt` may change from one call to the next. A zero, negative or
    /// non-finite `dt` does nothing at all.
    pub fn step<O: StepObserver>(&mut self, dt: F, observer: &mut O) {
        if !is_usable_time_step(dt) {
            return;
        }
        let stiffness = self.config.stiffness(self.grid.density());
        let min_distance = self.grid.spacing() * self.config.self_collision_factor;
        let (points, springs) = self.grid.parts_mut();

        accumulate_forces(points, springs, &self.config, &stiffness, self.time);
        observer.on_forces();

        let prev_dt = if is_usable_time_step(self.last_dt) { self.last_dt } else { dt };
        integrate(points, &self.config, dt, prev_dt);
        observer.on_integrate();

        if self.config.self_collisions {
            let resolved = resolve_self_collisions(points, springs, min_distance);
            for p in points.iter_mut() {
                self.config.floor.clamp(p);
            }
            observer.on_self_collision(resolved);
        }

        self.time = self.time + dt;
        self.last_dt = dt;
        self.update_mesh();
        observer.on_step_complete();
    }

    /// [`Cloth::step`] with the configured time step.
    pub fn step_frame<O: StepObserver>(&mut self, observer: &mut O) {
        self.step(self.config.time_step, observer);
    }

    /// Rebuild the render buffers from the current positions.
    pub fn update_mesh(&mut self) {
        let mode = if self.config.smoothed_normals { NormalMode::Smoothed } else { NormalMode::Flat };
        self.mesh = SurfaceMesh::build(self.grid.points(), self.grid.density(), mode);
    }

    /// Flat `x, y, z, 1` vertex positions.
    pub fn positions(&self) -> &[f32] { self.mesh.positions() }
    /// Flat `x, y, z, 0` vertex normals.
    pub fn normals(&self) -> &[f32] { self.mesh.normals() }
    /// Identity index buffer.
    pub fn indices(&self) -> &[u32] { self.mesh.indices() }

    pub fn mesh(&self) -> &SurfaceMesh { &self.mesh }
    pub fn points(&self) -> &[Point<F>] { self.grid.points() }
    pub fn springs(&self) -> &SpringNetwork<F> { self.grid.springs() }
    pub fn grid(&self) -> &ClothGrid<F> { &self.grid }
    pub fn config(&self) -> &ClothConfig<F> { &self.config }
    pub fn scene(&self) -> Scene { self.scene }
    pub fn density(&self) -> usize { self.grid.density() }
    /// Simulation time since the scene was loaded.
    pub fn time(&self) -> F { self.time }

    /// Total kinetic energy (unit masses).
    pub fn kinetic_energy(&self) -> F {
        self.points()
            .iter()
            .fold(F::zero(), |sum, p| sum + p.kinetic_energy())
    }

    /// Gravitational potential energy measured from the floor.
    pub fn potential_energy(&self) -> F {
        let g = -self.config.gravity.y;
        let floor = self.config.floor.height;
        self.points()
            .iter()
            .fold(F::zero(), |sum, p| sum + g * (p.position.y - floor))
    }
}
