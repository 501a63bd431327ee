use drape::{Cloth, ClothConfig, ClothError, Integrator, NoOpStepObserver, DEFAULT_DENSITY};
use tracing::debug;
use wasm_bindgen::prelude::*;

/// Most sub-steps one `update` call will take; time beyond that is dropped.
const MAX_SUBSTEPS: usize = 8;

/// Cut `total` seconds into at most `MAX_SUBSTEPS` steps no longer than
/// `max_step`. Returns the steps and the time left over.
fn split_frame(total: f32, max_step: f32) -> (Vec<f32>, f32) {
    let mut steps = Vec::new();
    if !(max_step > 0.0) {
        return (steps, 0.0);
    }
    let mut remaining = total;
    while remaining > 1e-6 && steps.len() < MAX_SUBSTEPS {
        let dt = remaining.min(max_step);
        steps.push(dt);
        remaining -= dt;
    }
    let dropped = if remaining > 1e-6 { remaining } else { 0.0 };
    (steps, dropped)
}

fn to_js(err: ClothError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ---- Cloth App ----

/// Browser-facing wrapper: the page's render loop calls `update` once per
/// frame, then uploads `positions`, `normals` and `indices`.
#[wasm_bindgen]
pub struct ClothApp {
    cloth: Cloth<f32>,
    /// Multiplier from wall-clock seconds to simulated seconds.
    time_scale: f32,
}

#[wasm_bindgen]
impl ClothApp {
    #[wasm_bindgen(constructor)]
    pub fn new(density: usize) -> Result<ClothApp, JsValue> {
        let density = if density == 0 { DEFAULT_DENSITY } else { density };
        let cloth = Cloth::new(density, ClothConfig::new()).map_err(to_js)?;
        Ok(ClothApp { cloth, time_scale: 1.0 })
    }

    /// Advance by elapsed wall-clock seconds. Long gaps (a hidden tab) are
    /// split into configured-size steps so the solver never sees a huge dt.
    /// At most `MAX_SUBSTEPS` are taken; the rest of the gap is skipped and
    /// logged.
    pub fn update(&mut self, elapsed: f32) {
        let (steps, dropped) = split_frame(elapsed * self.time_scale, self.cloth.config().time_step);
        for dt in steps {
            self.cloth.step(dt, &mut NoOpStepObserver);
        }
        if dropped > 0.0 {
            debug!(dropped, max_substeps = MAX_SUBSTEPS, "frame exceeded sub-step budget; simulated time dropped");
        }
    }

    /// Advance one configured time step regardless of wall-clock time.
    pub fn step(&mut self) {
        self.cloth.step_frame(&mut NoOpStepObserver);
    }

    pub fn positions(&self) -> Vec<f32> {
        self.cloth.positions().to_vec()
    }

    pub fn normals(&self) -> Vec<f32> {
        self.cloth.normals().to_vec()
    }

    pub fn indices(&self) -> Vec<u32> {
        self.cloth.indices().to_vec()
    }

    pub fn set_scene(&mut self, id: u32) -> Result<(), JsValue> {
        self.cloth.set_scene(id).map_err(to_js)
    }

    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.cloth.reset().map_err(to_js)
    }

    pub fn set_stiffness(&mut self, value: f32) -> Result<(), JsValue> {
        self.cloth.set_stiffness(value).map_err(to_js)
    }

    pub fn set_wind(&mut self, value: f32) -> Result<(), JsValue> {
        self.cloth.set_wind(value).map_err(to_js)
    }

    /// Step size for `step`, and the largest sub-step `update` takes.
    pub fn set_time_step(&mut self, value: f32) -> Result<(), JsValue> {
        self.cloth.set_time_step(value).map_err(to_js)
    }

    /// The delta-t slider: how fast simulated time runs against the clock.
    pub fn set_time_scale(&mut self, value: f32) {
        if value.is_finite() && value >= 0.0 {
            self.time_scale = value;
        }
    }

    pub fn set_drag(&mut self, value: f32) -> Result<(), JsValue> {
        self.cloth.set_drag(value).map_err(to_js)
    }

    pub fn toggle_wind(&mut self) {
        self.cloth.toggle_wind();
    }

    pub fn toggle_normals(&mut self) {
        self.cloth.toggle_smoothed_normals();
    }

    pub fn set_smoothed_normals(&mut self, smoothed: bool) {
        self.cloth.set_smoothed_normals(smoothed);
    }

    pub fn set_self_collisions(&mut self, enabled: bool) -> Result<(), JsValue> {
        self.cloth.set_self_collisions(enabled).map_err(to_js)
    }

    pub fn use_verlet(&mut self, verlet: bool) {
        self.cloth.set_integrator(if verlet { Integrator::Verlet } else { Integrator::Euler });
    }

    /// `[cx, cy, cz, radius]` of the sphere obstacle.
    pub fn sphere(&self) -> Vec<f32> {
        let s = self.cloth.config().sphere;
        vec![s.center.x, s.center.y, s.center.z, s.radius]
    }

    pub fn floor_height(&self) -> f32 {
        self.cloth.config().floor.height
    }

    pub fn scene(&self) -> u32 {
        self.cloth.scene().id()
    }

    pub fn vertex_count(&self) -> usize {
        self.cloth.mesh().vertex_count()
    }
}
