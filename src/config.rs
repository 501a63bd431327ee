//! Tunable simulation parameters.

use crate::collision::{Floor, Sphere};
use crate::error::ClothError;
use crate::float::Float;
use crate::spring::SpringKind;
use crate::vec::Vec3;

/// Grid density at which the base stiffness coefficients apply unscaled.
pub const REFERENCE_DENSITY: usize = 10;
/// Structural coefficient at tensile 1.0 and the reference density.
pub const STRUCTURAL_BASE: f32 = 400.0;
/// Shear coefficient at tensile 1.0 and the reference density.
pub const SHEAR_BASE: f32 = 200.0;
/// Flexion coefficient at tensile 1.0 and the reference density.
pub const FLEXION_BASE: f32 = 100.0;

/// Time integration scheme.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Integrator {
    /// Semi-implicit Euler: velocity first, then position.
    Euler,
    /// Position Verlet with velocity derived from consecutive positions.
    #[default]
    Verlet,
}

/// Per-class spring coefficients (acceleration per unit of stretch).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpringStiffness<F: Float> {
    pub structural: F,
    pub shear: F,
    pub flexion: F,
}

impl<F: Float> SpringStiffness<F> {
    pub fn for_kind(&self, kind: SpringKind) -> F {
        match kind {
            SpringKind::Structural => self.structural,
            SpringKind::Shear => self.shear,
            SpringKind::Flexion => self.flexion,
        }
    }
}

/// Configuration record owned by a [`Cloth`](crate::cloth::Cloth).
///
/// The three spring classes are never stored; they are derived from
/// `tensile` and the grid density by [`ClothConfig::stiffness`], so changing
/// the tensile parameter updates all of them at once.
///
/// # Builder Pattern
/// ```
/// use drape::config::{ClothConfig, Integrator};
///
/// let config: ClothConfig<f32> = ClothConfig::new()
///     .with_integrator(Integrator::Euler)
///     .with_tensile(2.0)
///     .with_drag(0.3)
///     .with_wind(true, 6.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClothConfig<F: Float> {
    /// Side length of the square cloth in world units. Default: 10.
    pub width: F,
    /// Single tensile parameter all spring classes scale with. Default: 1.
    pub tensile: F,
    /// Linear velocity drag coefficient. Default: 0.5.
    pub drag: F,
    /// Wind scale. Default: 4.
    pub wind_strength: F,
    /// Whether the wind term is applied. Default: false.
    pub wind_enabled: bool,
    /// Step used by [`Cloth::step_frame`](crate::cloth::Cloth::step_frame). Default: 0.01.
    pub time_step: F,
    pub integrator: Integrator,
    /// Smoothed per-vertex normals instead of flat face normals. Default: true.
    pub smoothed_normals: bool,
    /// All-pairs point collision. Default: false.
    pub self_collisions: bool,
    /// Minimum separation for self-collision, as a multiple of grid spacing. Default: 0.8.
    pub self_collision_factor: F,
    /// Gravity acceleration. Default: (0, -9.8, 0).
    pub gravity: Vec3<F>,
    pub floor: Floor<F>,
    pub sphere: Sphere<F>,
}

impl<F: Float> ClothConfig<F> {
    pub fn new() -> Self {
        ClothConfig {
            width: F::from_f32(10.0),
            tensile: F::one(),
            drag: F::from_f32(0.5),
            wind_strength: F::from_f32(4.0),
            wind_enabled: false,
            time_step: F::from_f32(0.01),
            integrator: Integrator::Verlet,
            smoothed_normals: true,
            self_collisions: false,
            self_collision_factor: F::from_f32(0.8),
            gravity: Vec3::from_f32(0.0, -9.8, 0.0),
            floor: Floor::new(F::from_f32(-5.0)),
            sphere: Sphere::new(Vec3::from_f32(0.0, -3.0, 0.0), F::two()),
        }
    }

    pub fn with_tensile(mut self, tensile: F) -> Self {
        self.tensile = tensile;
        self
    }

    pub fn with_drag(mut self, drag: F) -> Self {
        self.drag = drag;
        self
    }

    pub fn with_wind(mut self, enabled: bool, strength: F) -> Self {
        self.wind_enabled = enabled;
        self.wind_strength = strength;
        self
    }

    pub fn with_time_step(mut self, time_step: F) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn with_smoothed_normals(mut self, smoothed: bool) -> Self {
        self.smoothed_normals = smoothed;
        self
    }

    pub fn with_self_collisions(mut self, enabled: bool) -> Self {
        self.self_collisions = enabled;
        self
    }

    pub fn with_gravity(mut self, gravity: Vec3<F>) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_floor(mut self, floor: Floor<F>) -> Self {
        self.floor = floor;
        self
    }

    pub fn with_sphere(mut self, sphere: Sphere<F>) -> Self {
        self.sphere = sphere;
        self
    }

    /// Spring coefficients for a grid of the given density.
    ///
    /// Coefficients scale inversely with density so finer grids stay stable
    /// at the same time step.
    pub fn stiffness(&self, density: usize) -> SpringStiffness<F> {
        let scale = self.tensile * F::from_usize(REFERENCE_DENSITY) / F::from_usize(density.max(1));
        SpringStiffness {
            structural: F::from_f32(STRUCTURAL_BASE) * scale,
            shear: F::from_f32(SHEAR_BASE) * scale,
            flexion: F::from_f32(FLEXION_BASE) * scale,
        }
    }

    /// Grid spacing for the given density.
    pub fn spacing(&self, density: usize) -> F {
        self.width / F::from_usize(density.max(1))
    }

    /// Reject non-finite or out-of-range parameters.
    pub fn validate(&self) -> Result<(), ClothError> {
        non_negative("width", self.width)?;
        if self.width.is_near_zero(F::from_f32(1e-6)) {
            return Err(ClothError::InvalidParameter { name: "width", reason: "must be positive" });
        }
        non_negative("tensile", self.tensile)?;
        non_negative("drag", self.drag)?;
        non_negative("wind_strength", self.wind_strength)?;
        non_negative("time_step", self.time_step)?;
        non_negative("self_collision_factor", self.self_collision_factor)?;
        non_negative("sphere.radius", self.sphere.radius)?;
        if !self.gravity.is_finite() || !self.sphere.center.is_finite() {
            return Err(ClothError::InvalidParameter { name: "vector", reason: "must be finite" });
        }
        if !self.floor.height.is_finite() {
            return Err(ClothError::InvalidParameter { name: "floor.height", reason: "must be finite" });
        }
        Ok(())
    }
}

impl<F: Float> Default for ClothConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Check a scalar parameter is finite and not negative.
pub(crate) fn non_negative<F: Float>(name: &'static str, value: F) -> Result<(), ClothError> {
    if !value.is_finite() {
        return Err(ClothError::InvalidParameter { name, reason: "must be finite" });
    }
    if value < F::zero() {
        return Err(ClothError::InvalidParameter { name, reason: "must not be negative" });
    }
    Ok(())
}
