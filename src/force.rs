//! Per-step force accumulation: gravity, drag, wind and spring tension.
//!
//! Every point has unit mass, so forces are written straight into the
//! acceleration field. Pinned points accumulate like any other; the
//! integrator is what leaves them in place.

use crate::config::{ClothConfig, SpringStiffness};
use crate::float::Float;
use crate::point::Point;
use crate::spring::SpringNetwork;
use crate::vec::Vec3;

/// Spring lengths below this produce no force.
const SPRING_EPSILON: f32 = 1e-8;

/// Deterministic pseudo-turbulent wind at `position` and simulation `time`.
///
/// A steady push along +z modulated by low-frequency sine waves over the
/// point's own coordinates, so neighbouring points see similar but not
/// identical gusts. Identical inputs always give identical output.
pub fn wind_at<F: Float>(position: Vec3<F>, time: F, strength: F) -> Vec3<F> {
    let c = F::from_f32;
    let sway = (c(0.7) * position.y + c(1.3) * time).sin();
    let lift = (c(0.9) * position.x + c(0.5) * position.z + c(2.1) * time).sin();
    let gust = (c(0.5) * position.x + c(1.7) * time).sin() * (c(0.4) * position.y + c(0.9) * time).cos();
    Vec3::new(c(0.3) * sway, c(0.2) * lift, F::one() + c(0.6) * gust).scale(strength)
}

/// Reset and recompute the acceleration of every point.
pub fn accumulate_forces<F: Float>(
    points: &mut [Point<F>],
    springs: &SpringNetwork<F>,
    config: &ClothConfig<F>,
    stiffness: &SpringStiffness<F>,
    time: F,
) {
    for p in points.iter_mut() {
        p.acceleration = config.gravity - p.velocity.scale(config.drag);
        if config.wind_enabled {
            p.add_acceleration(wind_at(p.position, time, config.wind_strength));
        }
    }

    for spring in springs.springs() {
        let delta = points[spring.b].position - points[spring.a].position;
        let length = delta.length();
        if length.is_near_zero(F::from_f32(SPRING_EPSILON)) {
            // Coincident endpoints: no direction to push along.
            continue;
        }
        let stretch = length - spring.rest_length;
        let accel = delta.scale(spring.stiffness(stiffness) * stretch / length);
        points[spring.a].add_acceleration(accel);
        points[spring.b].add_acceleration(-accel);
    }
}
