//! Explicit Euler and position Verlet time integration.
//!
//! Collision against the floor and sphere is resolved per point inside the
//! update. Euler checks the floor before moving, Verlet checks the candidate
//! position right after computing it; the two orders are kept distinct
//! because they give each scheme its own contact behaviour.

use crate::collision::{Floor, Sphere};
use crate::config::{ClothConfig, Integrator};
use crate::float::Float;
use crate::point::Point;

/// Steps at or below this length are ignored.
pub const MIN_TIME_STEP: f32 = 1e-6;

/// Whether `dt` is long enough to integrate without dividing by ~zero.
pub fn is_usable_time_step<F: Float>(dt: F) -> bool {
    dt.is_finite() && dt > F::from_f32(MIN_TIME_STEP)
}

/// Advance every free point by `dt` using the configured scheme.
///
/// `prev_dt` is the length of the step that produced the current
/// `prev_position`s. Verlet rescales the last displacement by `dt / prev_dt`
/// so a host may change the step between frames; pass `dt` when there is no
/// previous step.
pub fn integrate<F: Float>(points: &mut [Point<F>], config: &ClothConfig<F>, dt: F, prev_dt: F) {
    if !is_usable_time_step(dt) {
        return;
    }
    let floor = &config.floor;
    let sphere = &config.sphere;
    match config.integrator {
        Integrator::Euler => {
            for p in points.iter_mut() {
                step_euler(p, floor, sphere, dt);
            }
        }
        Integrator::Verlet => {
            for p in points.iter_mut() {
                step_verlet(p, floor, sphere, dt, prev_dt);
            }
        }
    }
}

/// `v += a·dt; x += v·dt`, with floor contact resolved before the move.
pub fn step_euler<F: Float>(p: &mut Point<F>, floor: &Floor<F>, sphere: &Sphere<F>, dt: F) {
    if p.pinned {
        return;
    }
    p.velocity += p.acceleration.scale(dt);
    floor.resolve_euler(p, dt);

    p.prev_position = p.position;
    p.position += p.velocity.scale(dt);

    if p.sphere_collider {
        if let Some(surface) = sphere.project(p.position) {
            p.position = surface;
            let normal = sphere.normal_at(surface);
            let inward = p.velocity.dot(normal);
            if inward < F::zero() {
                p.velocity -= normal.scale(inward);
            }
        }
    }
}

/// Time-corrected Verlet: `x' = x + (x - x_prev)·(dt / prev_dt) + a·dt²`,
/// velocity derived as `(x' - x) / dt`.
///
/// With a constant step this is plain `2x - x_prev + a·dt²`.
pub fn step_verlet<F: Float>(p: &mut Point<F>, floor: &Floor<F>, sphere: &Sphere<F>, dt: F, prev_dt: F) {
    if p.pinned {
        return;
    }
    let ratio = if is_usable_time_step(prev_dt) { dt / prev_dt } else { F::one() };
    let displacement = (p.position - p.prev_position).scale(ratio);
    let mut candidate = p.position + displacement + p.acceleration.scale(dt * dt);
    floor.resolve_verlet(p, &mut candidate, dt);

    if p.sphere_collider {
        if let Some(surface) = sphere.project(candidate) {
            candidate = surface;
        }
    }

    p.prev_position = p.position;
    p.position = candidate;
    p.velocity = (p.position - p.prev_position).scale(F::one() / dt);
}
