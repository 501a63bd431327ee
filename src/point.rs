//! Point masses making up the cloth grid.

use crate::float::Float;
use crate::vec::Vec3;

/// A single cloth vertex with unit mass.
///
/// `prev_position` always holds the position from one step earlier; Verlet
/// integration derives velocity from it, so anything that teleports a point
/// (scene setup, self-collision) resets it alongside `position` and
/// `velocity`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point<F: Float> {
    pub position: Vec3<F>,
    pub prev_position: Vec3<F>,
    pub velocity: Vec3<F>,
    pub acceleration: Vec3<F>,
    pub pinned: bool,
    pub sphere_collider: bool,
}

impl<F: Float> Point<F> {
    /// A free point at rest.
    pub fn new(position: Vec3<F>) -> Self {
        Point {
            position,
            prev_position: position,
            velocity: Vec3::zero(),
            acceleration: Vec3::zero(),
            pinned: false,
            sphere_collider: false,
        }
    }

    pub fn pinned(position: Vec3<F>) -> Self {
        Point { pinned: true, ..Point::new(position) }
    }

    pub fn with_sphere_collider(mut self, enabled: bool) -> Self {
        self.sphere_collider = enabled;
        self
    }

    pub fn add_acceleration(&mut self, accel: Vec3<F>) {
        self.acceleration += accel;
    }

    /// Move the point and leave it at rest.
    ///
    /// Both the stored velocity (Euler state) and the history (Verlet state)
    /// are cleared, so neither integrator reads the jump as motion.
    pub fn teleport(&mut self, position: Vec3<F>) {
        self.position = position;
        self.prev_position = position;
        self.velocity = Vec3::zero();
    }

    /// Kinetic energy for unit mass.
    pub fn kinetic_energy(&self) -> F {
        F::half() * self.velocity.length_sq()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_point_is_at_rest() {
        let p = Point::new(Vec3::new(1.0f32, 2.0, 3.0));
        assert_eq!(p.prev_position, p.position);
        assert_eq!(p.velocity, Vec3::zero());
        assert!(!p.pinned);
        assert!(!p.sphere_collider);
    }

    #[test]
    fn teleport_resets_history() {
        let mut p = Point::new(Vec3::new(0.0f32, 0.0, 0.0));
        p.velocity = Vec3::new(0.0, -3.0, 0.0);
        p.teleport(Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(p.prev_position, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(p.velocity, Vec3::zero());
    }

    #[test]
    fn kinetic_energy_unit_mass() {
        let mut p = Point::new(Vec3::<f64>::zero());
        p.velocity = Vec3::new(3.0, 4.0, 0.0);
        assert!((p.kinetic_energy() - 12.5).abs() < 1e-12);
    }
}
