//! Collision resolution against the floor, the sphere obstacle and the cloth
//! itself.

use crate::float::Float;
use crate::point::Point;
use crate::spring::SpringNetwork;
use crate::vec::Vec3;

/// Distances below this are treated as coincident and left unresolved.
const CONTACT_EPSILON: f32 = 1e-6;

/// Horizontal ground plane at a fixed height.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Floor<F: Float> {
    pub height: F,
}

impl<F: Float> Floor<F> {
    pub fn new(height: F) -> Self {
        Floor { height }
    }

    /// Euler contact, run before the point moves.
    ///
    /// If this step's velocity would carry the point below the floor, the
    /// downward velocity is cancelled so the move cannot tunnel through.
    pub fn resolve_euler(&self, point: &mut Point<F>, dt: F) {
        let next_y = point.position.y + point.velocity.y * dt;
        if point.velocity.y < F::zero() && next_y < self.height {
            point.velocity.y = F::zero();
            point.acceleration.y = F::zero();
            if point.position.y < self.height {
                point.position.y = self.height;
            }
        }
    }

    /// Verlet contact, run on the candidate position right after the update.
    ///
    /// A descending point that would cross the floor loses its vertical
    /// acceleration and its history, then the candidate is recomputed from
    /// rest. The implied velocity at the floor becomes zero instead of being
    /// reflected by a position clamp.
    pub fn resolve_verlet(&self, point: &mut Point<F>, candidate: &mut Vec3<F>, dt: F) {
        if candidate.y >= self.height || candidate.y >= point.position.y {
            return;
        }
        point.acceleration.y = F::zero();
        point.prev_position = point.position;
        *candidate = point.position + point.acceleration.scale(dt * dt);
        if candidate.y < self.height {
            // Only reachable when the point already started below the floor.
            candidate.y = self.height;
            point.prev_position.y = self.height;
        }
    }

    /// Plain clamp used after positional corrections.
    pub fn clamp(&self, point: &mut Point<F>) {
        if point.pinned || point.position.y >= self.height {
            return;
        }
        point.position.y = self.height;
        point.prev_position.y = self.height;
        if point.velocity.y < F::zero() {
            point.velocity.y = F::zero();
        }
    }
}

/// Static sphere obstacle.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sphere<F: Float> {
    pub center: Vec3<F>,
    pub radius: F,
}

impl<F: Float> Sphere<F> {
    pub fn new(center: Vec3<F>, radius: F) -> Self {
        Sphere { center, radius }
    }

    pub fn contains(&self, position: Vec3<F>) -> bool {
        position.distance_sq(self.center) < self.radius * self.radius
    }

    /// Radial projection of an interior position onto the surface.
    ///
    /// `None` when the position is outside, or sits exactly at the centre
    /// where no direction is defined.
    pub fn project(&self, position: Vec3<F>) -> Option<Vec3<F>> {
        let offset = position - self.center;
        let dist = offset.length();
        if dist >= self.radius || dist.is_near_zero(F::from_f32(CONTACT_EPSILON)) {
            return None;
        }
        Some(self.center + offset.scale(self.radius / dist))
    }

    /// Outward surface normal at `position`.
    pub fn normal_at(&self, position: Vec3<F>) -> Vec3<F> {
        (position - self.center).normalize()
    }
}

/// Push apart every pair of points closer than `min_distance` that is not
/// already joined by a spring. Returns the number of pairs corrected.
///
/// Each point of a pair moves by half the penetration along the line between
/// them; when one is pinned the free one takes the whole correction. Moved
/// points are teleported, which clears both their velocity and their
/// history, so the push never feeds energy back into either integrator.
/// Coincident pairs have no separating direction and are skipped.
///
/// This is an all-pairs O(n²) scan. It is fine for the coursework grid sizes
/// this simulator targets and becomes the dominant cost past a few thousand
/// points.
pub fn resolve_self_collisions<F: Float>(
    points: &mut [Point<F>],
    springs: &SpringNetwork<F>,
    min_distance: F,
) -> usize {
    let min_sq = min_distance * min_distance;
    let eps = F::from_f32(CONTACT_EPSILON);
    let mut resolved = 0;

    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            if points[i].pinned && points[j].pinned {
                continue;
            }
            let delta = points[j].position - points[i].position;
            let dist_sq = delta.length_sq();
            if dist_sq >= min_sq || springs.connected(i, j) {
                continue;
            }
            let dist = dist_sq.sqrt();
            if dist.is_near_zero(eps) {
                continue;
            }

            let dir = delta.scale(F::one() / dist);
            let depth = min_distance - dist;
            let (share_i, share_j) = match (points[i].pinned, points[j].pinned) {
                (true, _) => (F::zero(), depth),
                (_, true) => (depth, F::zero()),
                _ => (depth * F::half(), depth * F::half()),
            };

            if !points[i].pinned {
                let moved = points[i].position - dir.scale(share_i);
                points[i].teleport(moved);
            }
            if !points[j].pinned {
                let moved = points[j].position + dir.scale(share_j);
                points[j].teleport(moved);
            }
            resolved += 1;
        }
    }

    resolved
}
