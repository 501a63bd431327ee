//! Square point grid with structural, shear and flexion springs.

use crate::error::ClothError;
use crate::float::Float;
use crate::point::Point;
use crate::spring::{SpringKind, SpringNetwork};
use crate::vec::Vec3;
use alloc::vec::Vec;

/// Largest accepted grid density. Keeps `(density + 1)²` points and the
/// `u32` mesh indices far from overflow.
pub const MAX_DENSITY: usize = 512;

/// Points and springs of a `density × density` cell grid.
///
/// Point `(i, j)` (row `i`, column `j`) has index `i * (density + 1) + j`.
#[derive(Clone, Debug)]
pub struct ClothGrid<F: Float> {
    points: Vec<Point<F>>,
    springs: SpringNetwork<F>,
    density: usize,
    spacing: F,
}

impl<F: Float> ClothGrid<F> {
    /// Build a grid of `(density + 1)²` points at rest.
    ///
    /// `place` maps a grid coordinate to its world position and `pin` decides
    /// which points are anchored. Springs are derived from grid adjacency:
    /// - Structural: row and column neighbours (rest = spacing)
    /// - Shear: both diagonals of every cell (rest = spacing * sqrt(2))
    /// - Flexion: two-hop neighbours starting from each cell corner
    ///   `(i < density, j < density)` (rest = spacing * 2)
    pub fn new(
        density: usize,
        spacing: F,
        place: impl Fn(usize, usize) -> Vec3<F>,
        pin: impl Fn(usize, usize) -> bool,
    ) -> Result<Self, ClothError> {
        if density == 0 || density > MAX_DENSITY {
            return Err(ClothError::InvalidDensity { density });
        }
        let side = density + 1;
        let mut points = Vec::with_capacity(side * side);
        for i in 0..side {
            for j in 0..side {
                let mut p = Point::new(place(i, j));
                p.pinned = pin(i, j);
                points.push(p);
            }
        }

        let springs = build_springs(density, spacing);
        Ok(ClothGrid { points, springs, density, spacing })
    }

    pub fn index(&self, i: usize, j: usize) -> usize {
        i * (self.density + 1) + j
    }

    pub fn points(&self) -> &[Point<F>] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [Point<F>] {
        &mut self.points
    }

    pub fn point(&self, i: usize, j: usize) -> &Point<F> {
        &self.points[self.index(i, j)]
    }

    pub fn springs(&self) -> &SpringNetwork<F> {
        &self.springs
    }

    /// Split borrow used by the solver: mutable points, shared springs.
    pub fn parts_mut(&mut self) -> (&mut [Point<F>], &SpringNetwork<F>) {
        (&mut self.points, &self.springs)
    }

    pub fn density(&self) -> usize { self.density }
    pub fn spacing(&self) -> F { self.spacing }
    pub fn point_count(&self) -> usize { self.points.len() }
    pub fn spring_count(&self) -> usize { self.springs.len() }
}

fn build_springs<F: Float>(density: usize, spacing: F) -> SpringNetwork<F> {
    let side = density + 1;
    let idx = |i: usize, j: usize| i * side + j;
    let diag_length = (spacing * spacing + spacing * spacing).sqrt();
    let flex_length = spacing * F::two();
    let mut springs = SpringNetwork::new(side * side);

    // Structural: along rows
    for i in 0..side {
        for j in 0..density {
            springs.insert(idx(i, j), idx(i, j + 1), SpringKind::Structural, spacing);
        }
    }

    // Structural: along columns
    for i in 0..density {
        for j in 0..side {
            springs.insert(idx(i, j), idx(i + 1, j), SpringKind::Structural, spacing);
        }
    }

    // Shear: both diagonals of each cell
    for i in 0..density {
        for j in 0..density {
            springs.insert(idx(i, j), idx(i + 1, j + 1), SpringKind::Shear, diag_length);
            springs.insert(idx(i, j + 1), idx(i + 1, j), SpringKind::Shear, diag_length);
        }
    }

    // Flexion: two hops right and down from each cell corner
    for i in 0..density {
        for j in 0..density {
            if j + 2 < side {
                springs.insert(idx(i, j), idx(i, j + 2), SpringKind::Flexion, flex_length);
            }
            if i + 2 < side {
                springs.insert(idx(i, j), idx(i + 2, j), SpringKind::Flexion, flex_length);
            }
        }
    }

    springs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(density: usize) -> ClothGrid<f32> {
        ClothGrid::new(
            density,
            1.0,
            |i, j| Vec3::new(j as f32, 0.0, i as f32),
            |i, j| i == 0 && j == 0,
        )
        .unwrap()
    }

    #[test]
    fn counts_follow_density() {
        let grid = flat(4);
        let springs = grid.springs();
        assert_eq!(grid.point_count(), 25);
        assert_eq!(springs.count_of(SpringKind::Structural), 2 * 4 * 5);
        assert_eq!(springs.count_of(SpringKind::Shear), 2 * 4 * 4);
        assert_eq!(springs.count_of(SpringKind::Flexion), 2 * 4 * 3);
    }

    #[test]
    fn out_of_range_density_rejected() {
        let result = ClothGrid::<f32>::new(0, 1.0, |_, _| Vec3::zero(), |_, _| false);
        assert_eq!(result.unwrap_err(), ClothError::InvalidDensity { density: 0 });
        for density in [MAX_DENSITY + 1, usize::MAX] {
            let result = ClothGrid::<f32>::new(density, 1.0, |_, _| Vec3::zero(), |_, _| false);
            assert_eq!(result.unwrap_err(), ClothError::InvalidDensity { density });
        }
    }

    #[test]
    fn rest_lengths_match_layout() {
        let grid = flat(3);
        for s in grid.springs().springs() {
            let d = grid.points()[s.a].position.distance(grid.points()[s.b].position);
            assert!((d - s.rest_length).abs() < 1e-5, "{:?} measured {}", s, d);
        }
    }

    #[test]
    fn pin_predicate_applied() {
        let grid = flat(2);
        assert!(grid.point(0, 0).pinned);
        assert_eq!(grid.points().iter().filter(|p| p.pinned).count(), 1);
    }

    #[test]
    fn adjacency_records_both_orderings() {
        let grid = flat(2);
        let (a, b) = (grid.index(0, 0), grid.index(1, 1));
        assert!(grid.springs().connected(a, b));
        assert!(grid.springs().connected(b, a));
        assert!(!grid.springs().connected(grid.index(0, 0), grid.index(1, 2)));
    }
}
