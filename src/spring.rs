//! Spring network connecting cloth points.

use crate::config::SpringStiffness;
use crate::float::Float;
use alloc::vec::Vec;

/// Stiffness class of a spring.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpringKind {
    /// Orthogonal neighbours, rest length = spacing.
    Structural,
    /// Diagonal neighbours, rest length = spacing * sqrt(2).
    Shear,
    /// Two-hop orthogonal neighbours, rest length = spacing * 2.
    Flexion,
}

/// An unordered pair of point indices held at a fixed rest length.
#[derive(Clone, Debug, PartialEq)]
pub struct Spring<F: Float> {
    pub a: usize,
    pub b: usize,
    pub kind: SpringKind,
    pub rest_length: F,
}

impl<F: Float> Spring<F> {
    pub fn new(a: usize, b: usize, kind: SpringKind, rest_length: F) -> Self {
        Spring { a, b, kind, rest_length }
    }

    pub fn stiffness(&self, coefficients: &SpringStiffness<F>) -> F {
        coefficients.for_kind(self.kind)
    }
}

/// All springs of a cloth plus per-point neighbour sets.
///
/// The neighbour sets record both orderings of every spring so that
/// [`SpringNetwork::connected`] answers in bounded time (a grid point has at
/// most twelve spring partners). Self-collision uses it to skip pairs the
/// springs already keep apart.
#[derive(Clone, Debug, Default)]
pub struct SpringNetwork<F: Float> {
    springs: Vec<Spring<F>>,
    neighbors: Vec<Vec<usize>>,
}

impl<F: Float> SpringNetwork<F> {
    /// An empty network over `point_count` points.
    pub fn new(point_count: usize) -> Self {
        SpringNetwork {
            springs: Vec::new(),
            neighbors: alloc::vec![Vec::new(); point_count],
        }
    }

    /// Insert a spring unless `a` and `b` are already connected.
    ///
    /// Returns `false` for duplicates, self-loops and out-of-range indices.
    pub fn insert(&mut self, a: usize, b: usize, kind: SpringKind, rest_length: F) -> bool {
        let count = self.neighbors.len();
        if a == b || a >= count || b >= count || self.connected(a, b) {
            return false;
        }
        self.neighbors[a].push(b);
        self.neighbors[b].push(a);
        self.springs.push(Spring::new(a, b, kind, rest_length));
        true
    }

    pub fn connected(&self, a: usize, b: usize) -> bool {
        self.neighbors
            .get(a)
            .map_or(false, |n| n.contains(&b))
    }

    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.neighbors.get(index).map(|n| n.as_slice()).unwrap_or(&[])
    }

    pub fn springs(&self) -> &[Spring<F>] {
        &self.springs
    }

    pub fn len(&self) -> usize {
        self.springs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.springs.is_empty()
    }

    pub fn count_of(&self, kind: SpringKind) -> usize {
        self.springs.iter().filter(|s| s.kind == kind).count()
    }
}
