//! Render buffers rebuilt from the current point positions.
//!
//! The mesh is non-indexed: every emitted vertex is unique and the index
//! buffer is the identity sequence. Each grid cell `a b / c d` yields the
//! triangles `(a, b, c)` and `(c, b, d)`, and each triangle is emitted twice,
//! once front-facing and once mirrored with reversed winding and negated
//! normals, so the cloth is visible from both sides.

use crate::float::Float;
use crate::point::Point;
use crate::vec::Vec3;
use alloc::vec::Vec;

/// How vertex normals are derived.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NormalMode {
    /// Face normals averaged per grid point.
    Smoothed,
    /// One normal per emitted triangle.
    Flat,
}

/// Flat position / normal / index buffers for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceMesh {
    positions: Vec<f32>,
    normals: Vec<f32>,
    indices: Vec<u32>,
}

/// Vertices emitted per grid cell: 2 triangles × 2 sides × 3 vertices.
pub const VERTICES_PER_CELL: usize = 12;

impl SurfaceMesh {
    /// Build the mesh for a `density × density` grid of points.
    pub fn build<F: Float>(points: &[Point<F>], density: usize, mode: NormalMode) -> Self {
        let side = density + 1;
        debug_assert_eq!(points.len(), side * side);

        let vertex_count = density * density * VERTICES_PER_CELL;
        let mut mesh = SurfaceMesh {
            positions: Vec::with_capacity(vertex_count * 4),
            normals: Vec::with_capacity(vertex_count * 4),
            indices: Vec::with_capacity(vertex_count),
        };

        let smoothed = match mode {
            NormalMode::Smoothed => Some(vertex_normals(points, density)),
            NormalMode::Flat => None,
        };

        for i in 0..density {
            for j in 0..density {
                let a = i * side + j;
                let b = a + 1;
                let c = a + side;
                let d = c + 1;
                for [p, q, r] in [[a, b, c], [c, b, d]] {
                    match &smoothed {
                        Some(normals) => {
                            let (np, nq, nr) = (normals[p], normals[q], normals[r]);
                            mesh.push(points[p].position, np);
                            mesh.push(points[q].position, nq);
                            mesh.push(points[r].position, nr);
                            mesh.push(points[p].position, -np);
                            mesh.push(points[r].position, -nr);
                            mesh.push(points[q].position, -nq);
                        }
                        None => {
                            mesh.push_flat(points, p, q, r);
                            mesh.push_flat(points, p, r, q);
                        }
                    }
                }
            }
        }

        mesh
    }

    fn push<F: Float>(&mut self, position: Vec3<F>, normal: Vec3<F>) {
        self.positions.extend_from_slice(&[
            position.x.to_f32(),
            position.y.to_f32(),
            position.z.to_f32(),
            1.0,
        ]);
        self.normals.extend_from_slice(&[
            normal.x.to_f32(),
            normal.y.to_f32(),
            normal.z.to_f32(),
            0.0,
        ]);
        self.indices.push(self.indices.len() as u32);
    }

    fn push_flat<F: Float>(&mut self, points: &[Point<F>], p: usize, q: usize, r: usize) {
        let (a, b, c) = (points[p].position, points[q].position, points[r].position);
        let normal = face_normal(a, b, c);
        self.push(a, normal);
        self.push(b, normal);
        self.push(c, normal);
    }

    /// `x, y, z, 1` per vertex.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// `x, y, z, 0` per vertex.
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    /// `0, 1, 2, …, vertex_count - 1`.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.indices.len()
    }
}

/// Unit normal of triangle `(a, b, c)` by the right-hand rule; zero for
/// degenerate triangles.
pub fn face_normal<F: Float>(a: Vec3<F>, b: Vec3<F>, c: Vec3<F>) -> Vec3<F> {
    (b - a).cross(c - a).normalize()
}

/// Per-point normals: the normalized sum of the front face normals touching
/// each point. Lives only for one build.
fn vertex_normals<F: Float>(points: &[Point<F>], density: usize) -> Vec<Vec3<F>> {
    let side = density + 1;
    let mut normals = alloc::vec![Vec3::zero(); points.len()];
    for i in 0..density {
        for j in 0..density {
            let a = i * side + j;
            let b = a + 1;
            let c = a + side;
            let d = c + 1;
            for [p, q, r] in [[a, b, c], [c, b, d]] {
                let n = face_normal(points[p].position, points[q].position, points[r].position);
                normals[p] += n;
                normals[q] += n;
                normals[r] += n;
            }
        }
    }
    for n in normals.iter_mut() {
        *n = n.normalize();
    }
    normals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_grid(density: usize) -> Vec<Point<f32>> {
        let mut points = Vec::new();
        for i in 0..=density {
            for j in 0..=density {
                points.push(Point::new(Vec3::new(j as f32, 0.0, i as f32)));
            }
        }
        points
    }

    #[test]
    fn buffer_lengths_and_identity_indices() {
        for mode in [NormalMode::Smoothed, NormalMode::Flat] {
            let mesh = SurfaceMesh::build(&flat_grid(3), 3, mode);
            assert_eq!(mesh.vertex_count(), 3 * 3 * VERTICES_PER_CELL);
            assert_eq!(mesh.positions().len(), mesh.normals().len());
            assert_eq!(mesh.indices().len(), mesh.positions().len() / 4);
            assert!(mesh.indices().iter().enumerate().all(|(i, &v)| v as usize == i));
        }
    }

    #[test]
    fn homogeneous_coordinates() {
        let mesh = SurfaceMesh::build(&flat_grid(1), 1, NormalMode::Flat);
        assert!(mesh.positions().chunks(4).all(|v| v[3] == 1.0));
        assert!(mesh.normals().chunks(4).all(|n| n[3] == 0.0));
    }

    #[test]
    fn flat_sheet_normals_are_opposite_per_side() {
        // Columns along +x and rows along +z: (b - a) × (c - a) points down.
        let mesh = SurfaceMesh::build(&flat_grid(2), 2, NormalMode::Flat);
        for tri in mesh.normals().chunks(12).step_by(2) {
            assert!((tri[1] + 1.0).abs() < 1e-6);
        }
        for tri in mesh.normals().chunks(12).skip(1).step_by(2) {
            assert!((tri[1] - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn smoothed_normals_are_unit_length() {
        let mut points = flat_grid(2);
        points[4].position.y = 0.5;
        let mesh = SurfaceMesh::build(&points, 2, NormalMode::Smoothed);
        for n in mesh.normals().chunks(4) {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn back_face_reverses_winding() {
        let mesh = SurfaceMesh::build(&flat_grid(1), 1, NormalMode::Smoothed);
        let p = mesh.positions();
        // Front (a, b, c) then back (a, c, b).
        assert_eq!(&p[0..4], &p[12..16]);
        assert_eq!(&p[4..8], &p[20..24]);
        assert_eq!(&p[8..12], &p[16..20]);
    }
}
