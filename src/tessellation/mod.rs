mod tessellate_junction;
mod tessellate_septum;
mod tessellate_tube;

pub use tessellate_junction::{
    half_arc, inner_angle, JunctionEnd, JunctionMesh, JunctionRing, TessellateJunction,
};
pub use tessellate_septum::TessellateSeptum;
pub use tessellate_tube::TessellateTube;

use crate::math::{Point2, Point3, Vector3, TOLERANCE};

/// A triangle mesh ready for upload to a renderer.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// UV coordinates.
    pub uvs: Vec<Point2>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if every position, normal and UV is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.vertices
            .iter()
            .all(|v| v.iter().all(|c| c.is_finite()))
            && self.normals.iter().all(|n| n.iter().all(|c| c.is_finite()))
            && self.uvs.iter().all(|uv| uv.iter().all(|c| c.is_finite()))
    }

    /// Geometric (winding) normal of triangle `index`, not normalized.
    #[must_use]
    pub fn face_normal(&self, index: usize) -> Vector3 {
        let [a, b, c] = self.indices[index];
        let pa = self.vertices[a as usize];
        let pb = self.vertices[b as usize];
        let pc = self.vertices[c as usize];
        (pb - pa).cross(&(pc - pa))
    }

    /// Replaces the normals with area-weighted averages of the adjacent face normals.
    ///
    /// Vertices touched only by zero-area triangles get a zero normal.
    pub fn recompute_normals(&mut self) {
        let mut normals = vec![Vector3::zeros(); self.vertices.len()];
        for i in 0..self.indices.len() {
            let n = self.face_normal(i);
            for &v in &self.indices[i] {
                normals[v as usize] += n;
            }
        }
        for n in &mut normals {
            let len = n.norm();
            if len > TOLERANCE {
                *n /= len;
            }
        }
        self.normals = normals;
    }

    /// Turns the surface inside out: negates every normal and reverses every
    /// triangle's winding so both agree on the new facing.
    pub fn invert_normals(&mut self) {
        for n in &mut self.normals {
            *n = -*n;
        }
        for tri in &mut self.indices {
            tri.swap(1, 2);
        }
    }
}

/// Appends the triangles of a grid of `rings` rings with `ring_size` vertices
/// each, laid out ring-major starting at `base`.
///
/// With angle increasing along a ring and rings advancing along `forward`,
/// the winding faces away from the ring center.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn push_ring_grid(indices: &mut Vec<[u32; 3]>, base: usize, rings: usize, ring_size: usize) {
    for r in 0..rings.saturating_sub(1) {
        for j in 0..ring_size.saturating_sub(1) {
            let a = (base + r * ring_size + j) as u32;
            let b = a + 1;
            let c = a + ring_size as u32;
            let d = c + 1;
            indices.push([a, c, b]);
            indices.push([b, c, d]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> TriangleMesh {
        TriangleMesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
            ],
            normals: Vec::new(),
            uvs: vec![Point2::origin(); 4],
            indices: vec![[0, 1, 2], [1, 3, 2]],
        }
    }

    #[test]
    fn recompute_normals_follows_winding() {
        let mut mesh = quad();
        mesh.recompute_normals();
        assert_eq!(mesh.normals.len(), 4);
        for n in &mesh.normals {
            assert!((n - Vector3::z()).norm() < 1e-12);
        }
    }

    #[test]
    fn invert_flips_normals_and_winding() {
        let mut mesh = quad();
        mesh.recompute_normals();
        mesh.invert_normals();
        for n in &mesh.normals {
            assert!((n + Vector3::z()).norm() < 1e-12);
        }
        assert!(mesh.face_normal(0).z < 0.0);
        assert_eq!(mesh.indices[0], [0, 2, 1]);
    }

    #[test]
    fn ring_grid_counts() {
        let mut indices = Vec::new();
        push_ring_grid(&mut indices, 0, 4, 9);
        assert_eq!(indices.len(), 3 * 8 * 2);
        let max = indices.iter().flatten().max().copied().unwrap_or(0);
        assert_eq!(max, 35);
    }

    #[test]
    fn non_finite_mesh_is_detected() {
        let mut mesh = quad();
        assert!(mesh.is_finite());
        mesh.vertices[2].x = f64::NAN;
        assert!(!mesh.is_finite());
    }
}
