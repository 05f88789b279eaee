use tracing::debug;

use crate::error::{Result, TessellationError};
use crate::math::Point2;
use crate::path::MainPath;

use super::tessellate_junction::JunctionRing;
use super::TriangleMesh;

/// Vertices emitted per ring: a front pair and a back pair.
const RING_VERTICES: usize = 4;

/// Builds the thin wall dividing the two tunnels inside a Y-junction.
///
/// The wall stands on the main centerline along the main `up` axis. Its height
/// is `blend * height` on each ring, so it is absent where the tunnel is still
/// single and full height once the branches are separate. Both faces are
/// emitted with their own vertices and winding so the wall shows from either
/// tunnel: the front faces `+right`, the back faces `-right`.
pub struct TessellateSeptum<'a, M: MainPath> {
    main: &'a M,
    rings: &'a [JunctionRing],
    height: f64,
}

impl<'a, M: MainPath> TessellateSeptum<'a, M> {
    /// Creates a septum over the given junction rings.
    #[must_use]
    pub fn new(main: &'a M, rings: &'a [JunctionRing], height: f64) -> Self {
        Self {
            main,
            rings,
            height,
        }
    }

    /// Executes the build.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 rings or the height is negative.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self) -> Result<TriangleMesh> {
        if self.rings.len() < 2 {
            return Err(TessellationError::InvalidParameters(
                "septum needs at least 2 rings".into(),
            )
            .into());
        }
        if self.height.is_nan() || self.height < 0.0 {
            return Err(TessellationError::InvalidParameters(
                "septum height must not be negative".into(),
            )
            .into());
        }

        let count = self.rings.len();
        let mut mesh = TriangleMesh {
            vertices: Vec::with_capacity(count * RING_VERTICES),
            normals: Vec::with_capacity(count * RING_VERTICES),
            uvs: Vec::with_capacity(count * RING_VERTICES),
            indices: Vec::with_capacity((count - 1) * 4),
        };

        for ring in self.rings {
            let frame = self.main.frame_at(ring.distance);
            let half = 0.5 * ring.blend * self.height;
            let bottom = frame.position - frame.up * half;
            let top = frame.position + frame.up * half;
            let v = ring.ring_t;

            mesh.vertices.extend_from_slice(&[bottom, top, bottom, top]);
            mesh.normals
                .extend_from_slice(&[frame.right, frame.right, -frame.right, -frame.right]);
            mesh.uvs.extend_from_slice(&[
                Point2::new(0.0, v),
                Point2::new(1.0, v),
                Point2::new(1.0, v),
                Point2::new(0.0, v),
            ]);
        }

        for r in 0..count - 1 {
            let k = (r * RING_VERTICES) as u32;
            let n = k + RING_VERTICES as u32;
            // front: bottom k, top k+1
            mesh.indices.push([k, n, k + 1]);
            mesh.indices.push([k + 1, n, n + 1]);
            // back: bottom k+2, top k+3
            mesh.indices.push([k + 2, k + 3, n + 2]);
            mesh.indices.push([k + 3, n + 3, n + 2]);
        }

        debug!(
            rings = count,
            height = self.height,
            "tessellated septum"
        );
        Ok(mesh)
    }
}
