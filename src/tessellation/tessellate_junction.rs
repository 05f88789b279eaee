use std::f64::consts::{FRAC_PI_2, PI, TAU};

use tracing::{debug, trace};

use crate::error::{Result, TessellationError};
use crate::fork::{ForkParams, LateralSide};
use crate::math::{lerp, lerp_point, smoothstep, Frame, Point2};
use crate::path::{separation, MainPath};

use super::{push_ring_grid, TessellateSeptum, TriangleMesh};

/// Which end of the fork a junction sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JunctionEnd {
    /// One tube splits into two.
    Entry,
    /// Two tubes merge back into one.
    Exit,
}

/// One cross-section station of a junction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JunctionRing {
    /// Main-path distance of the ring.
    pub distance: f64,
    /// Position across the junction in increasing distance, `0..=1`.
    pub ring_t: f64,
    /// 0 where the ring matches the main tube, 1 where it matches the branch tubes.
    pub blend: f64,
}

/// Geometry of one Y-junction: one arm per branch plus the dividing wall.
#[derive(Debug, Clone, Default)]
pub struct JunctionMesh {
    /// Arm meshes, in the same order as the fork's branches.
    pub arms: [TriangleMesh; 2],
    pub septum: TriangleMesh,
}

/// Builds the surface that morphs the main tube's circular cross-section into
/// the two branch tubes' circular cross-sections (or back, at the exit).
///
/// Each arm owns half of the main circle: the left branch `[π/2, 3π/2]`, the
/// right branch `[-π/2, π/2]`. On every ring, vertex `k` interpolates between
/// its point on that half-arc of the main circle and its point on the full
/// branch circle, both expressed in the main frame at the ring's distance.
/// At blend 0 the two arms tile the main circle exactly; at blend 1 each arm
/// is exactly its branch circle.
///
/// The branch circle is walked starting from its inner side (facing the
/// other branch), so the middle of the half-arc travels to the outermost
/// point of the branch circle and the two seam ends meet at the septum.
/// This keeps every intermediate cross-section free of folds.
pub struct TessellateJunction<'a, M: MainPath> {
    main: &'a M,
    params: ForkParams,
    sides: [LateralSide; 2],
    end: JunctionEnd,
}

impl<'a, M: MainPath> TessellateJunction<'a, M> {
    /// Creates a junction build for the branches on `sides`.
    #[must_use]
    pub fn new(main: &'a M, params: ForkParams, sides: [LateralSide; 2], end: JunctionEnd) -> Self {
        Self {
            main,
            params,
            sides,
            end,
        }
    }

    /// Ring stations across the junction, in increasing main-path distance.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rings(&self) -> Vec<JunctionRing> {
        let count = self.params.junction_rings.max(2);
        let length = self.params.junction_length;
        let start = match self.end {
            JunctionEnd::Entry => self.params.fork_distance,
            JunctionEnd::Exit => self.params.rejoin_distance() - length,
        };

        (0..count)
            .map(|r| {
                let ring_t = r as f64 / (count - 1) as f64;
                let blend = match self.end {
                    JunctionEnd::Entry => smoothstep(ring_t),
                    JunctionEnd::Exit => smoothstep(1.0 - ring_t),
                };
                JunctionRing {
                    distance: start + ring_t * length,
                    ring_t,
                    blend,
                }
            })
            .collect()
    }

    /// Executes the build, producing both arms and the septum.
    ///
    /// # Errors
    ///
    /// Returns an error if the radii are not positive, there are fewer than 3
    /// segments, or the septum build fails.
    pub fn execute(&self) -> Result<JunctionMesh> {
        if self.params.main_radius <= 0.0 || self.params.branch_radius <= 0.0 {
            return Err(TessellationError::InvalidParameters(
                "junction radii must be positive".into(),
            )
            .into());
        }
        if self.params.circum_segments < 3 {
            return Err(TessellationError::InvalidParameters(
                "junction needs at least 3 circumferential segments".into(),
            )
            .into());
        }

        let rings = self.rings();
        let arms = [self.build_arm(self.sides[0], &rings), self.build_arm(self.sides[1], &rings)];
        let septum = TessellateSeptum::new(self.main, &rings, self.params.septum_height()).execute()?;

        debug!(
            end = ?self.end,
            rings = rings.len(),
            arm_vertices = arms[0].vertices.len(),
            septum_vertices = septum.vertices.len(),
            "tessellated Y-junction"
        );
        Ok(JunctionMesh { arms, septum })
    }

    /// Builds the arm belonging to the branch on `side`.
    #[allow(clippy::cast_precision_loss)]
    fn build_arm(&self, side: LateralSide, rings: &[JunctionRing]) -> TriangleMesh {
        let segs = self.params.circum_segments;
        let ring_size = segs + 1;
        let main_r = self.params.main_radius;
        let branch_r = self.params.branch_radius;
        let (arc_start, arc_end) = half_arc(side);
        let circle_start = inner_angle(side);

        let mut mesh = TriangleMesh {
            vertices: Vec::with_capacity(rings.len() * ring_size),
            uvs: Vec::with_capacity(rings.len() * ring_size),
            ..TriangleMesh::default()
        };

        for ring in rings {
            let main = self.main.frame_at(ring.distance);
            let branch = Frame {
                position: main.position + main.right * (side.sign() * self.separation_at(ring.distance)),
                ..main
            };

            trace!(
                side = ?side,
                distance = ring.distance,
                blend = ring.blend,
                radius = lerp(main_r, branch_r, ring.blend),
                center = ?lerp_point(&main.position, &branch.position, ring.blend),
                "junction ring"
            );

            for k in 0..=segs {
                let seg_t = k as f64 / segs as f64;
                let source = main.ring_point(lerp(arc_start, arc_end, seg_t), main_r);
                let target = branch.ring_point(circle_start + seg_t * TAU, branch_r);
                mesh.vertices.push(lerp_point(&source, &target, ring.blend));
                mesh.uvs.push(Point2::new(seg_t, ring.ring_t));
            }
        }

        push_ring_grid(&mut mesh.indices, 0, rings.len(), ring_size);
        mesh.recompute_normals();
        mesh.invert_normals();
        mesh
    }

    /// Lateral offset of the branch centerlines at main-path `distance`.
    fn separation_at(&self, distance: f64) -> f64 {
        let t = ((distance - self.params.fork_distance) / self.params.branch_length).clamp(0.0, 1.0);
        separation(t, self.params.max_separation)
    }
}

/// The half of the main circle owned by the arm on `side`, as `(start, end)` angles.
#[must_use]
pub fn half_arc(side: LateralSide) -> (f64, f64) {
    match side {
        LateralSide::Right => (-FRAC_PI_2, FRAC_PI_2),
        LateralSide::Left => (FRAC_PI_2, PI + FRAC_PI_2),
    }
}

/// Angle of the point on a branch circle that faces the other branch.
#[must_use]
pub fn inner_angle(side: LateralSide) -> f64 {
    let (start, end) = half_arc(side);
    0.5 * (start + end) - PI
}
