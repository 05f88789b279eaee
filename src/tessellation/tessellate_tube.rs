use std::f64::consts::TAU;

use tracing::debug;

use crate::error::{Result, TessellationError};
use crate::math::{lerp, Frame, Point2};
use crate::path::SampledPath;

use super::{push_ring_grid, TriangleMesh};

/// Slack when deciding whether a sample falls inside a junction zone.
const ZONE_EPSILON: f64 = 1e-9;

/// Extrudes a circular tube along a branch's sampled centerline.
///
/// Samples covered by the adjoining junction meshes are skipped, except the
/// last one inside each junction zone, which is kept as an overlap ring and
/// widened by the overlap flare so the tube tucks under the junction surface.
/// Normals face the tube axis.
#[derive(Debug, Clone)]
pub struct TessellateTube<'a> {
    path: &'a SampledPath,
    radius: f64,
    circum_segments: usize,
    entry_overlap: f64,
    exit_overlap: f64,
    overlap_flare: f64,
    mouth_flare: f64,
    mouth_fraction: f64,
}

impl<'a> TessellateTube<'a> {
    /// Creates a plain tube over every sample of `path`.
    #[must_use]
    pub fn new(path: &'a SampledPath, radius: f64, circum_segments: usize) -> Self {
        Self {
            path,
            radius,
            circum_segments,
            entry_overlap: 0.0,
            exit_overlap: 0.0,
            overlap_flare: 1.0,
            mouth_flare: 1.0,
            mouth_fraction: 0.0,
        }
    }

    /// Leaves the first `entry` and last `exit` distance units to junction meshes.
    #[must_use]
    pub fn with_junction_overlap(mut self, entry: f64, exit: f64) -> Self {
        self.entry_overlap = entry;
        self.exit_overlap = exit;
        self
    }

    /// Sets the overlap-ring widening and the mouth widening applied within
    /// `mouth_fraction` of the branch length from either end of the emitted tube.
    #[must_use]
    pub fn with_flare(mut self, overlap_flare: f64, mouth_flare: f64, mouth_fraction: f64) -> Self {
        self.overlap_flare = overlap_flare;
        self.mouth_flare = mouth_flare;
        self.mouth_fraction = mouth_fraction;
        self
    }

    /// Inclusive range of sample indices that become tube rings.
    ///
    /// # Errors
    ///
    /// Returns an error if the junction zones leave fewer than two rings.
    pub fn ring_range(&self) -> Result<(usize, usize)> {
        let n = self.path.len();
        if n < 2 {
            return Err(TessellationError::InvalidParameters(
                "tube path needs at least 2 samples".into(),
            )
            .into());
        }
        let start = self.path.start_distance();
        let end = self.path.end_distance();

        let first = (0..n)
            .take_while(|&i| self.path.distance_of(i) - start <= self.entry_overlap + ZONE_EPSILON)
            .last()
            .unwrap_or(0);
        let last = (0..n)
            .rev()
            .take_while(|&i| end - self.path.distance_of(i) <= self.exit_overlap + ZONE_EPSILON)
            .last()
            .unwrap_or(n - 1);

        if first >= last {
            return Err(TessellationError::InvalidParameters(format!(
                "junction zones cover the whole branch (rings {first}..={last})"
            ))
            .into());
        }
        Ok((first, last))
    }

    /// Executes the extrusion.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive radius, fewer than 3 segments, a path
    /// with fewer than two usable rings, or a degenerate sample forward.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self) -> Result<TriangleMesh> {
        if self.radius.is_nan() || self.radius <= 0.0 {
            return Err(
                TessellationError::InvalidParameters("tube radius must be positive".into()).into(),
            );
        }
        if self.circum_segments < 3 {
            return Err(TessellationError::InvalidParameters(
                "tube needs at least 3 circumferential segments".into(),
            )
            .into());
        }
        let (first, last) = self.ring_range()?;

        let segs = self.circum_segments;
        let ring_size = segs + 1;
        let rings = last - first + 1;
        let n = self.path.len();
        let samples = self.path.samples();
        let first_distance = self.path.distance_of(first);
        let last_distance = self.path.distance_of(last);
        let span = self.path.end_distance() - self.path.start_distance();

        let mut mesh = TriangleMesh {
            vertices: Vec::with_capacity(rings * ring_size),
            uvs: Vec::with_capacity(rings * ring_size),
            ..TriangleMesh::default()
        };

        for i in first..=last {
            let sample = &samples[i];
            let frame = Frame::from_forward(sample.position, sample.forward)?;
            let t = i as f64 / (n - 1) as f64;
            let d = self.path.distance_of(i);
            let edge = (d - first_distance).min(last_distance - d) / span;

            let is_overlap = (i == first && self.entry_overlap > 0.0)
                || (i == last && self.exit_overlap > 0.0);
            let radius = self.radius * self.flare_at(edge, is_overlap);

            for j in 0..=segs {
                // j == segs duplicates j == 0 for the UV seam
                let u = j as f64 / segs as f64;
                mesh.vertices.push(frame.ring_point(u * TAU, radius));
                mesh.uvs.push(Point2::new(u, t));
            }
        }

        push_ring_grid(&mut mesh.indices, 0, rings, ring_size);
        mesh.recompute_normals();
        mesh.invert_normals();

        debug!(
            rings,
            vertices = mesh.vertices.len(),
            triangles = mesh.triangle_count(),
            "tessellated branch tube"
        );
        Ok(mesh)
    }

    /// Radius multiplier for a ring `edge` branch lengths from the nearer end
    /// of the emitted tube.
    fn flare_at(&self, edge: f64, is_overlap: bool) -> f64 {
        let mut flare = 1.0_f64;
        if self.mouth_fraction > 0.0 && edge < self.mouth_fraction {
            flare = lerp(self.mouth_flare, 1.0, edge / self.mouth_fraction);
        }
        if is_overlap {
            flare = flare.max(self.overlap_flare);
        }
        flare
    }
}
