use crate::math::frame::slerp_direction;
use crate::math::{lerp_point, Frame, Point3, Vector3};

/// Slack allowed when checking a query distance against the path range.
const RANGE_EPSILON: f64 = 1e-9;

/// One centerline sample of a branch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    pub position: Point3,
    /// Unit direction toward the next sample.
    pub forward: Vector3,
}

/// Discretized branch centerline, uniformly spaced in fork parameter `t`.
///
/// Sample count is fixed at construction.
#[derive(Debug, Clone)]
pub struct SampledPath {
    samples: Vec<PathSample>,
    start_distance: f64,
    length: f64,
}

impl SampledPath {
    pub(crate) fn new(samples: Vec<PathSample>, start_distance: f64, length: f64) -> Self {
        Self {
            samples,
            start_distance,
            length,
        }
    }

    #[must_use]
    pub fn samples(&self) -> &[PathSample] {
        &self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Main-path distance of the first sample.
    #[must_use]
    pub fn start_distance(&self) -> f64 {
        self.start_distance
    }

    /// Main-path distance of the last sample.
    #[must_use]
    pub fn end_distance(&self) -> f64 {
        self.start_distance + self.length
    }

    /// Main-path distance of sample `index`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn distance_of(&self, index: usize) -> f64 {
        let last = self.samples.len().saturating_sub(1).max(1) as f64;
        self.start_distance + self.length * (index as f64 / last)
    }

    /// Maps `distance` to the fork parameter `t ∈ [0, 1]`, or `None` outside the path.
    #[must_use]
    pub fn parameter_at(&self, distance: f64) -> Option<f64> {
        if !distance.is_finite()
            || distance < self.start_distance - RANGE_EPSILON
            || distance > self.end_distance() + RANGE_EPSILON
        {
            return None;
        }
        Some(((distance - self.start_distance) / self.length).clamp(0.0, 1.0))
    }

    /// Interpolated frame at `distance`.
    ///
    /// Position is lerped and forward is slerped between the two bracketing
    /// samples; `right`/`up` are rebuilt with [`Frame::from_forward`].
    /// Returns `None` outside `[start_distance, end_distance]` or when the path
    /// has fewer than two samples.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn frame_at(&self, distance: f64) -> Option<Frame> {
        let n = self.samples.len();
        if n < 2 {
            return None;
        }
        let t = self.parameter_at(distance)?;

        let f = t * (n - 1) as f64;
        let i0 = (f.floor() as usize).min(n - 2);
        let frac = f - i0 as f64;
        let a = &self.samples[i0];
        let b = &self.samples[i0 + 1];

        let position = lerp_point(&a.position, &b.position, frac);
        let forward = slerp_direction(&a.forward, &b.forward, frac);
        Frame::from_forward(position, forward).ok()
    }
}
