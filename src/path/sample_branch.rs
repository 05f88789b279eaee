use std::f64::consts::PI;

use tracing::{debug, warn};

use crate::error::{ConfigError, Result};
use crate::fork::LateralSide;
use crate::math::Vector3;

use super::{MainPath, PathSample, SampledPath};

/// Position deltas shorter than this cannot give a direction.
const MIN_DELTA: f64 = 1e-6;

/// Lateral offset of a branch centerline at fork parameter `t ∈ [0, 1]`.
///
/// `sin(t·π)·max_separation`: zero at both fork ends, peaking at the midpoint.
#[must_use]
pub fn separation(t: f64, max_separation: f64) -> f64 {
    (t * PI).sin() * max_separation
}

/// Samples the centerline of one branch from the main path.
///
/// Each sample sits at `main.position + main.right * side.sign() * separation(t)`.
/// Forward vectors come from the branch's own position deltas, not from the
/// main path, so they follow the branch's actual curvature.
#[derive(Debug, Clone)]
pub struct SampleBranchPath {
    fork_distance: f64,
    branch_length: f64,
    max_separation: f64,
    side: LateralSide,
    sample_spacing: f64,
}

impl SampleBranchPath {
    /// Creates a new `SampleBranchPath` operation.
    #[must_use]
    pub fn new(
        fork_distance: f64,
        branch_length: f64,
        max_separation: f64,
        side: LateralSide,
        sample_spacing: f64,
    ) -> Self {
        Self {
            fork_distance,
            branch_length,
            max_separation,
            side,
            sample_spacing,
        }
    }

    /// Number of samples produced: `ceil(length / spacing) + 1`, never below 2.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn sample_count(&self) -> usize {
        let segments = (self.branch_length / self.sample_spacing).ceil().max(1.0) as usize;
        segments + 1
    }

    /// Executes the sampling against `main`.
    ///
    /// # Errors
    ///
    /// Returns an error if the branch length or sample spacing is not positive.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self, main: &impl MainPath) -> Result<SampledPath> {
        if self.sample_spacing.is_nan() || self.sample_spacing <= 0.0 {
            return Err(ConfigError::NonPositive {
                parameter: "sample_spacing",
                value: self.sample_spacing,
            }
            .into());
        }
        if self.branch_length.is_nan() || self.branch_length <= 0.0 {
            return Err(ConfigError::NonPositive {
                parameter: "branch_length",
                value: self.branch_length,
            }
            .into());
        }

        let n = self.sample_count();
        let last = (n - 1) as f64;
        let sign = self.side.sign();

        let mut positions = Vec::with_capacity(n);
        let mut main_forwards = Vec::with_capacity(n);
        for i in 0..n {
            let t = i as f64 / last;
            let frame = main.frame_at(self.fork_distance + t * self.branch_length);
            let offset = sign * separation(t, self.max_separation);
            positions.push(frame.position + frame.right * offset);
            main_forwards.push(frame.forward);
        }

        let mut samples: Vec<PathSample> = Vec::with_capacity(n);
        for i in 0..n - 1 {
            let delta = positions[i + 1] - positions[i];
            let len = delta.norm();
            let forward: Vector3 = if len > MIN_DELTA {
                delta / len
            } else {
                warn!(sample = i, "branch samples coincide, using main-path forward");
                main_forwards[i]
            };
            samples.push(PathSample {
                position: positions[i],
                forward,
            });
        }
        // No look-ahead at the final sample.
        let tail_forward = samples[n - 2].forward;
        samples.push(PathSample {
            position: positions[n - 1],
            forward: tail_forward,
        });

        debug!(
            side = ?self.side,
            samples = n,
            fork_distance = self.fork_distance,
            branch_length = self.branch_length,
            "sampled branch path"
        );

        Ok(SampledPath::new(
            samples,
            self.fork_distance,
            self.branch_length,
        ))
    }
}
