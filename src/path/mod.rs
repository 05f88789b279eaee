mod blend;
mod provider;
mod sample_branch;
mod sampled_path;

pub use blend::branch_blend;
pub use provider::{ArcPath, StraightPath};
pub use sample_branch::{separation, SampleBranchPath};
pub use sampled_path::{PathSample, SampledPath};

use crate::math::Frame;

/// Source of the primary tunnel centerline.
///
/// Must return an orthonormal frame for every distance a fork is generated
/// or queried at. Orthonormality is assumed, not checked.
pub trait MainPath {
    /// Returns the centerline frame at `distance` along the main tunnel.
    fn frame_at(&self, distance: f64) -> Frame;
}

impl<F> MainPath for F
where
    F: Fn(f64) -> Frame,
{
    fn frame_at(&self, distance: f64) -> Frame {
        self(distance)
    }
}
