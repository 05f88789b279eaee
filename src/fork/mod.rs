mod announce;
mod branch;
mod manager;
mod params;

pub use announce::{RouteAnnouncer, SilentAnnouncer};
pub use branch::{AssignOutcome, Branch, BranchAssignment, BranchKind, LateralSide};
pub use manager::{ForkId, ForkManager};
pub use params::ForkParams;

use rand::Rng;
use tracing::{debug, info};

use crate::error::{ConfigError, Result};
use crate::math::angle::delta_degrees;
use crate::math::Frame;
use crate::path::{branch_blend, separation, MainPath, SampleBranchPath, SampledPath};
use crate::tessellation::{JunctionEnd, JunctionMesh, TessellateJunction, TessellateTube, TriangleMesh};

/// Traveler angle, in degrees around the tube, of the tube bottom.
///
/// Angles use the ring convention: 0° on the main `right` axis, 90° on `up`.
pub const BOTTOM_ANGLE: f64 = 270.0;

/// Static geometry of a fork, built once at placement.
#[derive(Debug, Clone, Default)]
pub struct ForkMeshes {
    /// One tube per branch, in branch order.
    pub tubes: [TriangleMesh; 2],
    /// Where the main tube splits.
    pub entry: JunctionMesh,
    /// Where the branches merge back.
    pub exit: JunctionMesh,
}

/// A Y-shaped split of the main tunnel into two branches that later rejoin.
///
/// Everything except the player's route latch is immutable after [`Fork::new`],
/// so the frame and blend queries can be shared freely between readers.
#[derive(Debug, Clone)]
pub struct Fork {
    params: ForkParams,
    branches: [Branch; 2],
    paths: [SampledPath; 2],
    meshes: ForkMeshes,
    assignment: BranchAssignment,
}

impl Fork {
    /// Builds a fork with the default branch pair: a safe branch on the right
    /// (index 0) and a risky branch on the left (index 1).
    ///
    /// # Errors
    ///
    /// Returns an error if `params` fail validation or mesh generation fails.
    pub fn new<M: MainPath>(params: ForkParams, main: &M) -> Result<Self> {
        Self::with_branches(
            params,
            [
                Branch::safe(LateralSide::Right),
                Branch::risky(LateralSide::Left),
            ],
            main,
        )
    }

    /// Builds a fork with explicit branch records.
    ///
    /// Samples both branch centerlines, then tessellates both tubes and both
    /// junctions against `main`.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` fail validation, both branches sit on the
    /// same side, or mesh generation fails.
    pub fn with_branches<M: MainPath>(
        params: ForkParams,
        branches: [Branch; 2],
        main: &M,
    ) -> Result<Self> {
        params.validate()?;
        if branches[0].side() == branches[1].side() {
            return Err(ConfigError::SameLateralSide(branches[0].side()).into());
        }
        let sides = [branches[0].side(), branches[1].side()];

        let sample = |side: LateralSide| {
            SampleBranchPath::new(
                params.fork_distance,
                params.branch_length,
                params.max_separation,
                side,
                params.sample_spacing,
            )
            .execute(main)
        };
        let paths = [sample(sides[0])?, sample(sides[1])?];

        let tube = |path: &SampledPath| {
            TessellateTube::new(path, params.branch_radius, params.circum_segments)
                .with_junction_overlap(params.junction_length, params.junction_length)
                .with_flare(params.overlap_flare, params.mouth_flare, params.mouth_fraction)
                .execute()
        };
        let tubes = [tube(&paths[0])?, tube(&paths[1])?];

        let entry = TessellateJunction::new(main, params, sides, JunctionEnd::Entry).execute()?;
        let exit = TessellateJunction::new(main, params, sides, JunctionEnd::Exit).execute()?;

        debug!(
            fork_distance = params.fork_distance,
            rejoin_distance = params.rejoin_distance(),
            samples = paths[0].len(),
            "built fork"
        );

        Ok(Self {
            params,
            branches,
            paths,
            meshes: ForkMeshes { tubes, entry, exit },
            assignment: BranchAssignment::Unassigned,
        })
    }

    #[must_use]
    pub fn params(&self) -> &ForkParams {
        &self.params
    }

    #[must_use]
    pub fn fork_distance(&self) -> f64 {
        self.params.fork_distance
    }

    #[must_use]
    pub fn rejoin_distance(&self) -> f64 {
        self.params.rejoin_distance()
    }

    /// Main-path distance halfway through the fork.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        self.params.fork_distance + 0.5 * self.params.branch_length
    }

    /// Returns `true` if `distance` lies in `[fork_distance, rejoin_distance]`.
    #[must_use]
    pub fn contains(&self, distance: f64) -> bool {
        distance >= self.fork_distance() && distance <= self.rejoin_distance()
    }

    #[must_use]
    pub fn branches(&self) -> &[Branch; 2] {
        &self.branches
    }

    #[must_use]
    pub fn branch(&self, index: usize) -> Option<&Branch> {
        self.branches.get(index)
    }

    /// Sampled centerline of branch `index`.
    #[must_use]
    pub fn path(&self, index: usize) -> Option<&SampledPath> {
        self.paths.get(index)
    }

    #[must_use]
    pub fn meshes(&self) -> &ForkMeshes {
        &self.meshes
    }

    /// Lateral distance between either branch centerline and the main
    /// centerline at `distance`; zero outside the fork.
    #[must_use]
    pub fn separation_at(&self, distance: f64) -> f64 {
        if !self.contains(distance) {
            return 0.0;
        }
        let t = (distance - self.fork_distance()) / self.params.branch_length;
        separation(t, self.params.max_separation)
    }

    /// Interpolated frame of branch `index` at `distance`.
    ///
    /// `None` for an unknown branch or a distance outside the fork; callers
    /// fall back to the main-path frame.
    #[must_use]
    pub fn branch_frame(&self, index: usize, distance: f64) -> Option<Frame> {
        self.paths.get(index)?.frame_at(distance)
    }

    /// Commitment to the branches at `distance`: 0 at and beyond both fork
    /// ends, eased up to 1 over the transition distance.
    #[must_use]
    pub fn branch_blend(&self, distance: f64) -> f64 {
        branch_blend(
            distance,
            self.fork_distance(),
            self.rejoin_distance(),
            self.params.transition_distance,
        )
    }

    /// Frame a traveler on branch `index` should follow at `distance`: the
    /// main-path frame blended toward the branch frame by [`Fork::branch_blend`].
    #[must_use]
    pub fn travel_frame<M: MainPath>(&self, index: usize, distance: f64, main: &M) -> Frame {
        let main_frame = main.frame_at(distance);
        let blend = self.branch_blend(distance);
        if blend <= 0.0 {
            return main_frame;
        }
        self.branch_frame(index, distance)
            .and_then(|branch| main_frame.blend(&branch, blend).ok())
            .unwrap_or(main_frame)
    }

    /// Branch a traveler at `angle` degrees around the tube falls into.
    ///
    /// Angles on the `-right` side of the bottom ([`BOTTOM_ANGLE`]) pick the
    /// left branch, the rest pick the right branch.
    #[must_use]
    pub fn branch_for_angle(&self, angle: f64) -> usize {
        let side = if delta_degrees(BOTTOM_ANGLE, angle) < 0.0 {
            LateralSide::Left
        } else {
            LateralSide::Right
        };
        self.branches
            .iter()
            .position(|b| b.side() == side)
            .unwrap_or(0)
    }

    /// Latches the player onto the branch under `angle`, announcing the route
    /// the first time. Does nothing while a branch is already latched.
    pub fn assign_player(
        &mut self,
        angle: f64,
        announcer: &mut impl RouteAnnouncer,
    ) -> AssignOutcome {
        if let BranchAssignment::Assigned(index) = self.assignment {
            return AssignOutcome::AlreadyAssigned(index);
        }

        let index = self.branch_for_angle(angle);
        self.assignment = BranchAssignment::Assigned(index);
        let branch = &self.branches[index];
        info!(
            branch = index,
            kind = %branch.kind(),
            angle,
            fork_distance = self.fork_distance(),
            "player route latched"
        );
        announcer.announce(index, branch);
        AssignOutcome::Latched(index)
    }

    /// Picks a branch for an AI traveler: branch 1 with probability
    /// `aggression` (clamped to `[0, 1]`), else branch 0. Not latched.
    pub fn ai_branch(&self, aggression: f64, rng: &mut impl Rng) -> usize {
        let p = if aggression.is_nan() {
            0.0
        } else {
            aggression.clamp(0.0, 1.0)
        };
        usize::from(rng.gen_bool(p))
    }

    /// Clears the player's route latch.
    pub fn reset_player_branch(&mut self) {
        self.assignment = BranchAssignment::Unassigned;
    }

    #[must_use]
    pub fn player_branch(&self) -> BranchAssignment {
        self.assignment
    }

    /// Coin multiplier of the latched branch, or 1 when unassigned.
    #[must_use]
    pub fn coin_multiplier(&self) -> f64 {
        self.assignment
            .branch()
            .map_or(1.0, |i| self.branches[i].coin_multiplier())
    }

    /// Obstacle multiplier of the latched branch, or 1 when unassigned.
    #[must_use]
    pub fn obstacle_multiplier(&self) -> f64 {
        self.assignment
            .branch()
            .map_or(1.0, |i| self.branches[i].obstacle_multiplier())
    }
}
