use crate::error::{ConfigError, Result};

/// Numeric configuration of one fork, supplied by the level placement system.
///
/// Build with [`ForkParams::default`] and the `with_*` setters, then call
/// [`ForkParams::validate`] (done automatically by [`Fork::new`](super::Fork::new)).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForkParams {
    /// Main-path distance where the tunnel starts to split.
    pub fork_distance: f64,
    /// Main-path distance covered by the branches before they rejoin.
    pub branch_length: f64,
    /// Peak lateral offset of each branch centerline from the main centerline.
    pub max_separation: f64,
    /// Radius of each branch tube.
    pub branch_radius: f64,
    /// Radius of the main tube the junctions attach to.
    pub main_radius: f64,
    /// Target spacing between branch path samples.
    pub sample_spacing: f64,
    /// Distance over which the blend weight ramps between 0 and 1.
    pub transition_distance: f64,
    /// Segments around every ring.
    pub circum_segments: usize,
    /// Main-path distance covered by each Y-junction.
    pub junction_length: f64,
    /// Rings per Y-junction, including both boundary rings.
    pub junction_rings: usize,
    /// Septum height at the branch end, as a fraction of `branch_radius`.
    pub septum_height_ratio: f64,
    /// Radius multiplier of the tube rings tucked under the junctions.
    pub overlap_flare: f64,
    /// Radius multiplier at the very ends of a branch tube.
    pub mouth_flare: f64,
    /// Fraction of the branch length at each end over which the mouth flare fades out.
    pub mouth_fraction: f64,
}

impl Default for ForkParams {
    fn default() -> Self {
        Self {
            fork_distance: 0.0,
            branch_length: 60.0,
            max_separation: 3.0,
            branch_radius: 2.8,
            main_radius: 4.0,
            sample_spacing: 2.0,
            transition_distance: 30.0,
            circum_segments: 24,
            junction_length: 15.0,
            junction_rings: 12,
            septum_height_ratio: 0.8,
            overlap_flare: 1.05,
            mouth_flare: 1.15,
            mouth_fraction: 0.08,
        }
    }
}

impl ForkParams {
    #[must_use]
    pub fn with_fork_distance(mut self, fork_distance: f64) -> Self {
        self.fork_distance = fork_distance;
        self
    }

    #[must_use]
    pub fn with_branch_length(mut self, branch_length: f64) -> Self {
        self.branch_length = branch_length;
        self
    }

    #[must_use]
    pub fn with_max_separation(mut self, max_separation: f64) -> Self {
        self.max_separation = max_separation;
        self
    }

    #[must_use]
    pub fn with_branch_radius(mut self, branch_radius: f64) -> Self {
        self.branch_radius = branch_radius;
        self
    }

    #[must_use]
    pub fn with_main_radius(mut self, main_radius: f64) -> Self {
        self.main_radius = main_radius;
        self
    }

    #[must_use]
    pub fn with_sample_spacing(mut self, sample_spacing: f64) -> Self {
        self.sample_spacing = sample_spacing;
        self
    }

    #[must_use]
    pub fn with_transition_distance(mut self, transition_distance: f64) -> Self {
        self.transition_distance = transition_distance;
        self
    }

    #[must_use]
    pub fn with_circum_segments(mut self, circum_segments: usize) -> Self {
        self.circum_segments = circum_segments;
        self
    }

    #[must_use]
    pub fn with_junction(mut self, length: f64, rings: usize) -> Self {
        self.junction_length = length;
        self.junction_rings = rings;
        self
    }

    #[must_use]
    pub fn with_septum_height_ratio(mut self, septum_height_ratio: f64) -> Self {
        self.septum_height_ratio = septum_height_ratio;
        self
    }

    /// Sets the overlap-ring flare, the mouth flare and the mouth fraction.
    #[must_use]
    pub fn with_flare(mut self, overlap: f64, mouth: f64, mouth_fraction: f64) -> Self {
        self.overlap_flare = overlap;
        self.mouth_flare = mouth;
        self.mouth_fraction = mouth_fraction;
        self
    }

    /// Main-path distance where the branches rejoin.
    #[must_use]
    pub fn rejoin_distance(&self) -> f64 {
        self.fork_distance + self.branch_length
    }

    /// Septum height at the branch end of each junction.
    #[must_use]
    pub fn septum_height(&self) -> f64 {
        self.septum_height_ratio * self.branch_radius
    }

    /// Checks every parameter, failing on the first problem found.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the offending parameter.
    pub fn validate(&self) -> Result<()> {
        let reals = [
            ("fork_distance", self.fork_distance),
            ("branch_length", self.branch_length),
            ("max_separation", self.max_separation),
            ("branch_radius", self.branch_radius),
            ("main_radius", self.main_radius),
            ("sample_spacing", self.sample_spacing),
            ("transition_distance", self.transition_distance),
            ("junction_length", self.junction_length),
            ("septum_height_ratio", self.septum_height_ratio),
            ("overlap_flare", self.overlap_flare),
            ("mouth_flare", self.mouth_flare),
            ("mouth_fraction", self.mouth_fraction),
        ];
        for (parameter, value) in reals {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { parameter, value }.into());
            }
        }

        for (parameter, value) in [
            ("branch_length", self.branch_length),
            ("branch_radius", self.branch_radius),
            ("main_radius", self.main_radius),
            ("sample_spacing", self.sample_spacing),
            ("transition_distance", self.transition_distance),
            ("junction_length", self.junction_length),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { parameter, value }.into());
            }
        }

        for (parameter, value) in [
            ("fork_distance", self.fork_distance),
            ("max_separation", self.max_separation),
            ("septum_height_ratio", self.septum_height_ratio),
            ("mouth_fraction", self.mouth_fraction),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { parameter, value }.into());
            }
        }

        if self.branch_length < 2.0 * self.sample_spacing {
            return Err(ConfigError::BranchTooShort {
                branch_length: self.branch_length,
                sample_spacing: self.sample_spacing,
            }
            .into());
        }

        let half_length = self.branch_length * 0.5;
        if self.transition_distance > half_length {
            return Err(ConfigError::ExceedsHalfBranch {
                parameter: "transition_distance",
                value: self.transition_distance,
                half_length,
            }
            .into());
        }
        // the tube between the two junctions needs at least one ring gap
        if self.junction_length >= half_length {
            return Err(ConfigError::ExceedsHalfBranch {
                parameter: "junction_length",
                value: self.junction_length,
                half_length,
            }
            .into());
        }

        if self.circum_segments < 3 {
            return Err(ConfigError::TooFew {
                parameter: "circum_segments",
                value: self.circum_segments,
                min: 3,
            }
            .into());
        }
        if self.junction_rings < 2 {
            return Err(ConfigError::TooFew {
                parameter: "junction_rings",
                value: self.junction_rings,
                min: 2,
            }
            .into());
        }

        for (parameter, value) in [
            ("overlap_flare", self.overlap_flare),
            ("mouth_flare", self.mouth_flare),
        ] {
            if value < 1.0 {
                return Err(ConfigError::ShrinkingFlare { parameter, value }.into());
            }
        }

        Ok(())
    }
}
