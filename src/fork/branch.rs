use std::fmt;

/// Which side of the main centerline a branch diverges toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LateralSide {
    /// Toward the main frame's `-right` axis.
    Left,
    /// Toward the main frame's `+right` axis.
    Right,
}

impl LateralSide {
    /// Returns `-1.0` for [`LateralSide::Left`] and `+1.0` for [`LateralSide::Right`].
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Returns the other side.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Gameplay flavour of a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchKind {
    Safe,
    Risky,
}

impl fmt::Display for BranchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => f.write_str("SAFE ROUTE"),
            Self::Risky => f.write_str("RISKY ROUTE"),
        }
    }
}

/// One of the two sub-tunnels of a fork. Immutable once the fork is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Branch {
    kind: BranchKind,
    side: LateralSide,
    coin_multiplier: f64,
    obstacle_multiplier: f64,
}

impl Branch {
    /// Creates a branch record.
    #[must_use]
    pub fn new(
        kind: BranchKind,
        side: LateralSide,
        coin_multiplier: f64,
        obstacle_multiplier: f64,
    ) -> Self {
        Self {
            kind,
            side,
            coin_multiplier,
            obstacle_multiplier,
        }
    }

    /// A safe branch: regular coins, fewer obstacles.
    #[must_use]
    pub fn safe(side: LateralSide) -> Self {
        Self::new(BranchKind::Safe, side, 1.0, 0.75)
    }

    /// A risky branch: double coins, more obstacles.
    #[must_use]
    pub fn risky(side: LateralSide) -> Self {
        Self::new(BranchKind::Risky, side, 2.0, 1.5)
    }

    #[must_use]
    pub fn kind(&self) -> BranchKind {
        self.kind
    }

    #[must_use]
    pub fn side(&self) -> LateralSide {
        self.side
    }

    #[must_use]
    pub fn coin_multiplier(&self) -> f64 {
        self.coin_multiplier
    }

    #[must_use]
    pub fn obstacle_multiplier(&self) -> f64 {
        self.obstacle_multiplier
    }
}

/// Per-fork route latch for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BranchAssignment {
    #[default]
    Unassigned,
    Assigned(usize),
}

impl BranchAssignment {
    /// Returns the latched branch index, if any.
    #[must_use]
    pub fn branch(self) -> Option<usize> {
        match self {
            Self::Unassigned => None,
            Self::Assigned(index) => Some(index),
        }
    }
}

/// Result of [`Fork::assign_player`](super::Fork::assign_player).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOutcome {
    /// The latch was empty and now holds this branch.
    Latched(usize),
    /// The latch already held this branch; nothing changed.
    AlreadyAssigned(usize),
}

impl AssignOutcome {
    /// The branch the player is on after the call.
    #[must_use]
    pub fn branch(self) -> usize {
        match self {
            Self::Latched(index) | Self::AlreadyAssigned(index) => index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sides_have_opposite_signs() {
        assert!((LateralSide::Left.sign() + LateralSide::Right.sign()).abs() < f64::EPSILON);
        assert_eq!(LateralSide::Left.opposite(), LateralSide::Right);
    }

    #[test]
    fn risky_pays_more_than_safe() {
        let safe = Branch::safe(LateralSide::Right);
        let risky = Branch::risky(LateralSide::Left);
        assert!(risky.coin_multiplier() > safe.coin_multiplier());
        assert!(risky.obstacle_multiplier() > safe.obstacle_multiplier());
    }

    #[test]
    fn route_announcement_text() {
        assert_eq!(BranchKind::Safe.to_string(), "SAFE ROUTE");
        assert_eq!(BranchKind::Risky.to_string(), "RISKY ROUTE");
    }

    #[test]
    fn assignment_defaults_to_unassigned() {
        assert_eq!(BranchAssignment::default().branch(), None);
        assert_eq!(BranchAssignment::Assigned(1).branch(), Some(1));
    }
}
