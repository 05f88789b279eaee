use slotmap::SlotMap;
use tracing::debug;

use super::Fork;

slotmap::new_key_type! {
    /// Unique identifier for a fork in the manager.
    pub struct ForkId;
}

/// Registry of the forks placed along one run.
///
/// Forks are addressed by generational [`ForkId`]s, so an id kept by a
/// spawner stays safe to query after its fork has been pruned.
#[derive(Debug, Default)]
pub struct ForkManager {
    forks: SlotMap<ForkId, Fork>,
}

impl ForkManager {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fork and returns its ID.
    pub fn insert(&mut self, fork: Fork) -> ForkId {
        let fork_distance = fork.fork_distance();
        let id = self.forks.insert(fork);
        debug!(?id, fork_distance, "registered fork");
        id
    }

    #[must_use]
    pub fn get(&self, id: ForkId) -> Option<&Fork> {
        self.forks.get(id)
    }

    pub fn get_mut(&mut self, id: ForkId) -> Option<&mut Fork> {
        self.forks.get_mut(id)
    }

    /// Removes a fork, returning it if it was still registered.
    pub fn remove(&mut self, id: ForkId) -> Option<Fork> {
        self.forks.remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ForkId, &Fork)> {
        self.forks.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.forks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forks.is_empty()
    }

    /// The fork whose span contains `distance`, if any.
    ///
    /// When spans overlap, the fork that started latest wins.
    #[must_use]
    pub fn fork_at(&self, distance: f64) -> Option<(ForkId, &Fork)> {
        self.forks
            .iter()
            .filter(|(_, fork)| fork.contains(distance))
            .max_by(|(_, a), (_, b)| a.fork_distance().total_cmp(&b.fork_distance()))
    }

    /// Drops every fork that rejoins the main path before `distance`.
    ///
    /// Returns the number of forks removed.
    pub fn prune_before(&mut self, distance: f64) -> usize {
        let before = self.forks.len();
        self.forks.retain(|_, fork| fork.rejoin_distance() >= distance);
        let removed = before - self.forks.len();
        if removed > 0 {
            debug!(removed, distance, "pruned passed forks");
        }
        removed
    }

    /// Clears the player's latch on every fork, for a new run over the same layout.
    pub fn reset_player_branches(&mut self) {
        for fork in self.forks.values_mut() {
            fork.reset_player_branch();
        }
    }

    pub fn clear(&mut self) {
        self.forks.clear();
    }
}
