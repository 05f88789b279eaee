use super::Branch;

/// Receives the one-shot route announcement when the player's branch latches.
pub trait RouteAnnouncer {
    /// Called once per latch with the chosen branch index and record.
    fn announce(&mut self, index: usize, branch: &Branch);
}

impl<F> RouteAnnouncer for F
where
    F: FnMut(usize, &Branch),
{
    fn announce(&mut self, index: usize, branch: &Branch) {
        self(index, branch);
    }
}

/// Announcer that discards every announcement.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAnnouncer;

impl RouteAnnouncer for SilentAnnouncer {
    fn announce(&mut self, _index: usize, _branch: &Branch) {}
}
