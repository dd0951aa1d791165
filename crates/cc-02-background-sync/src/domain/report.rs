use shared_types::QueueKind;

/// Outcome of one replay pass over a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub kind: QueueKind,
    /// Records read at the start of the pass.
    pub attempted: usize,
    /// Records the endpoint accepted.
    pub delivered: usize,
    /// Records left queued after a failed attempt.
    pub failed: usize,
    /// Delivered records actually removed in the second pass.
    pub removed: usize,
}

impl SyncReport {
    pub fn empty(kind: QueueKind) -> Self {
        Self {
            kind,
            attempted: 0,
            delivered: 0,
            failed: 0,
            removed: 0,
        }
    }

    /// True when nothing is left behind: no delivery failed and every
    /// delivered record was removed. An empty queue succeeds.
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.removed == self.delivered
    }
}
