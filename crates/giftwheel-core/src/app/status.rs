//! Queue status views for observability.

use serde::{Deserialize, Serialize};

/// Record counts by derived delivery state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueCounts {
    pub pending: usize,
    pub scheduled: usize,
    pub sent: usize,
    pub failed: usize,
}

impl QueueCounts {
    pub fn total(&self) -> usize {
        self.pending + self.scheduled + self.sent + self.failed
    }
}
