//! Assignments: the directed santa -> recipient edges produced by a draw.

use serde::{Deserialize, Serialize};

use super::ids::ParticipantId;

/// One directed gift edge. The full edge set of a group forms exactly one
/// cycle covering every participant once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub santa: ParticipantId,
    pub recipient: ParticipantId,
}

impl Assignment {
    pub fn new(santa: ParticipantId, recipient: ParticipantId) -> Self {
        Self { santa, recipient }
    }

    /// Convert a cyclic order into its N directed edges, including the
    /// wrap-around edge from the last participant back to the first.
    pub fn from_cycle(order: &[ParticipantId]) -> Vec<Assignment> {
        let n = order.len();
        (0..n)
            .map(|i| Assignment::new(order[i].clone(), order[(i + 1) % n].clone()))
            .collect()
    }
}
