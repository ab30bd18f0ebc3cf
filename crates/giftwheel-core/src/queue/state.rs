//! Delivery state classification for notification records.

use serde::{Deserialize, Serialize};

/// Derived state of a notification record.
///
/// The record itself stores no state column; the classification falls out of
/// `sent_at`, `attempt_count` and `scheduled_at`:
/// - Pending -> Sent (a delivery attempt succeeded)
/// - Pending -> Scheduled -> Pending (retry loop, until attempts run out)
/// - Pending -> Failed (max attempts reached without success)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryState {
    /// Eligible for an attempt now (or will be, once selected).
    Pending,

    /// Waiting out a backoff delay; `scheduled_at` is in the future.
    Scheduled,

    /// Delivered. Terminal; never selected again.
    Sent,

    /// Attempts exhausted without success. Terminal; an external monitor is
    /// expected to watch for these.
    Failed,
}

impl DeliveryState {
    /// Terminal states get no further processing.
    pub fn is_terminal(self) -> bool {
        matches!(self, DeliveryState::Sent | DeliveryState::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_sent_and_failed_are_terminal() {
        assert!(DeliveryState::Sent.is_terminal());
        assert!(DeliveryState::Failed.is_terminal());
        assert!(!DeliveryState::Pending.is_terminal());
        assert!(!DeliveryState::Scheduled.is_terminal());
    }
}
