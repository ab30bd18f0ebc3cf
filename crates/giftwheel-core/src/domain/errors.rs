//! Error taxonomy.
//!
//! Draw failures are synchronous and reported to the caller that requested
//! the draw. Delivery failures are recorded on the notification record and
//! retried; they never surface as process-level errors. Store errors are the
//! only thing that aborts a processing batch.

use thiserror::Error;

use super::ids::{GroupId, NotificationId, ParticipantId};

/// Rejections of a draw request. Each variant carries a distinct, actionable
/// message: too few people, too many rules, or a draw that already happened.
#[derive(Debug, Error)]
pub enum DrawError {
    #[error("at least {min} participants are required for a draw (got {found}); invite more participants")]
    InsufficientParticipants { found: usize, min: usize },

    #[error("no valid gift cycle satisfies the current exclusion rules; remove some exclusions and try again")]
    InfeasibleExclusions,

    #[error("group {0} has already been drawn; assignments are final and the draw cannot be re-run")]
    AlreadyDrawn(GroupId),

    #[error("an exclusion must name two different participants (got {0} twice)")]
    SelfExclusion(ParticipantId),

    #[error("exclusion references {0}, who is not a participant of this draw")]
    UnknownParticipant(ParticipantId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Infrastructure-level failure of a record store. A batch hitting one of
/// these aborts and is retried on the next scheduler tick.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    #[error("no notification record with id {0}")]
    NotFound(NotificationId),
}

/// Failure reported by the mail delivery capability.
///
/// Carries a human-readable reason and an optional machine code from the
/// provider. Recorded on the notification record as `last_error`.
#[derive(Debug, Clone, Error)]
#[error("{reason}")]
pub struct MailError {
    pub reason: String,
    pub code: Option<String>,
}

impl MailError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            code: None,
        }
    }

    pub fn with_code(reason: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            code: Some(code.into()),
        }
    }

    /// A delivery attempt cut short by shutdown. Counts as a failed attempt
    /// for retry accounting, never silently dropped.
    pub fn cancelled() -> Self {
        Self::with_code("delivery cancelled by shutdown", "cancelled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_errors_have_distinct_actionable_messages() {
        let too_few = DrawError::InsufficientParticipants { found: 2, min: 3 };
        let infeasible = DrawError::InfeasibleExclusions;
        let drawn = DrawError::AlreadyDrawn(GroupId::new("g1"));

        assert!(too_few.to_string().contains("invite more participants"));
        assert!(infeasible.to_string().contains("remove some exclusions"));
        assert!(drawn.to_string().contains("already been drawn"));
    }

    #[test]
    fn mail_error_keeps_optional_machine_code() {
        let err = MailError::with_code("mailbox full", "452");
        assert_eq!(err.to_string(), "mailbox full");
        assert_eq!(err.code.as_deref(), Some("452"));

        let err = MailError::new("timeout");
        assert!(err.code.is_none());
    }
}
