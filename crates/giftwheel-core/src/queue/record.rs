//! Notification record: one obligation to deliver one message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DeliveryState;
use crate::domain::{NotificationId, NotificationPayload, ParticipantId};

/// A pending, retried, or settled notification.
///
/// Design:
/// - This is the single source of truth for delivery state; all transitions
///   happen through the methods below.
/// - Producers create records and never touch them again. The delivery
///   processor is the only writer after insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: NotificationId,

    /// Who the message goes to.
    pub recipient: ParticipantId,

    /// Kind plus correlation data; picks the mailer call on delivery.
    pub payload: NotificationPayload,

    /// Earliest time eligible for an attempt. Pushed forward on failure.
    pub scheduled_at: DateTime<Utc>,

    /// Set once on success; the record is terminal afterwards.
    pub sent_at: Option<DateTime<Utc>>,

    /// Stamped on the first attempt, never changed after.
    pub first_attempt_at: Option<DateTime<Utc>>,

    /// Refreshed on every attempt.
    pub last_attempt_at: Option<DateTime<Utc>>,

    /// Attempts made so far.
    pub attempt_count: u32,

    /// Attempt budget, stamped from the retry policy at enqueue time.
    pub max_attempts: u32,

    /// Summary of the most recent failure; cleared on success.
    pub last_error: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NotificationRecord {
    pub fn new(
        id: NotificationId,
        recipient: ParticipantId,
        payload: NotificationPayload,
        scheduled_at: DateTime<Utc>,
        max_attempts: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            recipient,
            payload,
            scheduled_at,
            sent_at: None,
            first_attempt_at: None,
            last_attempt_at: None,
            attempt_count: 0,
            max_attempts,
            last_error: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Stamp attempt bookkeeping: `first_attempt_at` once, `last_attempt_at`
    /// always, and the counter.
    pub fn start_attempt(&mut self, now: DateTime<Utc>) {
        self.first_attempt_at.get_or_insert(now);
        self.last_attempt_at = Some(now);
        self.attempt_count += 1;
        self.updated_at = now;
    }

    /// Delivery succeeded. Terminal.
    pub fn mark_sent(&mut self, now: DateTime<Utc>) {
        self.sent_at = Some(now);
        self.last_error = None;
        self.updated_at = now;
    }

    /// Delivery failed with attempts remaining: push `scheduled_at` out.
    pub fn schedule_retry(&mut self, next: DateTime<Utc>, error: String, now: DateTime<Utc>) {
        self.scheduled_at = next;
        self.last_error = Some(error);
        self.updated_at = now;
    }

    /// Delivery failed on the final attempt. `scheduled_at` stays where it
    /// was; the record is never selected again.
    pub fn mark_failed(&mut self, error: String, now: DateTime<Utc>) {
        self.last_error = Some(error);
        self.updated_at = now;
    }

    /// Eligible for an attempt at `now`?
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.sent_at.is_none() && self.attempt_count < self.max_attempts && self.scheduled_at <= now
    }

    pub fn is_terminal(&self) -> bool {
        self.sent_at.is_some() || self.attempt_count >= self.max_attempts
    }

    pub fn state(&self, now: DateTime<Utc>) -> DeliveryState {
        if self.sent_at.is_some() {
            DeliveryState::Sent
        } else if self.attempt_count >= self.max_attempts {
            DeliveryState::Failed
        } else if self.scheduled_at > now {
            DeliveryState::Scheduled
        } else {
            DeliveryState::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GroupId, NotificationPayload};
    use chrono::{TimeDelta, TimeZone};
    use ulid::Ulid;

    fn record_at(now: DateTime<Utc>) -> NotificationRecord {
        NotificationRecord::new(
            NotificationId::from_ulid(Ulid::new()),
            ParticipantId::new("alice"),
            NotificationPayload::DrawCompleted {
                group_id: GroupId::new("g1"),
                budget: None,
            },
            now,
            5,
            now,
        )
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 12, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn fresh_record_is_pending_and_due() {
        let now = t0();
        let record = record_at(now);

        assert_eq!(record.attempt_count, 0);
        assert!(record.is_due(now));
        assert!(!record.is_terminal());
        assert_eq!(record.state(now), DeliveryState::Pending);
    }

    #[test]
    fn first_attempt_stamp_is_kept_forever() {
        let now = t0();
        let mut record = record_at(now);

        record.start_attempt(now);
        let later = now + TimeDelta::seconds(90);
        record.start_attempt(later);

        assert_eq!(record.first_attempt_at, Some(now));
        assert_eq!(record.last_attempt_at, Some(later));
        assert_eq!(record.attempt_count, 2);
    }

    #[test]
    fn sent_record_is_terminal_and_never_due() {
        let now = t0();
        let mut record = record_at(now);

        record.start_attempt(now);
        record.mark_sent(now);

        assert!(record.is_terminal());
        assert!(!record.is_due(now + TimeDelta::days(365)));
        assert_eq!(record.state(now), DeliveryState::Sent);
        assert!(record.last_error.is_none());
    }

    #[test]
    fn retry_pushes_scheduled_at_forward() {
        let now = t0();
        let mut record = record_at(now);

        record.start_attempt(now);
        record.schedule_retry(now + TimeDelta::seconds(60), "smtp timeout".into(), now);

        assert_eq!(record.state(now), DeliveryState::Scheduled);
        assert!(!record.is_due(now));
        assert!(record.is_due(now + TimeDelta::seconds(60)));
        assert_eq!(record.last_error.as_deref(), Some("smtp timeout"));
    }

    #[test]
    fn exhausted_attempts_leave_a_failed_record_with_scheduled_at_untouched() {
        let now = t0();
        let mut record = record_at(now);

        for _ in 0..5 {
            record.start_attempt(now);
        }
        let scheduled_before = record.scheduled_at;
        record.mark_failed("mailbox gone".into(), now);

        assert!(record.is_terminal());
        assert_eq!(record.scheduled_at, scheduled_before);
        assert_eq!(record.state(now), DeliveryState::Failed);
        assert!(!record.is_due(now + TimeDelta::days(1)));
    }
}
