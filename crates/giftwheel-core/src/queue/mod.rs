//! Notification queue: records, retry policy, and the producer-facing
//! enqueue API.

mod record;
mod retry;
mod state;

pub use record::NotificationRecord;
pub use retry::RetryPolicy;
pub use state::DeliveryState;

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::{NotificationId, NotificationPayload, ParticipantId, StoreError};
use crate::ports::{Clock, IdGenerator, NotificationStore};

/// Producer-facing enqueue API, exposed to group-event flows (the draw
/// orchestrator, wishlist updates, ...).
///
/// Producers only insert pending records; every later mutation belongs to
/// the delivery processor.
#[derive(Clone)]
pub struct NotificationQueue {
    store: Arc<dyn NotificationStore>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    policy: RetryPolicy,
}

impl NotificationQueue {
    pub fn new(
        store: Arc<dyn NotificationStore>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            store,
            ids,
            clock,
            policy,
        }
    }

    /// Insert one pending record. `scheduled_at` defaults to now; a future
    /// time delays the first attempt.
    pub async fn enqueue(
        &self,
        recipient: ParticipantId,
        payload: NotificationPayload,
        scheduled_at: Option<DateTime<Utc>>,
    ) -> Result<NotificationId, StoreError> {
        let now = self.clock.now();
        let id = self.ids.notification_id();
        let record = NotificationRecord::new(
            id,
            recipient,
            payload,
            scheduled_at.unwrap_or(now),
            self.policy.max_attempts,
            now,
        );

        tracing::debug!(
            notification = %id,
            kind = %record.payload.kind(),
            scheduled_at = %record.scheduled_at,
            "enqueued notification"
        );
        self.store.insert(record).await?;
        Ok(id)
    }
}
