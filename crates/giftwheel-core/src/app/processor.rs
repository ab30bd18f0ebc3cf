//! Delivery processor: drains due notifications through the mailer.
//!
//! One call processes one bounded batch to completion, sequentially. A
//! record's failure is absorbed into its own retry bookkeeping; only store
//! errors abort the batch (and are retried on the next scheduler tick).

use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::{MailError, NotificationPayload, StoreError};
use crate::ports::{Clock, Mailer, NotificationStore};
use crate::queue::{NotificationRecord, RetryPolicy};

/// Counts emitted once per processing pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub attempted: usize,
    pub delivered: usize,
    pub failed: usize,
}

/// Completion signal observer.
///
/// Deliberately a narrow callback registration, not an event bus: the only
/// contract is "fires exactly once per `process_pending_batch` call, after
/// every record in the batch has been handled".
pub trait BatchObserver: Send + Sync {
    fn on_batch_complete(&self, summary: &BatchSummary);
}

pub struct DeliveryProcessor {
    store: Arc<dyn NotificationStore>,
    mailer: Arc<dyn Mailer>,
    clock: Arc<dyn Clock>,
    policy: RetryPolicy,

    /// Registered at construction time, immutable afterwards; no locking on
    /// the hot path.
    observers: Vec<Arc<dyn BatchObserver>>,
}

impl DeliveryProcessor {
    pub fn new(
        store: Arc<dyn NotificationStore>,
        mailer: Arc<dyn Mailer>,
        clock: Arc<dyn Clock>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            store,
            mailer,
            clock,
            policy,
            observers: Vec::new(),
        }
    }

    /// Register a completion observer. Call before sharing the processor.
    pub fn subscribe(&mut self, observer: Arc<dyn BatchObserver>) {
        self.observers.push(observer);
    }

    /// Process one batch with no external shutdown signal (tests,
    /// administrative triggers).
    pub async fn process_pending_batch(&self) -> Result<BatchSummary, StoreError> {
        // Sender kept on the stack so the receiver stays live for the call.
        let (_guard, mut never) = watch::channel(false);
        self.process_pending_batch_with(&mut never).await
    }

    /// Process one batch, racing each delivery attempt against `shutdown`.
    /// An attempt cut short by shutdown is a failed attempt, not a silent
    /// drop; records whose attempt never started are left untouched for the
    /// next pass.
    pub async fn process_pending_batch_with(
        &self,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Result<BatchSummary, StoreError> {
        let batch = self.store.due_snapshot(self.clock.now()).await?;

        let mut summary = BatchSummary::default();
        for mut record in batch {
            // Shutdown only cancels the in-flight attempt. A record not yet
            // handed to the mailer keeps its attempt budget.
            if *shutdown.borrow() {
                break;
            }
            summary.attempted += 1;
            record.start_attempt(self.clock.now());

            let result = tokio::select! {
                result = self.deliver(&record) => result,
                _ = shutdown.changed() => Err(MailError::cancelled()),
            };

            let now = self.clock.now();
            match result {
                Ok(()) => {
                    record.mark_sent(now);
                    summary.delivered += 1;
                    tracing::debug!(notification = %record.id, "delivered");
                }
                Err(err) => {
                    summary.failed += 1;
                    self.settle_failure(&mut record, err, now);
                }
            }
            self.store.update(record).await?;
        }

        for observer in &self.observers {
            observer.on_batch_complete(&summary);
        }
        tracing::debug!(
            attempted = summary.attempted,
            delivered = summary.delivered,
            failed = summary.failed,
            "batch complete"
        );
        Ok(summary)
    }

    /// Dispatch on the stored payload to the matching mailer call.
    async fn deliver(&self, record: &NotificationRecord) -> Result<(), MailError> {
        match &record.payload {
            NotificationPayload::DrawCompleted { group_id, budget } => {
                self.mailer
                    .send_draw_completed(&record.recipient, group_id, budget.as_deref())
                    .await
            }
            NotificationPayload::WishlistUpdated { group_id, giftee } => {
                self.mailer
                    .send_wishlist_updated(&record.recipient, group_id, giftee)
                    .await
            }
        }
    }

    fn settle_failure(&self, record: &mut NotificationRecord, err: MailError, now: DateTime<Utc>) {
        if record.attempt_count < record.max_attempts {
            let delay = TimeDelta::from_std(self.policy.next_delay(record.attempt_count))
                .unwrap_or(TimeDelta::MAX);
            let next = now.checked_add_signed(delay).unwrap_or(DateTime::<Utc>::MAX_UTC);
            tracing::debug!(
                notification = %record.id,
                attempt = record.attempt_count,
                retry_at = %next,
                error = %err,
                "delivery failed, retry scheduled"
            );
            record.schedule_retry(next, err.to_string(), now);
        } else {
            tracing::warn!(
                notification = %record.id,
                attempts = record.attempt_count,
                error = %err,
                "delivery failed permanently"
            );
            record.mark_failed(err.to_string(), now);
        }
    }
}
