//! NotificationStore port: the durable queue of notification records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::app::status::QueueCounts;
use crate::domain::{NotificationId, StoreError};
use crate::queue::NotificationRecord;

/// Storage seam for notification records.
///
/// Producers only `insert`; all mutation of existing records goes through
/// the delivery processor via `update`. That split keeps producers and the
/// processor from ever writing the same record concurrently.
///
/// `due_snapshot` is plain select-then-update, which is correct only while
/// one processor instance runs per store. Horizontal scaling would need a
/// claim-based lease here instead.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Insert a new pending record. Ids are unique; inserting a duplicate id
    /// is a programming error surfaced as [`StoreError::Unavailable`].
    async fn insert(&self, record: NotificationRecord) -> Result<(), StoreError>;

    /// Snapshot of records eligible for an attempt at `now`: not yet sent,
    /// attempts remaining, `scheduled_at <= now`. Ordered by `scheduled_at`
    /// ascending (oldest due first), then id. Records inserted after the
    /// snapshot wait for the next call.
    async fn due_snapshot(&self, now: DateTime<Utc>) -> Result<Vec<NotificationRecord>, StoreError>;

    /// Persist the mutated record after an attempt.
    async fn update(&self, record: NotificationRecord) -> Result<(), StoreError>;

    async fn get(&self, id: NotificationId) -> Result<Option<NotificationRecord>, StoreError>;

    /// Counts by derived delivery state, for observability and tests.
    async fn counts_by_state(&self, now: DateTime<Utc>) -> Result<QueueCounts, StoreError>;
}
