//! In-memory store implementations for development and tests.
//!
//! The maps behind the mutex are the single source of truth; snapshots hand
//! out clones so callers never hold the lock across an await.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::app::status::QueueCounts;
use crate::domain::{Assignment, GroupId, NotificationId, StoreError};
use crate::ports::{DrawStore, NotificationStore};
use crate::queue::{DeliveryState, NotificationRecord};

/// In-memory notification record store.
#[derive(Default)]
pub struct InMemoryNotificationStore {
    records: Mutex<HashMap<NotificationId, NotificationRecord>>,
}

impl InMemoryNotificationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationStore for InMemoryNotificationStore {
    async fn insert(&self, record: NotificationRecord) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        if records.contains_key(&record.id) {
            return Err(StoreError::Unavailable(format!(
                "duplicate notification id {}",
                record.id
            )));
        }
        records.insert(record.id, record);
        Ok(())
    }

    async fn due_snapshot(&self, now: DateTime<Utc>) -> Result<Vec<NotificationRecord>, StoreError> {
        let records = self.records.lock().await;
        let mut due: Vec<NotificationRecord> = records
            .values()
            .filter(|r| r.is_due(now))
            .cloned()
            .collect();
        // Oldest due first bounds starvation; id breaks ties in creation order.
        due.sort_by(|a, b| (a.scheduled_at, a.id).cmp(&(b.scheduled_at, b.id)));
        Ok(due)
    }

    async fn update(&self, record: NotificationRecord) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        match records.get_mut(&record.id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(StoreError::NotFound(record.id)),
        }
    }

    async fn get(&self, id: NotificationId) -> Result<Option<NotificationRecord>, StoreError> {
        let records = self.records.lock().await;
        Ok(records.get(&id).cloned())
    }

    async fn counts_by_state(&self, now: DateTime<Utc>) -> Result<QueueCounts, StoreError> {
        let records = self.records.lock().await;
        let mut counts = QueueCounts::default();
        for record in records.values() {
            match record.state(now) {
                DeliveryState::Pending => counts.pending += 1,
                DeliveryState::Scheduled => counts.scheduled += 1,
                DeliveryState::Sent => counts.sent += 1,
                DeliveryState::Failed => counts.failed += 1,
            }
        }
        Ok(counts)
    }
}

/// In-memory draw result store.
#[derive(Default)]
pub struct InMemoryDrawStore {
    draws: Mutex<HashMap<GroupId, Vec<Assignment>>>,
}

impl InMemoryDrawStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DrawStore for InMemoryDrawStore {
    async fn try_record_draw(
        &self,
        group: &GroupId,
        assignments: Vec<Assignment>,
    ) -> Result<bool, StoreError> {
        let mut draws = self.draws.lock().await;
        if draws.contains_key(group) {
            return Ok(false);
        }
        draws.insert(group.clone(), assignments);
        Ok(true)
    }

    async fn assignments(&self, group: &GroupId) -> Result<Option<Vec<Assignment>>, StoreError> {
        let draws = self.draws.lock().await;
        Ok(draws.get(group).cloned())
    }
}
