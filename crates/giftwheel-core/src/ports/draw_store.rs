//! DrawStore port: persisted assignments, one draw per group.

use async_trait::async_trait;

use crate::domain::{Assignment, GroupId, StoreError};

/// Storage seam for draw results.
#[async_trait]
pub trait DrawStore: Send + Sync {
    /// Persist the assignment edges for a group, atomically checking that no
    /// draw exists yet. Returns `false` (and writes nothing) if the group
    /// was already drawn; the draw is one-shot.
    async fn try_record_draw(
        &self,
        group: &GroupId,
        assignments: Vec<Assignment>,
    ) -> Result<bool, StoreError>;

    /// The recorded assignments, or `None` if the group has not been drawn.
    async fn assignments(&self, group: &GroupId) -> Result<Option<Vec<Assignment>>, StoreError>;

    async fn is_drawn(&self, group: &GroupId) -> Result<bool, StoreError> {
        Ok(self.assignments(group).await?.is_some())
    }
}
