//! Mailer port: the injected mail delivery capability.

use async_trait::async_trait;

use crate::domain::{GroupId, MailError, ParticipantId};

/// One call per notification kind, taking the recipient plus the stored
/// correlation fields. Templating and rendering are the capability's
/// concern; the core only passes fields through.
///
/// Retrying a call for the same record is safe only if the capability is
/// idempotent per record (duplicate suppression lives on its side, not in
/// the processor).
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Tell a participant the draw finished and their giftee is ready.
    async fn send_draw_completed(
        &self,
        recipient: &ParticipantId,
        group: &GroupId,
        budget: Option<&str>,
    ) -> Result<(), MailError>;

    /// Tell a santa that their giftee's wishlist changed.
    async fn send_wishlist_updated(
        &self,
        recipient: &ParticipantId,
        group: &GroupId,
        giftee: &ParticipantId,
    ) -> Result<(), MailError>;
}
