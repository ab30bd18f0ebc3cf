//! Notification kinds and their correlation data.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{GroupId, ParticipantId};

/// Enumerated message type. Determines which mailer call and template
/// arguments are used for delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    DrawCompleted,
    WishlistUpdated,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::DrawCompleted => "draw_completed",
            NotificationKind::WishlistUpdated => "wishlist_updated",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind plus the kind-specific correlation data carried by a record.
///
/// The core never renders message content; it only stores the fields the
/// mail capability needs and passes them through on delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationPayload {
    /// The group's draw finished; the recipient has a giftee to look up.
    DrawCompleted {
        group_id: GroupId,
        /// Agreed budget hint, if the organizer set one.
        budget: Option<String>,
    },

    /// A giftee changed their wishlist; their santa should take a look.
    WishlistUpdated {
        group_id: GroupId,
        giftee: ParticipantId,
    },
}

impl NotificationPayload {
    pub fn kind(&self) -> NotificationKind {
        match self {
            NotificationPayload::DrawCompleted { .. } => NotificationKind::DrawCompleted,
            NotificationPayload::WishlistUpdated { .. } => NotificationKind::WishlistUpdated,
        }
    }

    pub fn group_id(&self) -> &GroupId {
        match self {
            NotificationPayload::DrawCompleted { group_id, .. } => group_id,
            NotificationPayload::WishlistUpdated { group_id, .. } => group_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_reports_its_kind() {
        let p = NotificationPayload::DrawCompleted {
            group_id: GroupId::new("g1"),
            budget: Some("30 EUR".to_string()),
        };
        assert_eq!(p.kind(), NotificationKind::DrawCompleted);

        let p = NotificationPayload::WishlistUpdated {
            group_id: GroupId::new("g1"),
            giftee: ParticipantId::new("alice"),
        };
        assert_eq!(p.kind(), NotificationKind::WishlistUpdated);
    }

    #[test]
    fn payload_serializes_with_kind_tag() {
        let p = NotificationPayload::WishlistUpdated {
            group_id: GroupId::new("g1"),
            giftee: ParticipantId::new("alice"),
        };
        let v: serde_json::Value = serde_json::to_value(&p).unwrap();
        assert_eq!(v["kind"], "wishlist_updated");
        assert_eq!(v["giftee"], "alice");

        let back: NotificationPayload = serde_json::from_value(v).unwrap();
        assert_eq!(back, p);
    }
}
