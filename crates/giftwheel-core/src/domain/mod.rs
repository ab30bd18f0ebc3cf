//! Domain model (ids, exclusions, assignments, notifications, errors).

pub mod assignment;
pub mod errors;
pub mod exclusion;
pub mod ids;
pub mod notification;

pub use assignment::Assignment;
pub use errors::{DrawError, MailError, StoreError};
pub use exclusion::{ExclusionConstraint, ExclusionSet};
pub use ids::{GroupId, NotificationId, ParticipantId};
pub use notification::{NotificationKind, NotificationPayload};
