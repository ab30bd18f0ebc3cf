//! Ports: the seams between the core and everything it does not own.
//!
//! Each trait hides an external capability (wall clock, id entropy, mail
//! provider, record storage) so the draw and delivery logic stay pure and
//! testable. The in-memory adapters live in [`crate::impls`].

pub mod clock;
pub mod draw_store;
pub mod id_generator;
pub mod mailer;
pub mod notification_store;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::draw_store::DrawStore;
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::mailer::Mailer;
pub use self::notification_store::NotificationStore;
