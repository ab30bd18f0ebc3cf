//! Port implementations (in-memory adapters for development and tests).

pub mod memory;

pub use memory::{InMemoryDrawStore, InMemoryNotificationStore};
