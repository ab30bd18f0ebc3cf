//! Application layer: the delivery processor, its scheduler, and status
//! views.

pub mod processor;
pub mod scheduler;
pub mod status;

pub use processor::{BatchObserver, BatchSummary, DeliveryProcessor};
pub use scheduler::{Scheduler, SchedulerConfig};
pub use status::QueueCounts;
