//! Draw engine: cycle generation and the orchestrator around it.

pub mod generator;
pub mod orchestrator;

pub use generator::{MIN_PARTICIPANTS, generate_cycle};
pub use orchestrator::{DrawOrchestrator, DrawOutcome, DrawRequest};
