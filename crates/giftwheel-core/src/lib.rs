//! giftwheel-core
//!
//! Core engine of a Secret-Santa group organizer: the draw (a random single
//! gift cycle through all participants, honoring exclusion constraints) and
//! the retrying, idempotent delivery pipeline for the notifications the draw
//! produces.
//!
//! # Module layout
//! - **domain**: ids, exclusion constraints, assignments, notification kinds,
//!   error taxonomy
//! - **draw**: the cycle generator and the orchestrator around it
//! - **queue**: notification records, retry policy, the producer enqueue API
//! - **ports**: abstraction seams (Clock, Mailer, NotificationStore,
//!   DrawStore, IdGenerator)
//! - **app**: the delivery processor, its recurring scheduler, status views
//! - **impls**: in-memory adapters for development and tests
//!
//! The surrounding CRUD (groups, invitations, wishlists) lives elsewhere;
//! the draw result and the notification queue are the contract boundary.

pub mod app;
pub mod domain;
pub mod draw;
pub mod impls;
pub mod ports;
pub mod queue;
