//! # Store Core
//!
//! Domain-free building blocks for the store simulation:
//!
//! - [`agent`] - the [`Agent`] trait and the task-spawning helper.
//! - [`post`] - addressed message transport ([`Post`] / [`Mailbox`]).
//! - [`queue`] - bounded waiting lists and least-loaded selection.
//! - [`error`] - shared error types.
//! - [`log`] - tracing subscriber setup.
//!
//! ## Concurrency Model
//!
//! Actors built on this crate never block on a receive: [`Mailbox::poll`]
//! is non-blocking and callers back off with a bounded sleep between
//! attempts. Sends through a [`Post`] never block either; a failed send is
//! reported to the caller, which logs it and moves on. This keeps every
//! actor loop cancellable by a shared flag within one poll cycle.

pub mod agent;
pub mod error;
pub mod log;
pub mod post;
pub mod queue;

pub use agent::Agent;
pub use error::CoreError;
pub use post::{Mailbox, Post};
pub use queue::{least_loaded, WaitQueue};
