//! # Store Simulation
//!
//! A retail store simulated as a population of independently scheduled
//! actors - customers, sellers and cashiers - coordinating through a shared
//! state region behind one lock and addressed message posts.
//!
//! - [`config`] - tunables and random-draw helpers.
//! - [`state`] - the shared store record and its snapshot view.
//! - [`messages`] - the four wire shapes exchanged between actor kinds.
//! - [`seller`], [`cashier`], [`customer`] - the actor state machines.
//! - [`orchestrator`] - population validation, spawning and shutdown.
//! - [`monitor`] - periodic read-only rendering of the store state.

pub mod cashier;
pub mod config;
pub mod customer;
pub mod messages;
pub mod monitor;
pub mod orchestrator;
pub mod seller;
pub mod state;

pub use config::SimConfig;
pub use orchestrator::{Population, SimError, Simulation};
pub use state::{StoreSnapshot, StoreState};
