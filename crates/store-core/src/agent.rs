//! # Agent Trait
//!
//! An [`Agent`] is an independently scheduled unit of execution with its own
//! state and loop. Each agent runs in its own Tokio task and owns its state
//! exclusively; coordination happens through message posts and explicitly
//! shared records, never through borrowed internals.
//!
//! The contract is deliberately small: a stable label for logs and a
//! consuming `run` future. [`spawn`] wraps `tokio::spawn` so every agent
//! gets uniform start/stop logging.

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::debug;

/// An independently scheduled actor.
#[async_trait]
pub trait Agent: Send + 'static {
    /// Stable identity used in logs (e.g. `seller-3`).
    fn label(&self) -> String;

    /// Consumes the agent and drives its loop to completion.
    async fn run(self);
}

/// Spawns an agent on the Tokio runtime with lifecycle logging.
pub fn spawn<A: Agent>(agent: A) -> JoinHandle<()> {
    let label = agent.label();
    tokio::spawn(async move {
        debug!(%label, "agent started");
        agent.run().await;
        debug!(%label, "agent stopped");
    })
}
