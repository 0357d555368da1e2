//! Store simulation binary.
//!
//! Spawns the configured population, lets the customers shop, and closes
//! the store once they are all done (or on ctrl-c).
//!
//! ```bash
//! RUST_LOG=info cargo run -- --sellers 12 --cashiers 3 --customers 20
//! ```

use std::time::Duration;

use clap::Parser;
use store_core::{agent, log::setup_tracing};
use store_sim::monitor::Monitor;
use store_sim::{Population, SimConfig, SimError, Simulation};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "store-sim", about = "Concurrent retail store simulation")]
struct Cli {
    /// Number of sellers; at least one per department.
    #[arg(long, default_value_t = 10)]
    sellers: usize,

    /// Number of cashiers.
    #[arg(long, default_value_t = 2)]
    cashiers: usize,

    /// Number of customers.
    #[arg(long, default_value_t = 5)]
    customers: usize,

    /// Seed for reproducible random draws.
    #[arg(long)]
    seed: Option<u64>,

    /// Render a periodic view of the store state.
    #[arg(long)]
    monitor: bool,
}

#[tokio::main]
async fn main() -> Result<(), SimError> {
    setup_tracing();
    let cli = Cli::parse();

    let config = SimConfig {
        rng_seed: cli.seed,
        ..SimConfig::default()
    };
    let population = Population {
        sellers: cli.sellers,
        cashiers: cli.cashiers,
        customers: cli.customers,
    };

    let simulation = Simulation::start(population, config)?;
    let monitor = cli.monitor.then(|| {
        agent::spawn(Monitor::new(
            simulation.store(),
            Duration::from_millis(500),
        ))
    });

    let snapshot = simulation.run().await?;
    if let Some(handle) = monitor {
        let _ = handle.await;
    }

    info!(
        revenue = snapshot.revenue,
        served = snapshot.finished_customers,
        "simulation complete"
    );
    Ok(())
}
