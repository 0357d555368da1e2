//! # Orchestrator
//!
//! Owns the lifecycle of one simulation run: validate the population,
//! create the shared state and the message posts, assign departments,
//! spawn every actor, wait for the customers to finish, then drive the
//! coordinated shutdown of sellers and cashiers.
//!
//! An operator interrupt (ctrl-c) short-circuits the wait and runs the
//! same shutdown path immediately.

use std::sync::Arc;

use rand::Rng;
use store_core::{agent, Post};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::cashier::Cashier;
use crate::config::SimConfig;
use crate::customer::Customer;
use crate::seller::Seller;
use crate::state::{StoreSnapshot, StoreState};

/// RNG salts per actor kind, so identities never share a stream.
const CASHIER_SALT: u64 = 1_000;
const CUSTOMER_SALT: u64 = 2_000;
const ORCHESTRATOR_SALT: u64 = 3_000;

/// Errors that end a run.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("need at least one department")]
    NoDepartments,
    #[error("need at least {required} sellers to cover every department, got {actual}")]
    NotEnoughSellers { required: usize, actual: usize },
    #[error("need at least one cashier")]
    NoCashiers,
    #[error("need at least one customer")]
    NoCustomers,
    #[error("{role} {id} task failed: {source}")]
    ActorFailed {
        role: &'static str,
        id: usize,
        #[source]
        source: tokio::task::JoinError,
    },
}

/// How many actors of each kind to spawn.
#[derive(Debug, Clone, Copy)]
pub struct Population {
    pub sellers: usize,
    pub cashiers: usize,
    pub customers: usize,
}

impl Population {
    /// Startup validation; failing it aborts the run before anything is
    /// created.
    pub fn validate(&self, departments: usize) -> Result<(), SimError> {
        if departments == 0 {
            return Err(SimError::NoDepartments);
        }
        if self.sellers < departments {
            return Err(SimError::NotEnoughSellers {
                required: departments,
                actual: self.sellers,
            });
        }
        if self.cashiers == 0 {
            return Err(SimError::NoCashiers);
        }
        if self.customers == 0 {
            return Err(SimError::NoCustomers);
        }
        Ok(())
    }
}

/// The first `departments` sellers each cover a distinct department, which
/// guarantees coverage; any remaining sellers draw one uniformly.
fn assign_departments(sellers: usize, departments: usize, rng: &mut impl Rng) -> Vec<usize> {
    (0..sellers)
        .map(|seller| {
            if seller < departments {
                seller
            } else {
                rng.gen_range(0..departments)
            }
        })
        .collect()
}

/// A running simulation: the shared store plus the handles of every
/// spawned actor.
pub struct Simulation {
    store: Arc<StoreState>,
    seller_handles: Vec<JoinHandle<()>>,
    cashier_handles: Vec<JoinHandle<()>>,
    customer_handles: Vec<JoinHandle<()>>,
}

impl Simulation {
    /// Creates the shared resources and spawns the whole population:
    /// sellers first, then cashiers, then customers.
    pub fn start(population: Population, config: SimConfig) -> Result<Self, SimError> {
        population.validate(config.departments)?;
        info!(
            sellers = population.sellers,
            cashiers = population.cashiers,
            customers = population.customers,
            "opening the store"
        );

        let store = Arc::new(StoreState::new(
            population.sellers,
            population.cashiers,
            population.customers,
            config.queue_capacity,
        ));

        let (seller_queries, seller_inboxes) = Post::new(population.sellers);
        let (seller_replies, seller_reply_boxes) = Post::new(population.customers);
        let (cashier_queries, cashier_inboxes) = Post::new(population.cashiers);
        let (cashier_replies, cashier_reply_boxes) = Post::new(population.customers);

        let mut rng = config.actor_rng(ORCHESTRATOR_SALT);
        let departments = assign_departments(population.sellers, config.departments, &mut rng);
        store.set_departments(&departments);
        store.set_active(true);

        let seller_handles = seller_inboxes
            .into_iter()
            .enumerate()
            .map(|(id, inbox)| {
                agent::spawn(Seller {
                    id,
                    department: departments[id],
                    store: Arc::clone(&store),
                    config: config.clone(),
                    inbox,
                    replies: seller_replies.clone(),
                    rng: config.actor_rng(id as u64),
                })
            })
            .collect();

        let cashier_handles = cashier_inboxes
            .into_iter()
            .enumerate()
            .map(|(id, inbox)| {
                agent::spawn(Cashier {
                    id,
                    store: Arc::clone(&store),
                    config: config.clone(),
                    inbox,
                    replies: cashier_replies.clone(),
                    rng: config.actor_rng(CASHIER_SALT + id as u64),
                })
            })
            .collect();

        let customer_handles = seller_reply_boxes
            .into_iter()
            .zip(cashier_reply_boxes)
            .enumerate()
            .map(|(id, (seller_replies, cashier_replies))| {
                agent::spawn(Customer {
                    id,
                    store: Arc::clone(&store),
                    config: config.clone(),
                    seller_queries: seller_queries.clone(),
                    seller_replies,
                    cashier_queries: cashier_queries.clone(),
                    cashier_replies,
                    rng: config.actor_rng(CUSTOMER_SALT + id as u64),
                })
            })
            .collect();

        Ok(Self {
            store,
            seller_handles,
            cashier_handles,
            customer_handles,
        })
    }

    /// The shared store, for the monitor and for reporting.
    pub fn store(&self) -> Arc<StoreState> {
        Arc::clone(&self.store)
    }

    /// Waits for every customer to leave (or for an operator interrupt),
    /// then closes the store: flips `active` off and awaits every seller
    /// and cashier. A failed customer task is skipped; a failed seller or
    /// cashier task is fatal.
    pub async fn run(self) -> Result<StoreSnapshot, SimError> {
        let Self {
            store,
            seller_handles,
            cashier_handles,
            customer_handles,
        } = self;

        let mut all_customers = tokio::spawn(async move {
            for (id, handle) in customer_handles.into_iter().enumerate() {
                if let Err(err) = handle.await {
                    warn!(customer = id, %err, "customer task failed, skipped");
                }
            }
        });

        let interrupted = tokio::select! {
            _ = &mut all_customers => false,
            _ = tokio::signal::ctrl_c() => true,
        };
        if interrupted {
            warn!("interrupt received, closing the store early");
        } else {
            info!("all customers have left");
        }

        // The flag is the termination notification: every poll loop sees it
        // within one poll cycle.
        store.set_active(false);
        if interrupted {
            let _ = all_customers.await;
        }

        for (id, handle) in seller_handles.into_iter().enumerate() {
            handle.await.map_err(|source| SimError::ActorFailed {
                role: "seller",
                id,
                source,
            })?;
        }
        for (id, handle) in cashier_handles.into_iter().enumerate() {
            handle.await.map_err(|source| SimError::ActorFailed {
                role: "cashier",
                id,
                source,
            })?;
        }

        let snapshot = store.snapshot();
        info!(
            revenue = snapshot.revenue,
            served = snapshot.finished_customers,
            customers = snapshot.customer_count,
            "store closed"
        );
        Ok(snapshot)
    }
}
