//! # Monitor
//!
//! Renders a periodic, read-only view of the store while the simulation is
//! active, and once more after it closes. The monitor only ever consumes
//! [`StoreState::snapshot`]; it never mutates shared state.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use store_core::Agent;
use tokio::time::sleep;

use crate::config::department_name;
use crate::state::{StoreSnapshot, StoreState};

pub struct Monitor {
    store: Arc<StoreState>,
    refresh: Duration,
}

impl Monitor {
    pub fn new(store: Arc<StoreState>, refresh: Duration) -> Self {
        Self { store, refresh }
    }
}

#[async_trait]
impl Agent for Monitor {
    fn label(&self) -> String {
        "monitor".to_string()
    }

    async fn run(self) {
        while self.store.is_active() {
            render(&self.store.snapshot());
            sleep(self.refresh).await;
        }
        render(&self.store.snapshot());
    }
}

fn render(snapshot: &StoreSnapshot) {
    println!(
        "=== store === {:<8} served {:>3}/{:<3} revenue {:>7} EUR",
        if snapshot.active { "OPEN" } else { "CLOSED" },
        snapshot.finished_customers,
        snapshot.customer_count,
        snapshot.revenue,
    );
    for (id, seller) in snapshot.sellers.iter().enumerate() {
        println!(
            "  seller {id:>2}  {:<20} {:<5} queue {:?}",
            department_name(seller.department),
            if seller.busy { "busy" } else { "idle" },
            seller.waiting,
        );
    }
    for (id, cashier) in snapshot.cashiers.iter().enumerate() {
        println!(
            "  cashier {id:>2} {:<20} {:<5} queue {:?}",
            "",
            if cashier.busy { "busy" } else { "idle" },
            cashier.waiting,
        );
    }
}
