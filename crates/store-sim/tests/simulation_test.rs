use std::time::Duration;

use store_sim::config::{DelayRange, SimConfig};
use store_sim::{Population, SimError, Simulation};
use tokio::time::timeout;

/// A configuration with millisecond delays so full runs finish quickly.
/// The checkout walk stays comfortably above the poll interval so the
/// seller always records the sale before the customer reaches the till.
fn fast_config(seed: u64) -> SimConfig {
    SimConfig {
        discussion: DelayRange::new(Duration::from_millis(5), Duration::from_millis(10)),
        payment: DelayRange::new(Duration::from_millis(5), Duration::from_millis(10)),
        checkout_walk: Duration::from_millis(50),
        poll_interval: Duration::from_millis(2),
        rng_seed: Some(seed),
        ..SimConfig::default()
    }
}

const RUN_DEADLINE: Duration = Duration::from_secs(30);

/// Revenue conservation: with every consultation ending in a purchase and a
/// collapsed amount range, the final revenue is exactly known.
#[tokio::test]
async fn revenue_matches_the_recorded_sales_exactly() {
    let config = SimConfig {
        departments: 1,
        purchase_probability: 100,
        amount_min: 42,
        amount_max: 42,
        ..fast_config(7)
    };
    let population = Population {
        sellers: 10,
        cashiers: 2,
        customers: 5,
    };

    let simulation = Simulation::start(population, config).expect("valid population");
    let store = simulation.store();
    let snapshot = timeout(RUN_DEADLINE, simulation.run())
        .await
        .expect("run should not hang")
        .expect("run should succeed");

    assert_eq!(snapshot.revenue, 5 * 42);
    assert_eq!(snapshot.finished_customers, 5);
    assert!(!snapshot.active, "store must be closed after the run");

    // Every one-shot purchase slot was consumed by a cashier.
    for customer in 0..population.customers {
        assert!(!store.has_pending_purchase(customer));
    }
}

/// Non-purchasing customers contribute nothing: no revenue, no finished
/// count, no purchase slots, no cashier queues.
#[tokio::test]
async fn window_shoppers_leave_no_trace() {
    let config = SimConfig {
        departments: 2,
        purchase_probability: 0,
        ..fast_config(11)
    };
    let population = Population {
        sellers: 4,
        cashiers: 2,
        customers: 6,
    };

    let simulation = Simulation::start(population, config).expect("valid population");
    let store = simulation.store();
    let snapshot = timeout(RUN_DEADLINE, simulation.run())
        .await
        .expect("run should not hang")
        .expect("run should succeed");

    assert_eq!(snapshot.revenue, 0);
    assert_eq!(snapshot.finished_customers, 0);
    for customer in 0..population.customers {
        assert!(!store.has_pending_purchase(customer));
    }
    for cashier in &snapshot.cashiers {
        assert!(cashier.waiting.is_empty());
        assert!(!cashier.busy);
    }
}

/// Redirection terminates: with several departments and the minimum seller
/// cover, every customer still reaches a competent seller and checks out.
#[tokio::test]
async fn redirected_customers_all_check_out() {
    let config = SimConfig {
        departments: 5,
        purchase_probability: 100,
        amount_min: 10,
        amount_max: 10,
        ..fast_config(13)
    };
    let population = Population {
        sellers: 5,
        cashiers: 1,
        customers: 8,
    };

    let simulation = Simulation::start(population, config).expect("valid population");
    let snapshot = timeout(RUN_DEADLINE, simulation.run())
        .await
        .expect("shutdown must complete in bounded time")
        .expect("run should succeed");

    assert_eq!(snapshot.finished_customers, 8);
    assert_eq!(snapshot.revenue, 8 * 10);
    assert!(!snapshot.active);
    for seller in &snapshot.sellers {
        assert!(seller.waiting.is_empty());
        assert!(!seller.busy);
    }
}

/// Fatal-startup validation: an under-covered department set never spawns
/// anything.
#[tokio::test]
async fn startup_rejects_an_invalid_population() {
    let config = SimConfig {
        departments: 10,
        ..fast_config(17)
    };
    let population = Population {
        sellers: 3,
        cashiers: 1,
        customers: 1,
    };

    match Simulation::start(population, config).map(|_| ()) {
        Err(SimError::NotEnoughSellers { required, actual }) => {
            assert_eq!(required, 10);
            assert_eq!(actual, 3);
        }
        Ok(()) => panic!("expected NotEnoughSellers, got a running simulation"),
        Err(other) => panic!("expected NotEnoughSellers, got {other:?}"),
    }
}
