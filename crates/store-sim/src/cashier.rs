//! # Cashier Actor
//!
//! `IDLE -> CHARGING -> IDLE`. A cashier announces the price, simulates the
//! payment, confirms it, then settles everything - revenue, queue, busy
//! flag - in one critical section.
//!
//! A customer at the till with no purchase on record is charged the
//! configured minimum. That tolerance is deliberate: the till never turns a
//! customer away over a bookkeeping gap.

use std::sync::Arc;

use async_trait::async_trait;
use rand::rngs::StdRng;
use store_core::{Agent, Mailbox, Post};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::SimConfig;
use crate::messages::{CashierToClient, ClientToCashier};
use crate::state::StoreState;

pub struct Cashier {
    pub id: usize,
    pub store: Arc<StoreState>,
    pub config: SimConfig,
    pub inbox: Mailbox<ClientToCashier>,
    pub replies: Post<CashierToClient>,
    pub rng: StdRng,
}

#[async_trait]
impl Agent for Cashier {
    fn label(&self) -> String {
        format!("cashier-{}", self.id)
    }

    async fn run(mut self) {
        info!(cashier = self.id, "till open");
        while self.store.is_active() {
            let Some(arrival) = self.inbox.poll() else {
                sleep(self.config.poll_interval).await;
                continue;
            };
            self.charge(arrival.customer).await;
        }
        info!(cashier = self.id, "till closed");
    }
}

impl Cashier {
    async fn charge(&mut self, customer: usize) {
        self.store.set_cashier_busy(self.id, true);

        let amount = match self.store.take_purchase(customer) {
            Some(amount) => amount,
            None => {
                warn!(
                    cashier = self.id,
                    customer, "no purchase on record, charging the minimum"
                );
                self.config.fallback_amount
            }
        };

        info!(cashier = self.id, customer, amount, "price announced");
        self.reply(
            customer,
            CashierToClient {
                amount,
                payment_done: false,
            },
        );

        let pause = self.config.payment.sample(&mut self.rng);
        sleep(pause).await;

        self.reply(
            customer,
            CashierToClient {
                amount,
                payment_done: true,
            },
        );
        info!(cashier = self.id, customer, amount, "payment received");

        self.store.settle_payment(self.id, customer, amount);
    }

    fn reply(&self, customer: usize, message: CashierToClient) {
        if let Err(err) = self.replies.send(customer, message) {
            warn!(cashier = self.id, customer, %err, "reply lost");
        }
    }
}
