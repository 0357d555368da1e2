//! # Customer Actor
//!
//! The most involved state machine in the store:
//!
//! `CHOOSING_DEPT -> CHOOSING_SELLER -> CONTACTING -> {REDIRECTED ->
//! CONTACTING}* -> DECIDING -> {PAYING | LEAVING} -> DONE`
//!
//! Redirection is an explicit loop: a seller that does not cover the
//! wanted department answers with a recommendation, the customer leaves
//! that queue, joins the recommended seller's and asks again. The
//! department-coverage guarantee makes this a single hop in practice.
//!
//! Every wait checks the store's `active` flag, so a shutdown mid-visit
//! sends the customer straight out the door instead of hanging it.

use std::sync::Arc;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::Rng;
use store_core::{Agent, Mailbox, Post};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::{chance, department_name, SimConfig};
use crate::messages::{
    CashierToClient, ClientToCashier, ClientToSeller, RequestKind, SellerToClient,
};
use crate::state::StoreState;

pub struct Customer {
    pub id: usize,
    pub store: Arc<StoreState>,
    pub config: SimConfig,
    pub seller_queries: Post<ClientToSeller>,
    pub seller_replies: Mailbox<SellerToClient>,
    pub cashier_queries: Post<ClientToCashier>,
    pub cashier_replies: Mailbox<CashierToClient>,
    pub rng: StdRng,
}

#[async_trait]
impl Agent for Customer {
    fn label(&self) -> String {
        format!("customer-{}", self.id)
    }

    async fn run(mut self) {
        let department = self.rng.gen_range(0..self.config.departments);
        info!(
            customer = self.id,
            department = department_name(department),
            "entered the store"
        );

        let first = self.store.choose_seller(self.id);
        info!(customer = self.id, seller = first, "heading to seller");

        let Some(seller) = self.consult(first, department).await else {
            info!(customer = self.id, "leaving, store is closing");
            return;
        };

        let buying = chance(&mut self.rng, self.config.purchase_probability);
        self.send_seller(ClientToSeller {
            customer: self.id,
            seller,
            department,
            kind: RequestKind::PurchaseDecision,
            buying,
        });
        self.store.leave_seller_queue(seller, self.id);

        if !buying {
            info!(customer = self.id, "leaves without buying");
            return;
        }
        info!(customer = self.id, "decided to buy");

        sleep(self.config.checkout_walk).await;
        let cashier = self.store.choose_cashier(self.id);
        info!(customer = self.id, cashier, "queueing at the till");
        self.send_cashier(ClientToCashier {
            customer: self.id,
            cashier,
        });

        while self.store.is_active() {
            let Some(reply) = self.cashier_replies.poll() else {
                sleep(self.config.poll_interval).await;
                continue;
            };
            if reply.payment_done {
                info!(customer = self.id, amount = reply.amount, "payment complete");
                self.store.customer_finished();
                info!(customer = self.id, "leaves with the purchase");
                return;
            }
            debug!(customer = self.id, amount = reply.amount, "price announced");
        }
        info!(customer = self.id, "leaving, store is closing");
    }
}

impl Customer {
    /// Contacts `first` and follows redirections until a competent seller
    /// finishes the consultation. Returns that seller, or `None` when the
    /// store went inactive mid-wait.
    async fn consult(&mut self, first: usize, department: usize) -> Option<usize> {
        let mut seller = first;
        loop {
            self.send_seller(ClientToSeller {
                customer: self.id,
                seller,
                department,
                kind: RequestKind::DeptQuery,
                buying: false,
            });

            while self.store.is_active() {
                let Some(reply) = self.seller_replies.poll() else {
                    sleep(self.config.poll_interval).await;
                    continue;
                };

                if !reply.competent {
                    let Some(next) = reply.recommended else {
                        warn!(
                            customer = self.id,
                            seller = reply.seller,
                            "redirection without a recommendation ignored"
                        );
                        continue;
                    };
                    self.store.leave_seller_queue(seller, self.id);
                    if !self.store.join_seller_queue(next, self.id) {
                        debug!(
                            customer = self.id,
                            seller = next,
                            "recommended seller's queue is full, waiting unlisted"
                        );
                    }
                    info!(customer = self.id, from = seller, to = next, "redirected");
                    seller = next;
                    break;
                }

                if !reply.conversation_done {
                    debug!(customer = self.id, seller = reply.seller, "in consultation");
                    continue;
                }

                info!(customer = self.id, seller, "consultation finished");
                return Some(seller);
            }

            if !self.store.is_active() {
                return None;
            }
        }
    }

    fn send_seller(&self, message: ClientToSeller) {
        let seller = message.seller;
        if let Err(err) = self.seller_queries.send(seller, message) {
            warn!(customer = self.id, seller, %err, "query lost");
        }
    }

    fn send_cashier(&self, message: ClientToCashier) {
        let cashier = message.cashier;
        if let Err(err) = self.cashier_queries.send(cashier, message) {
            warn!(customer = self.id, cashier, %err, "till request lost");
        }
    }
}
