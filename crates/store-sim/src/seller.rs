//! # Seller Actor
//!
//! Each seller covers one department and serves one customer at a time:
//! `IDLE -> NEGOTIATING -> (REDIRECTING | SELLING) -> IDLE`.
//!
//! A seller never forwards a customer's request. When asked about a
//! department it does not cover, it looks up a competent colleague and
//! hands the recommendation back - the customer re-contacts on its own.
//! When it does cover the department, it runs the consultation, then waits
//! for that customer's purchase decision, deferring any other traffic that
//! arrives in between.

use std::sync::Arc;

use async_trait::async_trait;
use rand::rngs::StdRng;
use store_core::{Agent, Mailbox, Post};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::{department_name, SimConfig};
use crate::messages::{ClientToSeller, RequestKind, SellerToClient};
use crate::state::StoreState;

pub struct Seller {
    pub id: usize,
    pub department: usize,
    pub store: Arc<StoreState>,
    pub config: SimConfig,
    pub inbox: Mailbox<ClientToSeller>,
    pub replies: Post<SellerToClient>,
    pub rng: StdRng,
}

#[async_trait]
impl Agent for Seller {
    fn label(&self) -> String {
        format!("seller-{}", self.id)
    }

    async fn run(mut self) {
        info!(
            seller = self.id,
            department = department_name(self.department),
            "on the floor"
        );
        while self.store.is_active() {
            let Some(request) = self.inbox.poll() else {
                sleep(self.config.poll_interval).await;
                continue;
            };
            match request.kind {
                RequestKind::DeptQuery => self.serve(request).await,
                RequestKind::PurchaseDecision => {
                    // A decision with no consultation in progress; nothing
                    // to pair it with, so drop it and keep serving.
                    warn!(
                        seller = self.id,
                        customer = request.customer,
                        "stray purchase decision dropped"
                    );
                }
            }
        }
        info!(seller = self.id, "off the floor");
    }
}

impl Seller {
    async fn serve(&mut self, request: ClientToSeller) {
        let customer = request.customer;
        self.store.set_seller_busy(self.id, true);

        if request.department != self.department {
            let recommended = self.store.seller_for_department(request.department);
            info!(
                seller = self.id,
                customer,
                department = department_name(request.department),
                recommended,
                "redirecting customer"
            );
            self.reply(
                customer,
                SellerToClient {
                    seller: self.id,
                    competent: false,
                    recommended: Some(recommended),
                    conversation_done: false,
                },
            );
        } else {
            info!(seller = self.id, customer, "consultation started");
            self.reply(
                customer,
                SellerToClient {
                    seller: self.id,
                    competent: true,
                    recommended: None,
                    conversation_done: false,
                },
            );

            let pause = self.config.discussion.sample(&mut self.rng);
            sleep(pause).await;

            self.reply(
                customer,
                SellerToClient {
                    seller: self.id,
                    competent: true,
                    recommended: None,
                    conversation_done: true,
                },
            );

            if let Some(decision) = self.await_decision(customer).await {
                if decision.buying {
                    let amount = self.config.sample_amount(&mut self.rng);
                    info!(seller = self.id, customer, amount, "sale closed");
                    if !self.store.record_purchase(customer, amount) {
                        warn!(
                            seller = self.id,
                            customer, "purchase already on record, sale not written"
                        );
                    }
                } else {
                    info!(seller = self.id, customer, "customer declined");
                }
            }
        }

        self.store.set_seller_busy(self.id, false);
    }

    /// Waits for the purchase decision of `customer`, setting aside any
    /// other message that lands in the meantime. Gives up when the store
    /// goes inactive.
    async fn await_decision(&mut self, customer: usize) -> Option<ClientToSeller> {
        while self.store.is_active() {
            match self.inbox.poll_fresh() {
                Some(message)
                    if message.kind == RequestKind::PurchaseDecision
                        && message.customer == customer =>
                {
                    return Some(message);
                }
                Some(other) => {
                    debug!(
                        seller = self.id,
                        customer = other.customer,
                        "message deferred during decision wait"
                    );
                    self.inbox.defer(other);
                }
                None => sleep(self.config.poll_interval).await,
            }
        }
        None
    }

    fn reply(&self, customer: usize, message: SellerToClient) {
        if let Err(err) = self.replies.send(customer, message) {
            warn!(seller = self.id, customer, %err, "reply lost");
        }
    }
}
