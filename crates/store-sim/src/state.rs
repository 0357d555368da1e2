//! # Shared Store State
//!
//! One [`StoreState`] instance is shared by every actor in a run. All
//! mutable records - seller and cashier queues, purchase slots, counters -
//! sit behind a single mutex, and every method here keeps its critical
//! section to a handful of field accesses: no method sends a message,
//! receives one, or sleeps while holding the lock.
//!
//! The `active` flag is the sole cooperative cancellation signal. It is an
//! atomic rather than lock-protected state so actors can check it on every
//! poll cycle without contending for the lock.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use serde::Serialize;
use store_core::{least_loaded, WaitQueue};

/// One seller's shared record: the department it covers, whether it is
/// with a customer, and who is waiting for it.
#[derive(Debug)]
pub struct SellerRecord {
    pub department: usize,
    pub busy: bool,
    pub waiting: WaitQueue,
}

/// One cashier's shared record.
#[derive(Debug)]
pub struct CashierRecord {
    pub busy: bool,
    pub waiting: WaitQueue,
}

/// One-shot handoff of a sale amount from a seller to a cashier.
#[derive(Debug, Clone, Copy, Default)]
struct PurchaseSlot {
    amount: u64,
    valid: bool,
}

#[derive(Debug)]
struct StoreInner {
    sellers: Vec<SellerRecord>,
    cashiers: Vec<CashierRecord>,
    pending: Vec<PurchaseSlot>,
    finished_customers: usize,
    revenue: u64,
}

/// The shared state region of one simulation run.
#[derive(Debug)]
pub struct StoreState {
    customer_count: usize,
    active: AtomicBool,
    inner: Mutex<StoreInner>,
}

impl StoreState {
    /// Creates a zero-initialized store; `active` starts false and flips
    /// true only once department assignment is complete.
    pub fn new(
        seller_count: usize,
        cashier_count: usize,
        customer_count: usize,
        queue_capacity: usize,
    ) -> Self {
        let sellers = (0..seller_count)
            .map(|_| SellerRecord {
                department: 0,
                busy: false,
                waiting: WaitQueue::new(queue_capacity),
            })
            .collect();
        let cashiers = (0..cashier_count)
            .map(|_| CashierRecord {
                busy: false,
                waiting: WaitQueue::new(queue_capacity),
            })
            .collect();
        Self {
            customer_count,
            active: AtomicBool::new(false),
            inner: Mutex::new(StoreInner {
                sellers,
                cashiers,
                pending: vec![PurchaseSlot::default(); customer_count],
                finished_customers: 0,
                revenue: 0,
            }),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }

    /// Installs the department assignment. Called once, before `active`
    /// flips true; the caller guarantees every department is covered.
    pub fn set_departments(&self, departments: &[usize]) {
        let mut inner = self.inner.lock();
        for (seller, &department) in inner.sellers.iter_mut().zip(departments) {
            seller.department = department;
        }
    }

    /// Least-loaded seller selection plus queue join in one critical
    /// section, so two customers cannot both pick the same "shortest"
    /// queue and stampede it.
    pub fn choose_seller(&self, customer: usize) -> usize {
        let mut inner = self.inner.lock();
        let chosen =
            least_loaded(inner.sellers.iter().map(|s| s.waiting.len())).unwrap_or_default();
        inner.sellers[chosen].waiting.join(customer);
        chosen
    }

    /// Same discipline for cashiers.
    pub fn choose_cashier(&self, customer: usize) -> usize {
        let mut inner = self.inner.lock();
        let chosen =
            least_loaded(inner.cashiers.iter().map(|c| c.waiting.len())).unwrap_or_default();
        inner.cashiers[chosen].waiting.join(customer);
        chosen
    }

    /// Joins a specific seller's queue (redirection hop). Returns whether
    /// the customer was admitted; a full queue drops the join.
    pub fn join_seller_queue(&self, seller: usize, customer: usize) -> bool {
        self.inner.lock().sellers[seller].waiting.join(customer)
    }

    pub fn leave_seller_queue(&self, seller: usize, customer: usize) {
        self.inner.lock().sellers[seller].waiting.leave(customer);
    }

    pub fn set_seller_busy(&self, seller: usize, busy: bool) {
        self.inner.lock().sellers[seller].busy = busy;
    }

    /// First seller covering `department`. The assignment policy guarantees
    /// one exists; the index-0 fallback mirrors that guarantee never being
    /// re-checked at runtime.
    pub fn seller_for_department(&self, department: usize) -> usize {
        self.inner
            .lock()
            .sellers
            .iter()
            .position(|s| s.department == department)
            .unwrap_or_default()
    }

    /// Records a sale for `customer`. A slot is written at most once per
    /// customer; a second write before the cashier consumed the first is
    /// refused and reported so the caller can log it.
    pub fn record_purchase(&self, customer: usize, amount: u64) -> bool {
        let mut inner = self.inner.lock();
        let slot = &mut inner.pending[customer];
        if slot.valid {
            return false;
        }
        *slot = PurchaseSlot { amount, valid: true };
        true
    }

    /// Reads and invalidates `customer`'s purchase slot - the consuming
    /// half of the one-shot handoff.
    pub fn take_purchase(&self, customer: usize) -> Option<u64> {
        let mut inner = self.inner.lock();
        let slot = &mut inner.pending[customer];
        if !slot.valid {
            return None;
        }
        slot.valid = false;
        Some(slot.amount)
    }

    /// Whether a purchase is currently on record for `customer`.
    pub fn has_pending_purchase(&self, customer: usize) -> bool {
        self.inner.lock().pending[customer].valid
    }

    /// Cashier settlement: add the amount to revenue, drop the customer
    /// from this cashier's queue and free the cashier, all in one critical
    /// section.
    pub fn settle_payment(&self, cashier: usize, customer: usize, amount: u64) {
        let mut inner = self.inner.lock();
        inner.revenue += amount;
        inner.cashiers[cashier].waiting.leave(customer);
        inner.cashiers[cashier].busy = false;
    }

    pub fn set_cashier_busy(&self, cashier: usize, busy: bool) {
        self.inner.lock().cashiers[cashier].busy = busy;
    }

    /// Marks one more customer as having completed a payment.
    pub fn customer_finished(&self) {
        self.inner.lock().finished_customers += 1;
    }

    /// A read-only copy of the whole region for display and reporting.
    pub fn snapshot(&self) -> StoreSnapshot {
        let inner = self.inner.lock();
        StoreSnapshot {
            active: self.is_active(),
            customer_count: self.customer_count,
            finished_customers: inner.finished_customers,
            revenue: inner.revenue,
            sellers: inner
                .sellers
                .iter()
                .map(|s| SellerSnapshot {
                    department: s.department,
                    busy: s.busy,
                    waiting: s.waiting.ids().to_vec(),
                })
                .collect(),
            cashiers: inner
                .cashiers
                .iter()
                .map(|c| CashierSnapshot {
                    busy: c.busy,
                    waiting: c.waiting.ids().to_vec(),
                })
                .collect(),
        }
    }
}

/// Point-in-time view of the store, safe to hold after the lock is gone.
#[derive(Debug, Clone, Serialize)]
pub struct StoreSnapshot {
    pub active: bool,
    pub customer_count: usize,
    pub finished_customers: usize,
    pub revenue: u64,
    pub sellers: Vec<SellerSnapshot>,
    pub cashiers: Vec<CashierSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SellerSnapshot {
    pub department: usize,
    pub busy: bool,
    pub waiting: Vec<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CashierSnapshot {
    pub busy: bool,
    pub waiting: Vec<usize>,
}
