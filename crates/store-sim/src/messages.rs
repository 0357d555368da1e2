//! Wire shapes exchanged between actor kinds.
//!
//! Two logical transports exist: customer-seller and customer-cashier, each
//! with a request and a reply shape. Messages are addressed by the
//! recipient's identity through a [`store_core::Post`].

/// What a customer wants from a seller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Opening question: "do you cover this department?"
    DeptQuery,
    /// Closing answer after the consultation: buy or walk away.
    PurchaseDecision,
}

/// Customer to seller.
#[derive(Debug, Clone)]
pub struct ClientToSeller {
    pub customer: usize,
    pub seller: usize,
    pub department: usize,
    pub kind: RequestKind,
    /// Only meaningful for [`RequestKind::PurchaseDecision`].
    pub buying: bool,
}

/// Seller to customer.
#[derive(Debug, Clone)]
pub struct SellerToClient {
    pub seller: usize,
    /// Whether this seller covers the requested department.
    pub competent: bool,
    /// Where to go instead when not competent.
    pub recommended: Option<usize>,
    /// True once the consultation is over and a decision is expected.
    pub conversation_done: bool,
}

/// Customer to cashier: "I am at your till".
#[derive(Debug, Clone)]
pub struct ClientToCashier {
    pub customer: usize,
    pub cashier: usize,
}

/// Cashier to customer: price announcement, then completion.
#[derive(Debug, Clone)]
pub struct CashierToClient {
    pub amount: u64,
    pub payment_done: bool,
}
