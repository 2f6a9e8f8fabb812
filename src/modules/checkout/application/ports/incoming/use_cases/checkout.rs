use async_trait::async_trait;
use uuid::Uuid;

use crate::checkout::application::domain::{PurchaseViolation, Ticket};

#[derive(Debug, Clone)]
pub struct Buyer {
    pub user_id: Uuid,
    /// Address for the purchase confirmation, when known.
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutOutcome {
    pub units: u64,
    /// `None` when the purchase committed but the ticket could not be built.
    pub ticket: Option<Ticket>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    CartEmpty,

    #[error(transparent)]
    Rejected(#[from] PurchaseViolation),

    #[error("Cart error: {0}")]
    CartError(String),

    #[error("Stock ledger error: {0}")]
    LedgerError(String),
}

#[async_trait]
pub trait CheckoutUseCase: Send + Sync {
    async fn execute(&self, buyer: Buyer) -> Result<CheckoutOutcome, CheckoutError>;
}
