use async_trait::async_trait;

use crate::cart::application::domain::entities::CartLine;
use crate::checkout::application::domain::{PurchaseLine, PurchaseViolation};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StockLedgerError {
    #[error(transparent)]
    Rejected(#[from] PurchaseViolation),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Applies a purchase to product stock as one all-or-nothing unit.
///
/// Implementations lock the referenced rows, validate every line with
/// `plan_purchase` and decrement stock before committing. On any error
/// nothing is changed.
#[async_trait]
pub trait StockLedger: Send + Sync {
    async fn commit_purchase(&self, lines: &[CartLine]) -> Result<Vec<PurchaseLine>, StockLedgerError>;
}
