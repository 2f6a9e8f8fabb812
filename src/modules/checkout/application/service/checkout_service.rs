use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::cart::application::cart_locks::CartLocks;
use crate::cart::application::ports::outgoing::CartStore;
use crate::cart::application::service::load_reconciled;
use crate::catalog::application::ports::outgoing::ProductQuery;
use crate::checkout::application::domain::{Receipt, Ticket};
use crate::checkout::application::ports::incoming::use_cases::{
    Buyer, CheckoutError, CheckoutOutcome, CheckoutUseCase,
};
use crate::checkout::application::ports::outgoing::{
    PurchaseConfirmation, PurchaseNotifier, StockLedger, StockLedgerError,
};

impl From<StockLedgerError> for CheckoutError {
    fn from(e: StockLedgerError) -> Self {
        match e {
            StockLedgerError::Rejected(violation) => CheckoutError::Rejected(violation),
            StockLedgerError::DatabaseError(msg) => CheckoutError::LedgerError(msg),
        }
    }
}

/// Buys everything in the caller's server-side cart.
///
/// Holds the user's cart lock from the first read until the cart is
/// cleared, so a concurrent add cannot slip between validation and
/// clearing.
pub struct CheckoutService<Q: ProductQuery> {
    store: Arc<dyn CartStore>,
    products: Q,
    ledger: Arc<dyn StockLedger>,
    locks: Arc<CartLocks>,
    notifier: Arc<dyn PurchaseNotifier>,
}

impl<Q: ProductQuery> CheckoutService<Q> {
    pub fn new(
        store: Arc<dyn CartStore>,
        products: Q,
        ledger: Arc<dyn StockLedger>,
        locks: Arc<CartLocks>,
        notifier: Arc<dyn PurchaseNotifier>,
    ) -> Self {
        Self {
            store,
            products,
            ledger,
            locks,
            notifier,
        }
    }
}

#[async_trait]
impl<Q: ProductQuery> CheckoutUseCase for CheckoutService<Q> {
    async fn execute(&self, buyer: Buyer) -> Result<CheckoutOutcome, CheckoutError> {
        let _guard = self.locks.lock(buyer.user_id).await;

        let cart = load_reconciled(self.store.as_ref(), &self.products, buyer.user_id)
            .await
            .map_err(|e| CheckoutError::CartError(e.to_string()))?;
        if cart.is_empty() {
            return Err(CheckoutError::CartEmpty);
        }

        let purchased = self.ledger.commit_purchase(cart.lines()).await?;
        let units = purchased.iter().map(|l| u64::from(l.quantity)).sum();
        info!(
            user_id = %buyer.user_id,
            lines = purchased.len(),
            units,
            "Purchase committed"
        );

        // Stock is already committed; a stale cart is the lesser problem.
        if let Err(e) = self.store.clear(buyer.user_id).await {
            warn!(user_id = %buyer.user_id, error = %e, "Failed to clear cart after purchase");
        }

        let receipt = match Receipt::from_purchase(&purchased) {
            Ok(receipt) => receipt,
            Err(e) => {
                error!(user_id = %buyer.user_id, error = %e, "Failed to build purchase ticket");
                return Ok(CheckoutOutcome {
                    units,
                    ticket: None,
                });
            }
        };

        let ticket = Ticket::render(&receipt, Utc::now());

        if let Some(email) = buyer.email {
            self.notifier.notify(PurchaseConfirmation { email, receipt });
        }

        Ok(CheckoutOutcome {
            units,
            ticket: Some(ticket),
        })
    }
}
