pub mod purchase_notifier;
pub mod stock_ledger;

pub use purchase_notifier::{PurchaseConfirmation, PurchaseNotifier};
pub use stock_ledger::{StockLedger, StockLedgerError};
