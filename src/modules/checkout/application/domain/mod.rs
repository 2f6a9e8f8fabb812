pub mod purchase;
pub mod receipt;
pub mod ticket;

pub use purchase::{plan_purchase, PurchaseLine, PurchaseViolation};
pub use receipt::{Receipt, ReceiptError, ReceiptRow};
pub use ticket::Ticket;
