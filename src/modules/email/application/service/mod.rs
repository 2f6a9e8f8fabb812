pub mod purchase_email;
pub mod purchase_email_notifier;

pub use purchase_email::render_purchase_email;
pub use purchase_email_notifier::{PurchaseEmailNotifier, RetryPolicy};
