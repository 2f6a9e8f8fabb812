use crate::checkout::application::domain::Receipt;

#[derive(Debug, Clone)]
pub struct PurchaseConfirmation {
    pub email: String,
    pub receipt: Receipt,
}

/// Fire-and-forget delivery of a purchase confirmation. Returns at once;
/// delivery failures never reach the buyer.
pub trait PurchaseNotifier: Send + Sync {
    fn notify(&self, confirmation: PurchaseConfirmation);
}
