use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::purchase_email::{render_purchase_email, PURCHASE_SUBJECT};
use crate::checkout::application::ports::outgoing::{PurchaseConfirmation, PurchaseNotifier};
use crate::email::application::ports::outgoing::{EmailError, EmailSender};

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    /// Doubled after every failed attempt.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

/// Sends purchase confirmations on a background task.
#[derive(Clone)]
pub struct PurchaseEmailNotifier {
    sender: Arc<dyn EmailSender>,
    retry: RetryPolicy,
}

impl PurchaseEmailNotifier {
    pub fn new(sender: Arc<dyn EmailSender>, retry: RetryPolicy) -> Self {
        Self { sender, retry }
    }

    pub async fn deliver(&self, confirmation: &PurchaseConfirmation) -> Result<(), EmailError> {
        let html = render_purchase_email(&confirmation.email, &confirmation.receipt);
        let mut delay = self.retry.base_delay;
        let mut attempt = 1;

        loop {
            match self
                .sender
                .send_html(&confirmation.email, PURCHASE_SUBJECT, &html)
                .await
            {
                Ok(()) => {
                    info!(to = %confirmation.email, attempt, "Purchase confirmation sent");
                    return Ok(());
                }
                Err(e @ EmailError::InvalidAddress(_)) => return Err(e),
                Err(e) if attempt >= self.retry.attempts => return Err(e),
                Err(e) => {
                    warn!(to = %confirmation.email, attempt, error = %e, "Purchase email failed, retrying");
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                    attempt += 1;
                }
            }
        }
    }
}

impl PurchaseNotifier for PurchaseEmailNotifier {
    fn notify(&self, confirmation: PurchaseConfirmation) {
        let notifier = self.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.deliver(&confirmation).await {
                warn!(to = %confirmation.email, error = %e, "Purchase confirmation not delivered");
            }
        });
    }
}
