use async_trait::async_trait;
use tracing::info;

use crate::email::application::ports::outgoing::{EmailError, EmailSender};

/// Used when no SMTP server is configured. Only records that a message
/// would have been sent.
#[derive(Debug, Default, Clone)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send_html(&self, to: &str, subject: &str, html: &str) -> Result<(), EmailError> {
        info!(to = %to, subject = %subject, bytes = html.len(), "Email not sent (SMTP disabled)");
        Ok(())
    }
}
