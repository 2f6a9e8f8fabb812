use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{
    message::header::ContentType, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::SmtpSettings;
use crate::email::adapter::outgoing::LogEmailSender;
use crate::email::application::ports::outgoing::{EmailError, EmailSender};

/// Seam over the lettre transport so message building can be tested
/// without a server.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Message) -> Result<(), String>;
}

#[async_trait]
impl Mailer for AsyncSmtpTransport<Tokio1Executor> {
    async fn send(&self, email: Message) -> Result<(), String> {
        AsyncTransport::send(self, email)
            .await
            .map(|_resp| ())
            .map_err(|e| e.to_string())
    }
}

pub struct SmtpEmailSender {
    mailer: Box<dyn Mailer>,
    from_email: String,
}

impl SmtpEmailSender {
    pub fn new_with_mailer(mailer: Box<dyn Mailer>, from_email: &str) -> Self {
        Self {
            mailer,
            from_email: from_email.to_string(),
        }
    }

    /// Authenticated relay over TLS.
    pub fn relay(
        server: &str,
        username: &str,
        password: &str,
        from_email: &str,
    ) -> Result<Self, EmailError> {
        let creds = Credentials::new(username.to_string(), password.to_string());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(server)
            .map_err(|e| EmailError::Transport(e.to_string()))?
            .credentials(creds)
            .build();

        Ok(Self::new_with_mailer(Box::new(transport), from_email))
    }

    /// Unauthenticated plain-text relay (Mailpit, MailHog).
    pub fn local(host: &str, port: u16, from_email: &str) -> Self {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Self::new_with_mailer(Box::new(transport), from_email)
    }
}

/// Picks the sender for the configured SMTP mode.
pub fn sender_from_settings(
    settings: &SmtpSettings,
    from_email: &str,
) -> Result<Box<dyn EmailSender>, EmailError> {
    Ok(match settings {
        SmtpSettings::Disabled => Box::new(LogEmailSender),
        SmtpSettings::Relay {
            server,
            username,
            password,
        } => Box::new(SmtpEmailSender::relay(server, username, password, from_email)?),
        SmtpSettings::Local { host, port } => {
            Box::new(SmtpEmailSender::local(host, *port, from_email))
        }
    })
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send_html(&self, to: &str, subject: &str, html: &str) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(
                self.from_email
                    .parse()
                    .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?,
            )
            .to(to
                .parse()
                .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html.to_string())
            .map_err(|e| EmailError::Build(e.to_string()))?;

        self.mailer.send(email).await.map_err(EmailError::Transport)
    }
}
