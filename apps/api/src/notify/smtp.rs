use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::{error, info};

use crate::config::SmtpSettings;
use crate::models::candidate::Candidate;
use crate::notify::templates::compose;
use crate::notify::Notifier;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("could not build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Sends notifications through an SMTP relay (STARTTLS/TLS handled by lettre).
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    pub fn new(settings: &SmtpSettings) -> Result<Self, NotifyError> {
        let from: Mailbox = settings.from.parse()?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?;
        if let Some(port) = settings.port {
            builder = builder.port(port);
        }
        if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    fn build_message(&self, candidate: &Candidate, threshold: f64) -> Result<Message, NotifyError> {
        let to: Mailbox = candidate.email.trim().parse()?;
        let content = compose(candidate, threshold);

        Ok(Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(content.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(content.body)?)
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    fn is_configured(&self) -> bool {
        true
    }

    async fn notify(&self, candidate: &Candidate, threshold: f64) -> bool {
        let result = match self.build_message(candidate, threshold) {
            Ok(message) => self.transport.send(message).await.map_err(NotifyError::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(_) => {
                info!("Notification sent to {}", candidate.email);
                true
            }
            Err(e) => {
                error!("Failed to send notification to {}: {e}", candidate.email);
                false
            }
        }
    }
}
