//! Email alert delivery.
//!
//! Submits the sighting notification over authenticated SMTP. Retry is
//! deliberately narrow: only a dropped connection is retried (3 attempts
//! total, 5 s apart); a failure the server actually answered with an SMTP
//! status code aborts immediately. The scheduler never sees an error from
//! this module, outcomes surface only as log output.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tokio::time;

use crate::config::SmtpConfig;
use crate::sighting::types::NotificationMessage;

const MAX_ATTEMPTS: u32 = 3;
const RETRY_PAUSE: Duration = Duration::from_secs(5);

/// Errors from the mail transport.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The session died before the server issued an SMTP status code.
    #[error("SMTP connection dropped: {0}")]
    Disconnected(String),

    /// The server answered with a failure status. Not retried.
    #[error("SMTP failure: {0}")]
    Transport(String),

    /// The message itself could not be assembled.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}

/// Seam between the retry policy and the actual SMTP submission, so tests
/// can script failures and count attempts.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn submit(&self, subject: &str, body: &str) -> Result<(), NotifyError>;
}

#[async_trait]
impl<T: MailTransport + ?Sized> MailTransport for std::sync::Arc<T> {
    async fn submit(&self, subject: &str, body: &str) -> Result<(), NotifyError> {
        (**self).submit(subject, body).await
    }
}

/// Production transport: lettre over TLS with static credentials and a
/// fixed recipient.
pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailTransport {
    pub fn new(config: &SmtpConfig) -> Result<Self, NotifyError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.server)
            .map_err(|err| NotifyError::Transport(err.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        let from = config
            .username
            .parse::<Mailbox>()
            .map_err(|err| NotifyError::InvalidMessage(format!("sender address: {}", err)))?;
        let to = config
            .recipient
            .parse::<Mailbox>()
            .map_err(|err| NotifyError::InvalidMessage(format!("recipient address: {}", err)))?;

        Ok(Self { transport, from, to })
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn submit(&self, subject: &str, body: &str) -> Result<(), NotifyError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .body(body.to_string())
            .map_err(|err| NotifyError::InvalidMessage(err.to_string()))?;

        match self.transport.send(message).await {
            Ok(_) => Ok(()),
            // No status code means the connection died mid-session;
            // anything the server answered is a protocol-level rejection.
            Err(err) if err.status().is_none() => {
                Err(NotifyError::Disconnected(err.to_string()))
            }
            Err(err) => Err(NotifyError::Transport(err.to_string())),
        }
    }
}

/// Notifier with the fixed retry policy on top of a [`MailTransport`].
pub struct EmailNotifier<T: MailTransport> {
    transport: T,
}

impl<T: MailTransport> EmailNotifier<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Send a notification. Logs the outcome either way; errors never
    /// reach the caller.
    pub async fn notify(&self, message: &NotificationMessage) {
        match self.try_send(message).await {
            Ok(()) => {
                tracing::info!("Notification email sent: {}", message.subject);
            }
            Err(err) => {
                tracing::error!(
                    "Giving up on notification '{}': {}",
                    message.subject,
                    err
                );
            }
        }
    }

    async fn try_send(&self, message: &NotificationMessage) -> Result<(), NotifyError> {
        let mut last_cause = String::new();

        for attempt in 1..=MAX_ATTEMPTS {
            match self.transport.submit(&message.subject, &message.body).await {
                Ok(()) => return Ok(()),
                Err(NotifyError::Disconnected(cause)) => {
                    tracing::warn!(
                        "SMTP connection dropped on attempt {}/{}: {}",
                        attempt,
                        MAX_ATTEMPTS,
                        cause
                    );
                    last_cause = cause;
                    if attempt < MAX_ATTEMPTS {
                        time::sleep(RETRY_PAUSE).await;
                    }
                }
                Err(err) => return Err(err),
            }
        }

        Err(NotifyError::Disconnected(last_cause))
    }
}
