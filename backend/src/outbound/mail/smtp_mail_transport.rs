//! Lettre-backed SMTP adapter for the `MailTransport` port.
//!
//! Messages are submitted over STARTTLS with the configured credentials. One
//! attempt per send; relay failures are reported, never retried.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use super::config::MailerConfig;
use crate::domain::TrackedEmail;
use crate::domain::ports::{MailTransport, MailTransportError};

/// SMTP transport bound to one relay and sender.
#[derive(Clone)]
pub struct SmtpMailTransport {
    sender: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    /// Build the transport. No connection is opened until the first send.
    ///
    /// # Errors
    ///
    /// Returns [`MailTransportError::Connection`] when TLS parameters for the
    /// relay host cannot be prepared.
    pub fn new(config: &MailerConfig) -> Result<Self, MailTransportError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(config.host())
            .map_err(|err| MailTransportError::connection(err.to_string()))?
            .port(config.port())
            .credentials(Credentials::new(
                config.username().to_owned(),
                config.password().to_owned(),
            ))
            .build();

        Ok(Self {
            sender: config.sender().clone(),
            transport,
        })
    }
}

/// Turn a composed email into a multipart/alternative MIME message.
pub(crate) fn build_message(
    sender: &Mailbox,
    email: &TrackedEmail,
) -> Result<Message, MailTransportError> {
    let recipient = email
        .recipient()
        .as_ref()
        .parse::<Mailbox>()
        .map_err(|err| MailTransportError::rejected(format!("recipient address: {err}")))?;

    Message::builder()
        .from(sender.clone())
        .to(recipient)
        .subject(email.subject())
        .multipart(MultiPart::alternative_plain_html(
            email.text_body().to_owned(),
            email.html_body().to_owned(),
        ))
        .map_err(|err| MailTransportError::rejected(format!("message build: {err}")))
}

fn map_smtp_error(error: &lettre::transport::smtp::Error) -> MailTransportError {
    // A permanent or transient status means the relay answered and said no.
    if error.is_permanent() || error.is_transient() {
        MailTransportError::rejected(error.to_string())
    } else {
        MailTransportError::connection(error.to_string())
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, email: &TrackedEmail) -> Result<(), MailTransportError> {
        let message = build_message(&self.sender, email)?;
        let response = self
            .transport
            .send(message)
            .await
            .map_err(|err| map_smtp_error(&err))?;
        debug!(
            tracking_id = %email.tracking_id(),
            code = %response.code(),
            "relay accepted message"
        );
        Ok(())
    }
}
