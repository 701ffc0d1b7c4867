//! Port for handing tracked emails to an outbound mail relay.

use async_trait::async_trait;

use crate::domain::TrackedEmail;

use super::define_port_error;

define_port_error! {
    /// Errors raised by mail transport adapters.
    pub enum MailTransportError {
        /// The relay could not be reached or the session could not be
        /// established (DNS, TCP, TLS, authentication).
        Connection { message: String } =>
            "mail relay connection failed: {message}",
        /// The relay answered but refused the message, or the message could
        /// not be built.
        Rejected { message: String } =>
            "mail relay rejected message: {message}",
    }
}

/// Port for submitting one composed email. Implementations perform a single
/// attempt and never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Submit `email` to the relay.
    async fn send(&self, email: &TrackedEmail) -> Result<(), MailTransportError>;
}

/// Fixture transport that accepts every message and delivers nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMailTransport;

#[async_trait]
impl MailTransport for FixtureMailTransport {
    async fn send(&self, _email: &TrackedEmail) -> Result<(), MailTransportError> {
        Ok(())
    }
}
