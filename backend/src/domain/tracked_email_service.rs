//! Send service: validates the recipient, delivers the tracked email and
//! records it.
//!
//! The log record is written only after the relay accepts the message, so a
//! failed delivery never leaves a record behind.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{error, info};

use crate::domain::email_log_service::map_repository_error;
use crate::domain::ports::{
    EmailLogRepository, MailTransport, MailTransportError, SendTrackedEmailRequest,
    SendTrackedEmailResponse, TrackedEmailCommand,
};
use crate::domain::{EmailAddress, EmailLog, Error, TrackedEmail, TrackingId};

fn map_transport_error(error: MailTransportError) -> Error {
    let reason = match &error {
        MailTransportError::Connection { .. } => "relay_unreachable",
        MailTransportError::Rejected { .. } => "relay_rejected",
    };
    Error::delivery_failed("email could not be delivered").with_details(json!({
        "reason": reason,
    }))
}

/// Service implementing [`TrackedEmailCommand`].
#[derive(Clone)]
pub struct TrackedEmailService<R, M> {
    email_log_repo: Arc<R>,
    transport: Arc<M>,
    clock: Arc<dyn Clock>,
}

impl<R, M> TrackedEmailService<R, M> {
    /// Create the service from its repository, transport and clock.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use open_tracker::domain::TrackedEmailService;
    /// # use open_tracker::domain::ports::{FixtureEmailLogRepository, FixtureMailTransport};
    /// let service = TrackedEmailService::new(
    ///     Arc::new(FixtureEmailLogRepository),
    ///     Arc::new(FixtureMailTransport),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(email_log_repo: Arc<R>, transport: Arc<M>, clock: Arc<dyn Clock>) -> Self {
        Self {
            email_log_repo,
            transport,
            clock,
        }
    }
}

#[async_trait]
impl<R, M> TrackedEmailCommand for TrackedEmailService<R, M>
where
    R: EmailLogRepository,
    M: MailTransport,
{
    async fn send_tracked_email(
        &self,
        request: SendTrackedEmailRequest,
    ) -> Result<SendTrackedEmailResponse, Error> {
        let recipient = EmailAddress::new(request.recipient).map_err(|err| {
            Error::invalid_request(format!("invalid recipient: {err}"))
                .with_details(json!({ "field": "email" }))
        })?;

        let tracking_id = TrackingId::generate();
        let email = TrackedEmail::compose(tracking_id, recipient, &request.origin);

        if let Err(err) = self.transport.send(&email).await {
            error!(
                %tracking_id,
                recipient = %email.recipient(),
                error = %err,
                "tracked email delivery failed"
            );
            return Err(map_transport_error(err));
        }

        let log = EmailLog::new(tracking_id, email.recipient().clone(), self.clock.utc());
        self.email_log_repo.insert(&log).await.map_err(|err| {
            error!(
                %tracking_id,
                error = %err,
                "tracked email delivered but its log record was not written"
            );
            map_repository_error(err)
        })?;

        info!(%tracking_id, recipient = %log.recipient(), "tracked email sent");
        Ok(SendTrackedEmailResponse { tracking_id })
    }
}

#[cfg(test)]
#[path = "tracked_email_service_tests.rs"]
mod tests;
