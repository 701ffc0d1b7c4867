//! Open tracking and lookup services over the email log repository.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    EmailLogPayload, EmailLogQuery, EmailLogRepository, EmailLogRepositoryError,
    GetEmailLogRequest, OpenOutcome, OpenTrackingCommand, RecordOpenRequest,
};
use crate::domain::{Error, OpenEvent, TrackingId};

pub(crate) fn map_repository_error(error: EmailLogRepositoryError) -> Error {
    match error {
        EmailLogRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("email log repository unavailable: {message}"))
        }
        EmailLogRepositoryError::Query { message } => {
            Error::internal(format!("email log repository error: {message}"))
        }
    }
}

/// Service implementing [`OpenTrackingCommand`].
#[derive(Clone)]
pub struct OpenTrackingService<R> {
    email_log_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> OpenTrackingService<R> {
    pub fn new(email_log_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            email_log_repo,
            clock,
        }
    }
}

#[async_trait]
impl<R> OpenTrackingCommand for OpenTrackingService<R>
where
    R: EmailLogRepository,
{
    async fn record_open(&self, request: RecordOpenRequest) -> Result<OpenOutcome, Error> {
        let Ok(tracking_id) = request.tracking_id.parse::<TrackingId>() else {
            debug!(tracking_id = %request.tracking_id, "pixel fetched for malformed identifier");
            return Ok(OpenOutcome::Ignored);
        };

        let open = OpenEvent {
            opened_at: self.clock.utc(),
            ip: request.ip,
        };
        let recorded = self
            .email_log_repo
            .record_open(&tracking_id, &open)
            .await
            .map_err(map_repository_error)?;

        if recorded {
            info!(%tracking_id, ip = %open.ip, "first open recorded");
            Ok(OpenOutcome::FirstOpen)
        } else {
            debug!(%tracking_id, ip = %open.ip, "pixel fetch ignored: unknown or already opened");
            Ok(OpenOutcome::Ignored)
        }
    }
}

/// Service implementing [`EmailLogQuery`].
#[derive(Clone)]
pub struct EmailLogQueryService<R> {
    email_log_repo: Arc<R>,
}

impl<R> EmailLogQueryService<R> {
    pub fn new(email_log_repo: Arc<R>) -> Self {
        Self { email_log_repo }
    }
}

#[async_trait]
impl<R> EmailLogQuery for EmailLogQueryService<R>
where
    R: EmailLogRepository,
{
    async fn get_email_log(
        &self,
        request: GetEmailLogRequest,
    ) -> Result<Option<EmailLogPayload>, Error> {
        // Identifiers are always UUIDs, so anything else cannot match.
        let Ok(tracking_id) = request.tracking_id.parse::<TrackingId>() else {
            return Ok(None);
        };

        let log = self
            .email_log_repo
            .find_by_tracking_id(&tracking_id)
            .await
            .map_err(map_repository_error)?;

        Ok(log.map(EmailLogPayload::from))
    }
}

#[cfg(test)]
#[path = "email_log_service_tests.rs"]
mod tests;
