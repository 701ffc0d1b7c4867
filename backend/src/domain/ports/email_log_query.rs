//! Driving port for reading email log records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{EmailLog, Error};

/// Request for the record behind a tracking identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetEmailLogRequest {
    /// Raw identifier from the request path. Need not be a UUID.
    pub tracking_id: String,
}

/// Serializable view of an email log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailLogPayload {
    pub email: String,
    pub sent_at: DateTime<Utc>,
    pub opened_at: Option<DateTime<Utc>>,
    pub ip: Option<String>,
}

impl From<EmailLog> for EmailLogPayload {
    fn from(value: EmailLog) -> Self {
        Self {
            email: value.recipient().to_string(),
            sent_at: value.sent_at(),
            opened_at: value.opened_at(),
            ip: value.ip().map(str::to_owned),
        }
    }
}

/// Driving port for the lookup operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailLogQuery: Send + Sync {
    /// Fetch the current state of a record. `Ok(None)` means no record
    /// matches, including identifiers that are not UUIDs.
    async fn get_email_log(
        &self,
        request: GetEmailLogRequest,
    ) -> Result<Option<EmailLogPayload>, Error>;
}

/// Fixture query that never finds a record.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEmailLogQuery;

#[async_trait]
impl EmailLogQuery for FixtureEmailLogQuery {
    async fn get_email_log(
        &self,
        _request: GetEmailLogRequest,
    ) -> Result<Option<EmailLogPayload>, Error> {
        Ok(None)
    }
}
