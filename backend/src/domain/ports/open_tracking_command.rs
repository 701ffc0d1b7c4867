//! Driving port for recording pixel fetches.

use async_trait::async_trait;

use crate::domain::Error;

/// A pixel fetch as observed by the inbound adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOpenRequest {
    /// Raw identifier from the pixel path. Need not be a UUID.
    pub tracking_id: String,
    /// Requester address; empty when the connection did not expose one.
    pub ip: String,
}

/// What a pixel fetch did to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// This fetch was the first for a known identifier and was recorded.
    FirstOpen,
    /// Unknown identifier, or the email was already opened.
    Ignored,
}

/// Driving port for the track operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OpenTrackingCommand: Send + Sync {
    /// Record the first open for the identifier, if any.
    ///
    /// Unknown and already-opened identifiers are not errors; they yield
    /// [`OpenOutcome::Ignored`]. Only persistence failures return `Err`.
    async fn record_open(&self, request: RecordOpenRequest) -> Result<OpenOutcome, Error>;
}

/// Fixture command that ignores every fetch.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOpenTrackingCommand;

#[async_trait]
impl OpenTrackingCommand for FixtureOpenTrackingCommand {
    async fn record_open(&self, _request: RecordOpenRequest) -> Result<OpenOutcome, Error> {
        Ok(OpenOutcome::Ignored)
    }
}
