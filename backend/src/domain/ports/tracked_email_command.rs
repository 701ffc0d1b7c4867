//! Driving port for sending tracked emails.
//!
//! Callers supply the raw recipient and the public origin the pixel should be
//! served from; the port validates, composes, delivers and records the email.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Error, PixelOrigin, TrackingId};

/// Request to send one tracked email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendTrackedEmailRequest {
    /// Unvalidated recipient address as received.
    pub recipient: String,
    /// Origin used to build the pixel URL.
    pub origin: PixelOrigin,
}

/// Response from a successful send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendTrackedEmailResponse {
    pub tracking_id: TrackingId,
}

/// Driving port for the send operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrackedEmailCommand: Send + Sync {
    /// Validate the recipient, deliver the email and persist its log record.
    ///
    /// Errors use [`crate::domain::ErrorCode::InvalidRequest`] for a bad
    /// recipient, [`crate::domain::ErrorCode::DeliveryFailed`] when the relay
    /// does not accept the message, and the persistence codes when the record
    /// cannot be written.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use open_tracker::domain::PixelOrigin;
    /// # use open_tracker::domain::ports::{
    /// #     FixtureTrackedEmailCommand, SendTrackedEmailRequest, TrackedEmailCommand,
    /// # };
    /// # async fn example() -> Result<(), open_tracker::domain::Error> {
    /// let command = FixtureTrackedEmailCommand;
    /// let response = command
    ///     .send_tracked_email(SendTrackedEmailRequest {
    ///         recipient: "a@example.com".to_owned(),
    ///         origin: PixelOrigin::new("http", "localhost:8080"),
    ///     })
    ///     .await?;
    /// println!("sent {}", response.tracking_id);
    /// # Ok(())
    /// # }
    /// ```
    async fn send_tracked_email(
        &self,
        request: SendTrackedEmailRequest,
    ) -> Result<SendTrackedEmailResponse, Error>;
}

/// Fixture command that validates the recipient and mints an identifier
/// without delivering or persisting anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTrackedEmailCommand;

#[async_trait]
impl TrackedEmailCommand for FixtureTrackedEmailCommand {
    async fn send_tracked_email(
        &self,
        request: SendTrackedEmailRequest,
    ) -> Result<SendTrackedEmailResponse, Error> {
        EmailAddress::new(request.recipient)
            .map_err(|err| Error::invalid_request(format!("invalid recipient: {err}")))?;
        Ok(SendTrackedEmailResponse {
            tracking_id: TrackingId::generate(),
        })
    }
}
