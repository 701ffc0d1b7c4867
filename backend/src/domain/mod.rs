//! Domain primitives, services and ports.
//!
//! Purpose: model the tracked email lifecycle (send, first open, lookup)
//! independently of HTTP, SMTP and PostgreSQL. Adapters talk to the domain
//! only through the traits in [`ports`].
//!
//! Public surface:
//! - `EmailAddress`, `TrackingId`: validated identifiers.
//! - `EmailLog`, `OpenEvent`: the persisted record and its first-open stamp.
//! - `TrackedEmail`, `PixelOrigin`: outgoing message content.
//! - `TrackedEmailService`, `OpenTrackingService`, `EmailLogQueryService`:
//!   driving port implementations.
//! - `Error`, `ErrorCode`, `TraceId`: transport-agnostic failures and request
//!   correlation.

pub mod email_address;
pub mod email_log;
mod email_log_service;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod tracked_email;
mod tracked_email_service;
pub mod tracking_id;
pub mod tracking_pixel;

pub use self::email_address::{EmailAddress, EmailAddressValidationError};
pub use self::email_log::{EmailLog, OpenEvent};
pub use self::email_log_service::{EmailLogQueryService, OpenTrackingService};
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::tracked_email::{PixelOrigin, TrackedEmail};
pub use self::tracked_email_service::TrackedEmailService;
pub use self::tracking_id::{TrackingId, TrackingIdParseError};
pub use self::tracking_pixel::{TRACKING_PIXEL, TRACKING_PIXEL_CONTENT_TYPE};
