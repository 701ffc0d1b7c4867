//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`EmailLogRepository`], [`MailTransport`]) are implemented by
//! outbound adapters. Driving ports ([`TrackedEmailCommand`],
//! [`OpenTrackingCommand`], [`EmailLogQuery`]) are implemented by domain
//! services and called from inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod email_log_query;
mod email_log_repository;
mod mail_transport;
mod open_tracking_command;
mod tracked_email_command;

#[cfg(test)]
pub use email_log_query::MockEmailLogQuery;
pub use email_log_query::{
    EmailLogPayload, EmailLogQuery, FixtureEmailLogQuery, GetEmailLogRequest,
};
#[cfg(test)]
pub use email_log_repository::MockEmailLogRepository;
pub use email_log_repository::{
    EmailLogRepository, EmailLogRepositoryError, FixtureEmailLogRepository,
};
#[cfg(test)]
pub use mail_transport::MockMailTransport;
pub use mail_transport::{FixtureMailTransport, MailTransport, MailTransportError};
#[cfg(test)]
pub use open_tracking_command::MockOpenTrackingCommand;
pub use open_tracking_command::{
    FixtureOpenTrackingCommand, OpenOutcome, OpenTrackingCommand, RecordOpenRequest,
};
#[cfg(test)]
pub use tracked_email_command::MockTrackedEmailCommand;
pub use tracked_email_command::{
    FixtureTrackedEmailCommand, SendTrackedEmailRequest, SendTrackedEmailResponse,
    TrackedEmailCommand,
};
