//! Outbound mail adapters.

mod config;
mod smtp_mail_transport;

pub use config::{DEFAULT_SUBMISSION_PORT, MailerConfig, MailerConfigError, MailerSettings};
pub use smtp_mail_transport::SmtpMailTransport;
