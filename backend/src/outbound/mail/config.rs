//! Mailer configuration loaded via OrthoConfig and validated once at
//! start-up.

use std::fmt;

use lettre::message::Mailbox;
use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Submission port used when `EMAIL_PORT` is unset.
pub const DEFAULT_SUBMISSION_PORT: u16 = 587;

/// Raw mailer settings (`EMAIL_*` environment variables or config file).
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EMAIL")]
pub struct MailerSettings {
    /// Sender mailbox, e.g. `Tracker <tracker@example.com>`.
    pub default_sender: Option<String>,
    /// Relay host name.
    pub host: Option<String>,
    /// Relay account name.
    pub username: Option<String>,
    /// Relay account password.
    pub password: Option<String>,
    /// Relay submission port.
    pub port: Option<u16>,
}

impl fmt::Debug for MailerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailerSettings")
            .field("default_sender", &self.default_sender)
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("port", &self.port)
            .finish()
    }
}

/// Reasons a [`MailerSettings`] value cannot become a [`MailerConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailerConfigError {
    #[error("{name} must be set")]
    Missing { name: &'static str },
    #[error("EMAIL_DEFAULT_SENDER is not a valid mailbox: {message}")]
    InvalidSender { message: String },
}

/// Validated relay configuration handed to the SMTP transport.
#[derive(Clone)]
pub struct MailerConfig {
    sender: Mailbox,
    host: String,
    port: u16,
    username: String,
    password: String,
}

fn required(value: Option<String>, name: &'static str) -> Result<String, MailerConfigError> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
        .ok_or(MailerConfigError::Missing { name })
}

impl TryFrom<MailerSettings> for MailerConfig {
    type Error = MailerConfigError;

    fn try_from(settings: MailerSettings) -> Result<Self, Self::Error> {
        let sender = required(settings.default_sender, "EMAIL_DEFAULT_SENDER")?
            .parse::<Mailbox>()
            .map_err(|err| MailerConfigError::InvalidSender {
                message: err.to_string(),
            })?;
        let host = required(settings.host, "EMAIL_HOST")?;
        let username = required(settings.username, "EMAIL_USERNAME")?;
        // Passwords may legitimately carry surrounding spaces; only reject
        // an absent or empty value.
        let password = settings
            .password
            .filter(|raw| !raw.is_empty())
            .ok_or(MailerConfigError::Missing {
                name: "EMAIL_PASSWORD",
            })?;

        Ok(Self {
            sender,
            host,
            port: settings.port.unwrap_or(DEFAULT_SUBMISSION_PORT),
            username,
            password,
        })
    }
}

impl MailerConfig {
    #[must_use]
    pub const fn sender(&self) -> &Mailbox {
        &self.sender
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for MailerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailerConfig")
            .field("sender", &self.sender.to_string())
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
