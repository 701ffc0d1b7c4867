//! Email log record: the persisted tracking state of one sent email.

use chrono::{DateTime, Utc};

use super::{EmailAddress, TrackingId};

/// First-open details captured from a pixel fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenEvent {
    /// When the pixel was first fetched.
    pub opened_at: DateTime<Utc>,
    /// Requester address as observed on the connection; empty when unknown.
    pub ip: String,
}

/// Tracking state of one sent email.
///
/// ## Invariants
/// - `tracking_id`, `recipient` and `sent_at` never change after creation.
/// - The open timestamp and IP are recorded together, at most once, via
///   [`EmailLog::with_open`].
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use open_tracker::domain::{EmailAddress, EmailLog, OpenEvent, TrackingId};
///
/// let recipient = EmailAddress::new("a@example.com").expect("valid address");
/// let log = EmailLog::new(TrackingId::generate(), recipient, Utc::now());
/// assert!(!log.is_opened());
///
/// let opened = log.with_open(OpenEvent { opened_at: Utc::now(), ip: "1.2.3.4".into() });
/// assert_eq!(opened.ip(), Some("1.2.3.4"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailLog {
    tracking_id: TrackingId,
    recipient: EmailAddress,
    sent_at: DateTime<Utc>,
    open: Option<OpenEvent>,
}

impl EmailLog {
    /// A freshly sent email with no open recorded.
    #[must_use]
    pub const fn new(tracking_id: TrackingId, recipient: EmailAddress, sent_at: DateTime<Utc>) -> Self {
        Self {
            tracking_id,
            recipient,
            sent_at,
            open: None,
        }
    }

    /// Attach the first-open details. An already-opened record is returned
    /// unchanged so the first open always wins.
    #[must_use]
    pub fn with_open(self, open: OpenEvent) -> Self {
        if self.open.is_some() {
            return self;
        }
        Self {
            open: Some(open),
            ..self
        }
    }

    /// Tracking identifier.
    #[must_use]
    pub const fn tracking_id(&self) -> TrackingId {
        self.tracking_id
    }

    /// Recipient address.
    #[must_use]
    pub const fn recipient(&self) -> &EmailAddress {
        &self.recipient
    }

    /// When the email was handed to the relay.
    #[must_use]
    pub const fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    /// When the pixel was first fetched.
    #[must_use]
    pub fn opened_at(&self) -> Option<DateTime<Utc>> {
        self.open.as_ref().map(|open| open.opened_at)
    }

    /// Requester IP of the first fetch.
    #[must_use]
    pub fn ip(&self) -> Option<&str> {
        self.open.as_ref().map(|open| open.ip.as_str())
    }

    /// Whether an open has been recorded.
    #[must_use]
    pub const fn is_opened(&self) -> bool {
        self.open.is_some()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn log() -> EmailLog {
        EmailLog::new(
            TrackingId::generate(),
            EmailAddress::new("a@example.com").expect("valid address"),
            Utc::now(),
        )
    }

    #[rstest]
    fn new_log_has_no_open(log: EmailLog) {
        assert!(log.opened_at().is_none());
        assert!(log.ip().is_none());
    }

    #[rstest]
    fn first_open_wins(log: EmailLog) {
        let first = OpenEvent {
            opened_at: log.sent_at() + Duration::minutes(5),
            ip: "1.2.3.4".to_owned(),
        };
        let second = OpenEvent {
            opened_at: log.sent_at() + Duration::minutes(9),
            ip: "9.9.9.9".to_owned(),
        };

        let opened = log.with_open(first.clone()).with_open(second);

        assert_eq!(opened.opened_at(), Some(first.opened_at));
        assert_eq!(opened.ip(), Some("1.2.3.4"));
    }
}
