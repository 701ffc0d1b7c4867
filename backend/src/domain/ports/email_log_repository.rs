//! Port for email log persistence.

use async_trait::async_trait;

use crate::domain::{EmailLog, OpenEvent, TrackingId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by email log repository adapters.
    pub enum EmailLogRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "email log repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "email log repository query failed: {message}",
    }
}

/// Port for creating, stamping and reading email log records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailLogRepository: Send + Sync {
    /// Persist a freshly sent email. The tracking identifier must be new.
    async fn insert(&self, log: &EmailLog) -> Result<(), EmailLogRepositoryError>;

    /// Find the record for `tracking_id`.
    async fn find_by_tracking_id(
        &self,
        tracking_id: &TrackingId,
    ) -> Result<Option<EmailLog>, EmailLogRepositoryError>;

    /// Stamp the first open onto the record.
    ///
    /// Implementations must apply the stamp atomically and only when the
    /// record exists and has not been opened yet. Returns `true` when this
    /// call recorded the open and `false` when nothing changed.
    async fn record_open(
        &self,
        tracking_id: &TrackingId,
        open: &OpenEvent,
    ) -> Result<bool, EmailLogRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
///
/// Accepts every insert and never finds a record.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEmailLogRepository;

#[async_trait]
impl EmailLogRepository for FixtureEmailLogRepository {
    async fn insert(&self, _log: &EmailLog) -> Result<(), EmailLogRepositoryError> {
        Ok(())
    }

    async fn find_by_tracking_id(
        &self,
        _tracking_id: &TrackingId,
    ) -> Result<Option<EmailLog>, EmailLogRepositoryError> {
        Ok(None)
    }

    async fn record_open(
        &self,
        _tracking_id: &TrackingId,
        _open: &OpenEvent,
    ) -> Result<bool, EmailLogRepositoryError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::EmailAddress;

    #[rstest]
    #[tokio::test]
    async fn fixture_accepts_inserts_but_finds_nothing() {
        let repo = FixtureEmailLogRepository;
        let id = TrackingId::generate();
        let log = EmailLog::new(
            id,
            EmailAddress::new("a@example.com").expect("valid address"),
            Utc::now(),
        );

        repo.insert(&log).await.expect("fixture insert succeeds");
        let found = repo
            .find_by_tracking_id(&id)
            .await
            .expect("fixture lookup succeeds");

        assert!(found.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_never_records_opens() {
        let open = OpenEvent {
            opened_at: Utc::now(),
            ip: "1.2.3.4".to_owned(),
        };
        let recorded = FixtureEmailLogRepository
            .record_open(&TrackingId::generate(), &open)
            .await
            .expect("fixture stamp succeeds");
        assert!(!recorded);
    }

    #[rstest]
    #[case(EmailLogRepositoryError::connection("refused"), "connection failed: refused")]
    #[case(EmailLogRepositoryError::query("syntax"), "query failed: syntax")]
    fn errors_format_with_context(#[case] err: EmailLogRepositoryError, #[case] expected: &str) {
        assert!(err.to_string().contains(expected));
    }
}
