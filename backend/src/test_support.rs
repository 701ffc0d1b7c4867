//! In-memory doubles for integration tests.
//!
//! Compiled only with the `test-support` feature. The doubles honour the same
//! contracts as the production adapters: inserts are unique per tracking
//! identifier and only the first open of a record is stamped.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{
    EmailLogRepository, EmailLogRepositoryError, MailTransport, MailTransportError,
};
use crate::domain::{EmailLog, OpenEvent, TrackedEmail, TrackingId};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Email log store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryEmailLogRepository {
    logs: Mutex<HashMap<TrackingId, EmailLog>>,
}

impl InMemoryEmailLogRepository {
    /// Snapshot of the stored record, if any.
    pub fn get(&self, tracking_id: &TrackingId) -> Option<EmailLog> {
        lock(&self.logs).get(tracking_id).cloned()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        lock(&self.logs).len()
    }

    /// `true` when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        lock(&self.logs).is_empty()
    }
}

#[async_trait]
impl EmailLogRepository for InMemoryEmailLogRepository {
    async fn insert(&self, log: &EmailLog) -> Result<(), EmailLogRepositoryError> {
        let mut logs = lock(&self.logs);
        if logs.contains_key(&log.tracking_id()) {
            return Err(EmailLogRepositoryError::query(format!(
                "duplicate tracking id {}",
                log.tracking_id()
            )));
        }
        logs.insert(log.tracking_id(), log.clone());
        Ok(())
    }

    async fn find_by_tracking_id(
        &self,
        tracking_id: &TrackingId,
    ) -> Result<Option<EmailLog>, EmailLogRepositoryError> {
        Ok(self.get(tracking_id))
    }

    async fn record_open(
        &self,
        tracking_id: &TrackingId,
        open: &OpenEvent,
    ) -> Result<bool, EmailLogRepositoryError> {
        let mut logs = lock(&self.logs);
        let Some(log) = logs.get_mut(tracking_id) else {
            return Ok(false);
        };
        if log.is_opened() {
            return Ok(false);
        }
        *log = log.clone().with_open(open.clone());
        Ok(true)
    }
}

/// How [`RecordingMailTransport`] answers `send`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RelayBehaviour {
    #[default]
    Accept,
    Unreachable,
    Reject,
}

/// Transport that records accepted messages instead of delivering them.
#[derive(Debug, Default)]
pub struct RecordingMailTransport {
    behaviour: Mutex<RelayBehaviour>,
    sent: Mutex<Vec<TrackedEmail>>,
}

impl RecordingMailTransport {
    /// Change how subsequent sends are answered.
    pub fn set_behaviour(&self, behaviour: RelayBehaviour) {
        *lock(&self.behaviour) = behaviour;
    }

    /// Messages accepted so far, oldest first.
    pub fn sent(&self) -> Vec<TrackedEmail> {
        lock(&self.sent).clone()
    }
}

#[async_trait]
impl MailTransport for RecordingMailTransport {
    async fn send(&self, email: &TrackedEmail) -> Result<(), MailTransportError> {
        let behaviour = *lock(&self.behaviour);
        match behaviour {
            RelayBehaviour::Accept => {
                lock(&self.sent).push(email.clone());
                Ok(())
            }
            RelayBehaviour::Unreachable => {
                Err(MailTransportError::connection("relay refused the connection"))
            }
            RelayBehaviour::Reject => Err(MailTransportError::rejected("550 mailbox unavailable")),
        }
    }
}
