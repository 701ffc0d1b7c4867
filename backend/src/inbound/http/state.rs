//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and depend only on
//! driving ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    EmailLogQuery, FixtureEmailLogQuery, FixtureOpenTrackingCommand,
    FixtureTrackedEmailCommand, OpenTrackingCommand, TrackedEmailCommand,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub tracked_email: Arc<dyn TrackedEmailCommand>,
    pub open_tracking: Arc<dyn OpenTrackingCommand>,
    pub email_logs: Arc<dyn EmailLogQuery>,
}

impl HttpState {
    /// Construct state from the three driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use open_tracker::domain::ports::{
    ///     FixtureEmailLogQuery, FixtureOpenTrackingCommand, FixtureTrackedEmailCommand,
    /// };
    /// use open_tracker::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureTrackedEmailCommand),
    ///     Arc::new(FixtureOpenTrackingCommand),
    ///     Arc::new(FixtureEmailLogQuery),
    /// );
    /// let _ports = state.email_logs.clone();
    /// ```
    pub fn new(
        tracked_email: Arc<dyn TrackedEmailCommand>,
        open_tracking: Arc<dyn OpenTrackingCommand>,
        email_logs: Arc<dyn EmailLogQuery>,
    ) -> Self {
        Self {
            tracked_email,
            open_tracking,
            email_logs,
        }
    }
}

impl Default for HttpState {
    /// Fixture-backed state: sends are validated but go nowhere, fetches are
    /// ignored and lookups find nothing.
    fn default() -> Self {
        Self::new(
            Arc::new(FixtureTrackedEmailCommand),
            Arc::new(FixtureOpenTrackingCommand),
            Arc::new(FixtureEmailLogQuery),
        )
    }
}
