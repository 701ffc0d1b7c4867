//! PostgreSQL-backed `EmailLogRepository` implementation using Diesel ORM.
//!
//! First-open stamping is a single conditional `UPDATE ... WHERE opened_at IS
//! NULL`, so concurrent pixel fetches cannot both win.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{EmailLogRepository, EmailLogRepositoryError};
use crate::domain::{EmailAddress, EmailLog, OpenEvent, TrackingId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{EmailLogOpenUpdate, EmailLogRow, NewEmailLogRow};
use super::pool::{DbPool, PoolError};
use super::schema::email_logs;

/// Diesel-backed implementation of the email log repository port.
#[derive(Clone)]
pub struct DieselEmailLogRepository {
    pool: DbPool,
}

impl DieselEmailLogRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EmailLogRepositoryError {
    map_basic_pool_error(error, EmailLogRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> EmailLogRepositoryError {
    map_basic_diesel_error(
        error,
        EmailLogRepositoryError::query,
        EmailLogRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain record.
fn row_to_email_log(row: EmailLogRow) -> Result<EmailLog, EmailLogRepositoryError> {
    let EmailLogRow {
        tracking_id,
        email,
        sent_at,
        opened_at,
        ip,
    } = row;

    let recipient = EmailAddress::new(email)
        .map_err(|err| EmailLogRepositoryError::query(format!("stored email invalid: {err}")))?;
    let log = EmailLog::new(TrackingId::from_uuid(tracking_id), recipient, sent_at);

    match (opened_at, ip) {
        (None, None) => Ok(log),
        (Some(opened_at), Some(ip)) => Ok(log.with_open(OpenEvent { opened_at, ip })),
        _ => Err(EmailLogRepositoryError::query(
            "stored open fields are inconsistent",
        )),
    }
}

#[async_trait]
impl EmailLogRepository for DieselEmailLogRepository {
    async fn insert(&self, log: &EmailLog) -> Result<(), EmailLogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewEmailLogRow {
            tracking_id: *log.tracking_id().as_uuid(),
            email: log.recipient().as_ref(),
            sent_at: log.sent_at(),
        };

        diesel::insert_into(email_logs::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_tracking_id(
        &self,
        tracking_id: &TrackingId,
    ) -> Result<Option<EmailLog>, EmailLogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = email_logs::table
            .filter(email_logs::tracking_id.eq(tracking_id.as_uuid()))
            .select(EmailLogRow::as_select())
            .first::<EmailLogRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_email_log).transpose()
    }

    async fn record_open(
        &self,
        tracking_id: &TrackingId,
        open: &OpenEvent,
    ) -> Result<bool, EmailLogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = EmailLogOpenUpdate {
            opened_at: open.opened_at,
            ip: open.ip.as_str(),
        };

        let updated = diesel::update(
            email_logs::table
                .filter(email_logs::tracking_id.eq(tracking_id.as_uuid()))
                .filter(email_logs::opened_at.is_null()),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }
}
