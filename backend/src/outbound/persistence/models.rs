//! Internal Diesel row structs for the `email_logs` table.
//!
//! These types never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::email_logs;

/// Row struct for reading from the email_logs table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = email_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EmailLogRow {
    pub tracking_id: Uuid,
    pub email: String,
    pub sent_at: DateTime<Utc>,
    pub opened_at: Option<DateTime<Utc>>,
    pub ip: Option<String>,
}

/// Insertable struct for freshly sent emails. Open fields start null.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = email_logs)]
pub(crate) struct NewEmailLogRow<'a> {
    pub tracking_id: Uuid,
    pub email: &'a str,
    pub sent_at: DateTime<Utc>,
}

/// Changeset stamping the first open.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = email_logs)]
pub(crate) struct EmailLogOpenUpdate<'a> {
    pub opened_at: DateTime<Utc>,
    pub ip: &'a str,
}
