//! Diesel and pool error mapping shared by repositories.

use tracing::debug;

use super::pool::PoolError;

/// Collapse a pool error into a repository connection error.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map a Diesel error onto query/connection constructors.
///
/// Driver detail is logged at `debug` and replaced by a fixed message so it
/// never reaches API clients.
pub fn map_basic_diesel_error<E, Q, C>(error: diesel::result::Error, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            query("duplicate tracking identifier")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            query("email log constraint violated")
        }
        DieselError::NotFound => query("record not found"),
        _ => query("database error"),
    }
}
