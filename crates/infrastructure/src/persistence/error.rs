//! Mapping of SQLite and pool errors onto the application error taxonomy

use application::error::ApplicationError;
use rusqlite::ffi;

/// Failing to obtain a pooled connection means storage is unreachable
pub(crate) fn map_pool_error(e: r2d2::Error) -> ApplicationError {
    ApplicationError::Connection(format!("database unavailable: {e}"))
}

/// Map a SQLite error; uniqueness violations become [`ApplicationError::Conflict`]
pub(crate) fn map_sqlite_error(e: rusqlite::Error) -> ApplicationError {
    if is_unique_violation(&e) {
        return ApplicationError::Conflict(e.to_string());
    }
    match &e {
        rusqlite::Error::SqliteFailure(err, _)
            if matches!(
                err.code,
                rusqlite::ErrorCode::CannotOpen | rusqlite::ErrorCode::NotADatabase
            ) =>
        {
            ApplicationError::Connection(e.to_string())
        },
        _ => ApplicationError::Storage(e.to_string()),
    }
}

/// A blocking task that panicked or was cancelled
pub(crate) fn map_join_error(e: tokio::task::JoinError) -> ApplicationError {
    ApplicationError::Internal(format!("database task failed: {e}"))
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
                || err.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}
