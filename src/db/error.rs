//! Failure taxonomy for the persistence layer.
//!
//! The UI only needs to tell two tiers apart: a locked database is a
//! transient condition worth retrying, everything else is a real error.
//! Classification happens in exactly one place, the `From` impl below,
//! so callers never inspect SQLite result codes themselves.

use std::io;

use rusqlite::ErrorCode;
use thiserror::Error;

/// Result alias used across the persistence layer.
pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Errors that can come out of the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another connection holds a conflicting lock. Transient: the same
    /// operation is expected to succeed on a later attempt.
    #[error("Database is locked. Please try again later.")]
    Locked,

    /// Any other database failure, shown with the underlying message
    /// (constraint violations, missing tables, malformed input).
    #[error("{0}")]
    Sql(rusqlite::Error),

    /// Schema creation failed for one specific table during startup.
    #[error("failed to create table {table}: {source}")]
    Schema {
        table: &'static str,
        source: rusqlite::Error,
    },

    /// The database directory could not be prepared.
    #[error("failed to prepare the data directory: {0}")]
    Io(#[from] io::Error),

    /// No home directory to anchor the default database path to.
    #[error("could not locate a home directory for the database file")]
    NoHomeDir,
}

impl StoreError {
    /// True for conditions that clear up on their own, where the right
    /// user response is to retry rather than to change the input.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Locked)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(ErrorCode::DatabaseBusy) | Some(ErrorCode::DatabaseLocked) => StoreError::Locked,
            _ => StoreError::Sql(err),
        }
    }
}
