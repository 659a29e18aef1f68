//! Database error types for reg-db.

use reg_core::errors::{CoreError, ErrorKind};
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned data that could not be parsed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// A domain rule rejected the operation (not found, conflict, invalid argument).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Domain kind of this error, `None` for storage failures.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Core(e) => e.kind(),
            _ => None,
        }
    }

    /// Translate a failed write, turning unique-constraint violations into
    /// `Conflict` with the given description.
    pub(crate) fn from_write(error: libsql::Error, conflict: impl FnOnce() -> String) -> Self {
        if is_unique_violation(&error) {
            return Self::Core(CoreError::Conflict(conflict()));
        }
        Self::LibSql(error)
    }
}

/// Detect `SQLite` unique and primary-key constraint failures.
pub(crate) fn is_unique_violation(error: &libsql::Error) -> bool {
    let msg = error.to_string();
    msg.contains("UNIQUE constraint failed") || msg.contains("PRIMARY KEY constraint failed")
}
