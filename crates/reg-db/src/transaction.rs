//! Gated transaction handle.

use std::ops::Deref;

use tokio::sync::MutexGuard;

use crate::error::DatabaseError;

/// An open transaction that holds the connection gate until it finishes.
///
/// Derefs to [`libsql::Connection`], so repo functions taking a connection
/// run inside it unchanged.
pub struct Tx<'a> {
    // Declared first so the transaction drops before the gate is released.
    inner: libsql::Transaction,
    _gate: MutexGuard<'a, ()>,
}

impl<'a> Tx<'a> {
    pub(crate) const fn new(inner: libsql::Transaction, gate: MutexGuard<'a, ()>) -> Self {
        Self { inner, _gate: gate }
    }

    /// Commit if `result` is `Ok`, roll back otherwise, and hand `result` back.
    ///
    /// A failed commit is returned in place of the value. A failed rollback
    /// is logged and the error in `result` wins.
    ///
    /// # Errors
    ///
    /// Returns the error in `result`, or the commit failure.
    pub async fn finish<T>(self, result: Result<T, DatabaseError>) -> Result<T, DatabaseError> {
        let Self { inner, _gate } = self;
        match result {
            Ok(value) => {
                inner
                    .commit()
                    .await
                    .map_err(|e| DatabaseError::from_write(e, || "commit rejected by a unique constraint".into()))?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = inner.rollback().await {
                    tracing::warn!(error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }
}

impl Deref for Tx<'_> {
    type Target = libsql::Connection;

    fn deref(&self) -> &libsql::Connection {
        &self.inner
    }
}
