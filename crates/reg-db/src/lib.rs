//! # reg-db
//!
//! libSQL persistence for Registrar.
//!
//! Holds departments, courses, students, prerequisite edges, and enrollments
//! in a local libSQL database. Every service operation runs inside one
//! transaction on a single shared connection: writes use `BEGIN IMMEDIATE`,
//! reads a deferred transaction. An in-process gate serializes transactions
//! so concurrent callers never interleave statements on the connection.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
mod transaction;
pub mod updates;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::{Builder, TransactionBehavior};
use tokio::sync::Mutex;

pub use transaction::Tx;

/// Central database handle for all Registrar state.
///
/// Wraps a libSQL database and its one connection.
pub struct RegDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    gate: Mutex<()>,
}

impl RegDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let reg_db = Self {
            db,
            conn,
            gate: Mutex::new(()),
        };
        reg_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(reg_db)
    }

    /// Access the underlying libSQL connection outside any transaction.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"crs-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        helpers::generate_id(&self.conn, prefix).await
    }

    /// Start a `BEGIN IMMEDIATE` transaction, waiting for the gate first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the transaction cannot be started.
    pub async fn begin_write(&self) -> Result<Tx<'_>, DatabaseError> {
        self.begin(TransactionBehavior::Immediate).await
    }

    /// Start a deferred transaction for a consistent read snapshot.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the transaction cannot be started.
    pub async fn begin_read(&self) -> Result<Tx<'_>, DatabaseError> {
        self.begin(TransactionBehavior::Deferred).await
    }

    async fn begin(&self, behavior: TransactionBehavior) -> Result<Tx<'_>, DatabaseError> {
        let gate = self.gate.lock().await;
        let inner = self.conn.transaction_with_behavior(behavior).await?;
        Ok(Tx::new(inner, gate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn test_db() -> RegDb {
        RegDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "departments",
            "courses",
            "students",
            "course_prerequisites",
            "enrollments",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let db = test_db().await;
        let mut rows = db.conn().query("PRAGMA foreign_keys", ()).await.unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 1);

        let result = db
            .conn()
            .execute(
                "INSERT INTO courses (id, code, name, credits, department_id, max_students, semester)
                 VALUES ('crs-1', 'CS101', 'Intro', 3, 'dpt-missing', 30, 'Fall 2026')",
                (),
            )
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn generate_id_has_prefix_and_is_unique() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..50 {
            let id = db.generate_id("enr").await.unwrap();
            assert!(id.starts_with("enr-"));
            assert_eq!(id.len(), 12);
            ids.insert(id);
        }
        assert_eq!(ids.len(), 50);
    }

    #[tokio::test]
    async fn rolled_back_write_leaves_no_trace() {
        let db = test_db().await;

        let tx = db.begin_write().await.unwrap();
        tx.execute(
            "INSERT INTO departments (id, code, name) VALUES ('dpt-1', 'CS', 'Computer Science')",
            (),
        )
        .await
        .unwrap();
        let result: Result<(), DatabaseError> = Err(DatabaseError::NoResult);
        assert!(tx.finish(result).await.is_err());

        let mut rows = db
            .conn()
            .query("SELECT COUNT(*) FROM departments", ())
            .await
            .unwrap();
        let count = rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap();
        assert_eq!(count, 0);
    }
}
