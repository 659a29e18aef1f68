//! Service layer running every registrar operation as one transaction.
//!
//! `RegistrarService` wraps `RegDb` (raw database access) and the enrollment
//! defaults. All operations are implemented as `impl RegistrarService` blocks
//! in the `repos` modules.

use reg_config::EnrollmentConfig;

use crate::RegDb;
use crate::error::DatabaseError;

/// Entry point for request handlers.
///
/// Every mutation follows this protocol:
/// 1. Begin an immediate transaction (waits for the connection gate)
/// 2. Re-read the rows the decision depends on
/// 3. Validate, then execute SQL
/// 4. Commit on success, roll back on any error
pub struct RegistrarService {
    db: RegDb,
    enrollment: EnrollmentConfig,
}

impl RegistrarService {
    /// Open a local database and wrap it.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `enrollment` - Defaults applied to new courses.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(
        db_path: &str,
        enrollment: EnrollmentConfig,
    ) -> Result<Self, DatabaseError> {
        let db = RegDb::open_local(db_path).await?;
        Ok(Self::from_db(db, enrollment))
    }

    /// Create from an existing `RegDb`.
    #[must_use]
    pub const fn from_db(db: RegDb, enrollment: EnrollmentConfig) -> Self {
        Self { db, enrollment }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &RegDb {
        &self.db
    }

    #[must_use]
    pub const fn enrollment_config(&self) -> EnrollmentConfig {
        self.enrollment
    }
}
