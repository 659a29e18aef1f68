//! Domain error taxonomy for Registrar.
//!
//! Every rejected operation is one of three kinds: a referenced entity is
//! missing, the request collides with existing state, or the request itself
//! is malformed. Storage failures are defined in `reg-db` and wrap these.
//! Callers translate the kind into a transport-level response (exit code,
//! HTTP status, ...).

use thiserror::Error;

use crate::enums::EntityType;

/// Classification of a domain error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    InvalidArgument,
}

/// Errors raised by the registrar core and service layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Referenced course, student, enrollment, or edge does not exist.
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: EntityType, id: String },

    /// Duplicate edge, duplicate active enrollment, full course, or a
    /// unique-constraint collision.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Self-referencing prerequisite, cycle-inducing edge, or a field out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    pub fn not_found(entity_type: EntityType, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Domain kind, or `None` for the catch-all.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::NotFound { .. } => Some(ErrorKind::NotFound),
            Self::Conflict(_) => Some(ErrorKind::Conflict),
            Self::InvalidArgument(_) => Some(ErrorKind::InvalidArgument),
            Self::Other(_) => None,
        }
    }
}
