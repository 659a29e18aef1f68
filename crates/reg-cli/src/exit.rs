//! Process exit codes derived from the domain error kind.

use reg_core::errors::{CoreError, ErrorKind};
use reg_db::error::DatabaseError;

pub const NOT_FOUND: i32 = 2;
pub const CONFLICT: i32 = 3;
pub const INVALID_ARGUMENT: i32 = 4;
pub const FAILURE: i32 = 1;

/// Find the first domain error kind anywhere in the cause chain.
fn error_kind(error: &anyhow::Error) -> Option<ErrorKind> {
    error.chain().find_map(|cause| {
        cause
            .downcast_ref::<DatabaseError>()
            .and_then(DatabaseError::kind)
            .or_else(|| cause.downcast_ref::<CoreError>().and_then(CoreError::kind))
    })
}

/// Exit code for a failed command.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    match error_kind(error) {
        Some(ErrorKind::NotFound) => NOT_FOUND,
        Some(ErrorKind::Conflict) => CONFLICT,
        Some(ErrorKind::InvalidArgument) => INVALID_ARGUMENT,
        None => FAILURE,
    }
}
