//! Row-to-entity parsing helpers.
//!
//! Every repo needs to convert `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic and handle the dual datetime
//! format issue (`SQLite`'s `datetime('now')` vs Rust's `to_rfc3339()`).

use chrono::{DateTime, Utc};
use reg_core::enums::EntityType;
use reg_core::errors::CoreError;

use crate::error::DatabaseError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all reg-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read an INTEGER column into a narrower unsigned type.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the stored value does not fit.
pub fn get_unsigned<T: TryFrom<i64>>(row: &libsql::Row, idx: i32) -> Result<T, DatabaseError> {
    let value = row.get::<i64>(idx)?;
    T::try_from(value)
        .map_err(|_| DatabaseError::Query(format!("column {idx} out of range: {value}")))
}

/// Generate a prefixed ID (`"<prefix>-<8 hex>"`) on the given connection.
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails or returns no rows.
pub async fn generate_id(conn: &libsql::Connection, prefix: &str) -> Result<String, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"), ())
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(row.get::<String>(0)?)
}

/// Map `EntityType` to the corresponding SQL table name.
///
/// Uses exhaustive match, so adding a new `EntityType` variant forces updating this.
#[must_use]
pub const fn entity_type_to_table(entity: EntityType) -> &'static str {
    match entity {
        EntityType::Department => "departments",
        EntityType::Course => "courses",
        EntityType::Student => "students",
        EntityType::Prerequisite => "course_prerequisites",
        EntityType::Enrollment => "enrollments",
    }
}

/// Build a `LIKE` pattern matching `term` anywhere in a column.
///
/// `%`, `_`, and `\` in `term` match literally; pair with `ESCAPE '\'`.
/// `SQLite`'s `LIKE` ignores ASCII case.
#[must_use]
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Fail with `NotFound` unless a row with `id` exists in the entity's table.
///
/// # Errors
///
/// Returns `DatabaseError::Core(NotFound)` for a missing row, or the query error.
pub async fn ensure_exists(
    conn: &libsql::Connection,
    entity: EntityType,
    id: &str,
) -> Result<(), DatabaseError> {
    let table = entity_type_to_table(entity);
    let mut rows = conn
        .query(&format!("SELECT 1 FROM {table} WHERE id = ?1"), [id])
        .await?;
    if rows.next().await?.is_none() {
        tracing::debug!(entity = %entity, id, "referenced entity missing");
        return Err(CoreError::not_found(entity, id).into());
    }
    Ok(())
}
