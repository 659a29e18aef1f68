//! Field validation for course and student input.
//!
//! Rejections are [`CoreError::InvalidArgument`]. Length bounds count
//! characters of the trimmed value.

use std::ops::RangeInclusive;
use std::sync::OnceLock;

use regex::Regex;

use crate::enums::Season;
use crate::errors::CoreError;

pub const MIN_CREDITS: u8 = 1;
pub const MAX_CREDITS: u8 = 6;
pub const MIN_CAPACITY: u32 = 1;
pub const MAX_CAPACITY: u32 = 500;

pub const COURSE_CODE_LEN: RangeInclusive<usize> = 3..=20;
pub const COURSE_NAME_LEN: RangeInclusive<usize> = 3..=200;
pub const DEPARTMENT_CODE_LEN: RangeInclusive<usize> = 2..=10;
pub const DEPARTMENT_NAME_LEN: RangeInclusive<usize> = 3..=100;
pub const STUDENT_NUMBER_LEN: RangeInclusive<usize> = 5..=20;
pub const STUDENT_NAME_LEN: RangeInclusive<usize> = 2..=100;
pub const MAX_EMAIL_LEN: usize = 254;

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
        )
        .expect("email regex must compile")
    })
}

/// Check a course capacity is within `1..=500`.
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` when out of range.
pub fn validate_capacity(max_students: u32) -> Result<(), CoreError> {
    if (MIN_CAPACITY..=MAX_CAPACITY).contains(&max_students) {
        Ok(())
    } else {
        Err(CoreError::InvalidArgument(format!(
            "max_students must be between {MIN_CAPACITY} and {MAX_CAPACITY}, got {max_students}"
        )))
    }
}

/// Check credit hours are within `1..=6`.
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` when out of range.
pub fn validate_credits(credits: u8) -> Result<(), CoreError> {
    if (MIN_CREDITS..=MAX_CREDITS).contains(&credits) {
        Ok(())
    } else {
        Err(CoreError::InvalidArgument(format!(
            "credits must be between {MIN_CREDITS} and {MAX_CREDITS}, got {credits}"
        )))
    }
}

/// Check a semester label has the form `"<Fall|Spring|Summer> <YYYY>"`.
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` for any other shape.
pub fn validate_semester(semester: &str) -> Result<Season, CoreError> {
    let invalid = || {
        CoreError::InvalidArgument(format!(
            "semester must look like 'Fall 2026', got '{semester}'"
        ))
    };
    let (season, year) = semester.split_once(' ').ok_or_else(invalid)?;
    let season = Season::from_label(season).ok_or_else(invalid)?;
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    Ok(season)
}

/// Check a required text field is not blank.
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` naming the field.
pub fn require_non_blank(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::InvalidArgument(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Check a required text field is non-blank and its length is within `bounds`.
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` naming the field.
pub fn validate_length(
    field: &str,
    value: &str,
    bounds: RangeInclusive<usize>,
) -> Result<(), CoreError> {
    require_non_blank(field, value)?;
    let len = value.trim().chars().count();
    if bounds.contains(&len) {
        Ok(())
    } else {
        Err(CoreError::InvalidArgument(format!(
            "{field} must be {} to {} characters, got {len}",
            bounds.start(),
            bounds.end()
        )))
    }
}

/// Check a department code is 2 to 10 uppercase ASCII letters.
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` for any other shape.
pub fn validate_department_code(code: &str) -> Result<(), CoreError> {
    validate_length("code", code, DEPARTMENT_CODE_LEN)?;
    if code.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(CoreError::InvalidArgument(format!(
            "department code must be uppercase letters only, got '{code}'"
        )))
    }
}

/// Check an email address is `local@domain.tld` shaped.
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` when the address is malformed.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.len() <= MAX_EMAIL_LEN && email_re().is_match(email) {
        Ok(())
    } else {
        Err(CoreError::InvalidArgument(format!(
            "email '{email}' is not a valid address"
        )))
    }
}
