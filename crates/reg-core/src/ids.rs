//! ID prefix constants.
//!
//! IDs are generated by the database as `"{prefix}-{8 hex chars}"`,
//! e.g. `"crs-a3f8b2c1"`.

pub const PREFIX_DEPARTMENT: &str = "dpt";
pub const PREFIX_COURSE: &str = "crs";
pub const PREFIX_STUDENT: &str = "stu";
pub const PREFIX_PREREQUISITE: &str = "pre";
pub const PREFIX_ENROLLMENT: &str = "enr";

/// Every prefix in use, for exhaustive ID tests.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_DEPARTMENT,
    PREFIX_COURSE,
    PREFIX_STUDENT,
    PREFIX_PREREQUISITE,
    PREFIX_ENROLLMENT,
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::ALL_PREFIXES;

    #[test]
    fn prefixes_are_unique_and_three_chars() {
        let unique: HashSet<_> = ALL_PREFIXES.iter().collect();
        assert_eq!(unique.len(), ALL_PREFIXES.len());
        assert!(ALL_PREFIXES.iter().all(|p| p.len() == 3));
    }
}
