use anyhow::bail;
use schemars::{Schema, schema_for};

use reg_core::entities::{Course, Department, Enrollment, PrerequisiteEdge, Student};
use reg_core::responses::{CourseAvailability, CourseSummary, PrerequisiteChain, PrerequisiteCheck};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Names accepted by `reg schema`.
pub const TYPE_NAMES: &[&str] = &[
    "department",
    "course",
    "student",
    "prerequisite-edge",
    "enrollment",
    "course-summary",
    "prerequisite-chain",
    "prerequisite-check",
    "course-availability",
];

/// JSON schema for a named output type.
pub fn schema_by_name(name: &str) -> Option<Schema> {
    let schema = match name.replace('_', "-").as_str() {
        "department" => schema_for!(Department),
        "course" => schema_for!(Course),
        "student" => schema_for!(Student),
        "prerequisite-edge" => schema_for!(PrerequisiteEdge),
        "enrollment" => schema_for!(Enrollment),
        "course-summary" => schema_for!(CourseSummary),
        "prerequisite-chain" => schema_for!(PrerequisiteChain),
        "prerequisite-check" => schema_for!(PrerequisiteCheck),
        "course-availability" => schema_for!(CourseAvailability),
        _ => return None,
    };
    Some(schema)
}

/// Handle `reg schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let Some(schema) = schema_by_name(&args.type_name) else {
        bail!(
            "unknown type '{}' (expected one of: {})",
            args.type_name,
            TYPE_NAMES.join(", ")
        );
    };
    output(&schema, flags.format)
}
