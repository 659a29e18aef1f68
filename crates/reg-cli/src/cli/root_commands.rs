use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    CourseCommands, DepartmentCommands, EnrollmentCommands, PrereqCommands, StudentCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Departments.
    Department {
        #[command(subcommand)]
        action: DepartmentCommands,
    },
    /// Courses and their capacity.
    Course {
        #[command(subcommand)]
        action: CourseCommands,
    },
    /// Students.
    Student {
        #[command(subcommand)]
        action: StudentCommands,
    },
    /// Prerequisite graph.
    Prereq {
        #[command(subcommand)]
        action: PrereqCommands,
    },
    /// Enrollments.
    Enrollment {
        #[command(subcommand)]
        action: EnrollmentCommands,
    },
    /// Print the JSON schema of an output type.
    Schema(SchemaArgs),
}

/// Arguments for `reg schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Type name, e.g. `course` or `prerequisite-chain`.
    pub type_name: String,
}
