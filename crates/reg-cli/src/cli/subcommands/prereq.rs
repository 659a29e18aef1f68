use clap::Subcommand;

/// Prerequisite graph commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PrereqCommands {
    /// Require PREREQUISITE before COURSE.
    Add { course: String, prerequisite: String },
    /// Remove a prerequisite edge.
    Remove { course: String, prerequisite: String },
    /// Direct prerequisites of a course.
    List { course: String },
    /// Every course required before a course.
    All { course: String },
    /// Nested prerequisite tree of a course.
    Chain { course: String },
    /// Check whether a student meets a course's prerequisites.
    Check {
        course: String,
        #[arg(long)]
        student: String,
    },
}
