use clap::Subcommand;

/// Enrollment commands.
#[derive(Clone, Debug, Subcommand)]
pub enum EnrollmentCommands {
    /// Enroll a student (re-activates a dropped enrollment).
    Create {
        #[arg(long)]
        student: String,
        #[arg(long)]
        course: String,
    },
    /// Drop an enrollment.
    Drop { id: String },
    /// Get an enrollment by ID.
    Get { id: String },
}
