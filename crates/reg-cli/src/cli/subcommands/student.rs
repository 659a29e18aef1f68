use clap::Subcommand;

/// Student commands.
#[derive(Clone, Debug, Subcommand)]
pub enum StudentCommands {
    /// Register a student.
    Create {
        #[arg(long)]
        number: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        department: String,
    },
    /// Get a student by ID.
    Get { id: String },
    /// List students.
    List {
        #[arg(long)]
        department: Option<String>,
        /// Substring of the name, email, or student number, any case.
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// A student's enrollments.
    Enrollments {
        id: String,
        /// Only enrollments in this status (enrolled, dropped).
        #[arg(long)]
        status: Option<String>,
    },
}
