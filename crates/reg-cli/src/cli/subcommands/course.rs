use clap::Subcommand;

/// Course commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CourseCommands {
    /// Create a course.
    Create {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        credits: u8,
        #[arg(long)]
        department: String,
        /// Seat capacity (defaults to `enrollment.default_max_students`).
        #[arg(long)]
        max_students: Option<u32>,
        /// Term label, e.g. "Fall 2026".
        #[arg(long)]
        semester: String,
    },
    /// Update a course.
    Update {
        id: String,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        credits: Option<u8>,
        #[arg(long)]
        max_students: Option<u32>,
        #[arg(long)]
        semester: Option<String>,
    },
    /// Get a course by ID.
    Get { id: String },
    /// List courses.
    List {
        #[arg(long)]
        semester: Option<String>,
        /// Department ID.
        #[arg(long, conflicts_with = "department_code")]
        department: Option<String>,
        /// Department code, any case.
        #[arg(long)]
        department_code: Option<String>,
        /// Substring of the course code or name, any case.
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Delete a course that has no enrolled students.
    Delete { id: String },
    /// Seats taken and free.
    Availability { id: String },
    /// Students actively enrolled.
    Students { id: String },
}
