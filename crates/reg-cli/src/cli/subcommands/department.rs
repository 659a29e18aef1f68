use clap::Subcommand;

/// Department commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DepartmentCommands {
    /// Create a department.
    Create {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
    },
    /// Get a department by ID.
    Get { id: String },
    /// List departments.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
}
