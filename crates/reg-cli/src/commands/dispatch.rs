use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Department { action } => commands::department::handle(&action, ctx, flags).await,
        Commands::Course { action } => commands::course::handle(&action, ctx, flags).await,
        Commands::Student { action } => commands::student::handle(&action, ctx, flags).await,
        Commands::Prereq { action } => commands::prereq::handle(&action, ctx, flags).await,
        Commands::Enrollment { action } => commands::enrollment::handle(&action, ctx, flags).await,
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
