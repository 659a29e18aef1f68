mod create;
mod get;
mod list;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DepartmentCommands;
use crate::context::AppContext;

/// Handle `reg department`.
pub async fn handle(
    action: &DepartmentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        DepartmentCommands::Create { code, name } => create::run(code, name, ctx, flags).await,
        DepartmentCommands::Get { id } => get::run(id, ctx, flags).await,
        DepartmentCommands::List { limit } => list::run(*limit, ctx, flags).await,
    }
}
