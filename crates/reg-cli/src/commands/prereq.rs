use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PrereqCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `reg prereq`.
pub async fn handle(
    action: &PrereqCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = &ctx.service;
    match action {
        PrereqCommands::Add {
            course,
            prerequisite,
        } => {
            let edge = service
                .add_prerequisite(course, prerequisite)
                .await
                .with_context(|| format!("cannot require {prerequisite} before {course}"))?;
            output(&edge, flags.format)
        }
        PrereqCommands::Remove {
            course,
            prerequisite,
        } => {
            let edge = service.remove_prerequisite(course, prerequisite).await?;
            output(&edge, flags.format)
        }
        PrereqCommands::List { course } => {
            output(&service.list_direct_prerequisites(course).await?, flags.format)
        }
        PrereqCommands::All { course } => {
            output(&service.get_all_prerequisites(course).await?, flags.format)
        }
        PrereqCommands::Chain { course } => {
            output(&service.get_prerequisite_chain(course).await?, flags.format)
        }
        PrereqCommands::Check { course, student } => {
            output(&service.check_prerequisites(student, course).await?, flags.format)
        }
    }
}
