use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EnrollmentCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `reg enrollment`.
pub async fn handle(
    action: &EnrollmentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        EnrollmentCommands::Create { student, course } => {
            let enrollment = ctx
                .service
                .create_enrollment(student, course)
                .await
                .with_context(|| format!("cannot enroll {student} in {course}"))?;
            output(&enrollment, flags.format)
        }
        EnrollmentCommands::Drop { id } => {
            output(&ctx.service.drop_enrollment(id).await?, flags.format)
        }
        EnrollmentCommands::Get { id } => {
            output(&ctx.service.get_enrollment(id).await?, flags.format)
        }
    }
}
