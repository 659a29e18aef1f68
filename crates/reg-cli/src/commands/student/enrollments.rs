use reg_core::enums::EnrollmentStatus;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: &str,
    status: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let status = status
        .map(|raw| parse_enum::<EnrollmentStatus>(raw, "status"))
        .transpose()?;

    let mut enrollments = ctx.service.list_student_enrollments(id).await?;
    if let Some(status) = status {
        enrollments.retain(|enrollment| enrollment.status == status);
    }

    output(&enrollments, flags.format)
}
