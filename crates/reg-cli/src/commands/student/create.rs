use reg_core::entities::NewStudent;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(new: NewStudent, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let student = ctx.service.create_student(new).await?;
    output(&student, flags.format)
}
