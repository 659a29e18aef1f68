use reg_core::entities::NewCourse;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(new: NewCourse, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let course = ctx.service.create_course(new).await?;
    output(&course, flags.format)
}
