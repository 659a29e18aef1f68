use anyhow::bail;
use reg_db::updates::course::CourseUpdate;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: &str,
    update: CourseUpdate,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if update.is_empty() {
        bail!("nothing to update: pass at least one of --code, --name, --credits, --max-students, --semester");
    }
    let course = ctx.service.update_course(id, update).await?;
    output(&course, flags.format)
}
