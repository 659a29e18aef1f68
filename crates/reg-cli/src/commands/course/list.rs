use reg_db::repos::course::CourseFilter;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    mut filter: CourseFilter,
    limit: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    filter.limit = Some(effective_limit(
        limit,
        flags.limit,
        ctx.config.general.default_limit,
    ));
    let courses = ctx.service.list_courses(&filter).await?;
    output(&courses, flags.format)
}
