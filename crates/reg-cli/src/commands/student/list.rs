use reg_db::repos::student::StudentFilter;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    mut filter: StudentFilter,
    limit: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    filter.limit = Some(effective_limit(
        limit,
        flags.limit,
        ctx.config.general.default_limit,
    ));
    let students = ctx.service.list_students(&filter).await?;
    output(&students, flags.format)
}
