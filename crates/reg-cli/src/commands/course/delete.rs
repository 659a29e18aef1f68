use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let course = ctx
        .service
        .delete_course(id)
        .await
        .with_context(|| format!("failed to delete course {id}"))?;
    output(&course, flags.format)
}
