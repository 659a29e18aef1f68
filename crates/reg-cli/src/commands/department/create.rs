use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(code: &str, name: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let department = ctx.service.create_department(code, name).await?;
    output(&department, flags.format)
}
