mod create;
mod enrollments;
mod get;
mod list;

use reg_core::entities::NewStudent;
use reg_db::repos::student::StudentFilter;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::StudentCommands;
use crate::context::AppContext;

/// Handle `reg student`.
pub async fn handle(
    action: &StudentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        StudentCommands::Create {
            number,
            name,
            email,
            department,
        } => {
            let new = NewStudent {
                student_number: number.clone(),
                name: name.clone(),
                email: email.clone(),
                department_id: department.clone(),
            };
            create::run(new, ctx, flags).await
        }
        StudentCommands::Get { id } => get::run(id, ctx, flags).await,
        StudentCommands::List {
            department,
            search,
            limit,
        } => {
            let filter = StudentFilter {
                department_id: department.clone(),
                search: search.clone(),
                limit: None,
            };
            list::run(filter, *limit, ctx, flags).await
        }
        StudentCommands::Enrollments { id, status } => {
            enrollments::run(id, status.as_deref(), ctx, flags).await
        }
    }
}
