mod availability;
mod create;
mod delete;
mod get;
mod list;
mod students;
mod update;

use reg_core::entities::NewCourse;
use reg_db::repos::course::CourseFilter;
use reg_db::updates::course::CourseUpdate;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CourseCommands;
use crate::context::AppContext;

/// Handle `reg course`.
pub async fn handle(
    action: &CourseCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CourseCommands::Create {
            code,
            name,
            credits,
            department,
            max_students,
            semester,
        } => {
            let new = NewCourse {
                code: code.clone(),
                name: name.clone(),
                credits: *credits,
                department_id: department.clone(),
                max_students: *max_students,
                semester: semester.clone(),
            };
            create::run(new, ctx, flags).await
        }
        CourseCommands::Update {
            id,
            code,
            name,
            credits,
            max_students,
            semester,
        } => {
            let update = CourseUpdate {
                code: code.clone(),
                name: name.clone(),
                credits: *credits,
                max_students: *max_students,
                semester: semester.clone(),
            };
            update::run(id, update, ctx, flags).await
        }
        CourseCommands::Get { id } => get::run(id, ctx, flags).await,
        CourseCommands::List {
            semester,
            department,
            department_code,
            search,
            limit,
        } => {
            let filter = CourseFilter {
                department_id: department.clone(),
                department_code: department_code.clone(),
                semester: semester.clone(),
                search: search.clone(),
                limit: None,
            };
            list::run(filter, *limit, ctx, flags).await
        }
        CourseCommands::Delete { id } => delete::run(id, ctx, flags).await,
        CourseCommands::Availability { id } => availability::run(id, ctx, flags).await,
        CourseCommands::Students { id } => students::run(id, ctx, flags).await,
    }
}
