//! Department repository.

use chrono::Utc;

use reg_core::entities::Department;
use reg_core::enums::EntityType;
use reg_core::errors::CoreError;
use reg_core::ids::PREFIX_DEPARTMENT;
use reg_core::validation::{DEPARTMENT_NAME_LEN, validate_department_code, validate_length};

use crate::error::DatabaseError;
use crate::helpers::{generate_id, parse_datetime};
use crate::service::RegistrarService;

const SELECT_COLS: &str = "id, code, name, created_at";

fn row_to_department(row: &libsql::Row) -> Result<Department, DatabaseError> {
    Ok(Department {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

/// Load one department.
///
/// # Errors
///
/// Returns `NotFound` if no department has this id.
pub async fn get_department(conn: &libsql::Connection, id: &str) -> Result<Department, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {SELECT_COLS} FROM departments WHERE id = ?1"), [id])
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| CoreError::not_found(EntityType::Department, id))?;
    row_to_department(&row)
}

impl RegistrarService {
    pub async fn create_department(&self, code: &str, name: &str) -> Result<Department, DatabaseError> {
        validate_department_code(code)?;
        validate_length("name", name, DEPARTMENT_NAME_LEN)?;

        let tx = self.db().begin_write().await?;
        let result = async {
            let department = Department {
                id: generate_id(&tx, PREFIX_DEPARTMENT).await?,
                code: code.to_string(),
                name: name.to_string(),
                created_at: Utc::now(),
            };
            tx.execute(
                &format!("INSERT INTO departments ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4)"),
                libsql::params![
                    department.id.as_str(),
                    code,
                    name,
                    department.created_at.to_rfc3339()
                ],
            )
            .await
            .map_err(|e| {
                DatabaseError::from_write(e, || format!("department code '{code}' already exists"))
            })?;
            Ok::<_, DatabaseError>(department)
        }
        .await;
        let department = tx.finish(result).await?;

        tracing::info!(department_id = %department.id, code, "department created");
        Ok(department)
    }

    pub async fn get_department(&self, id: &str) -> Result<Department, DatabaseError> {
        let tx = self.db().begin_read().await?;
        let result = get_department(&tx, id).await;
        tx.finish(result).await
    }

    pub async fn list_departments(&self, limit: u32) -> Result<Vec<Department>, DatabaseError> {
        let tx = self.db().begin_read().await?;
        let result = async {
            let mut rows = tx
                .query(
                    &format!("SELECT {SELECT_COLS} FROM departments ORDER BY code LIMIT {limit}"),
                    (),
                )
                .await?;
            let mut departments = Vec::new();
            while let Some(row) = rows.next().await? {
                departments.push(row_to_department(&row)?);
            }
            Ok::<_, DatabaseError>(departments)
        }
        .await;
        tx.finish(result).await
    }
}
