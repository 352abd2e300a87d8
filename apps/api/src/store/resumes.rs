//! Row-store operations for resumes.

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ResumeRecordRow, ResumeSummaryRow};

/// Upsert keyed by id: present ⇒ update that row in place (bumping
/// `updated_at`), absent ⇒ insert and capture the generated id.
pub async fn upsert_resume(
    pool: &PgPool,
    user_id: Uuid,
    id: Option<Uuid>,
    title: &str,
    document: &Value,
) -> Result<ResumeSummaryRow, AppError> {
    match id {
        Some(id) => {
            let row: Option<ResumeSummaryRow> = sqlx::query_as(
                r#"
                UPDATE resumes
                SET title = $1, resume_json = $2, updated_at = now()
                WHERE id = $3 AND user_id = $4
                RETURNING id, title, updated_at
                "#,
            )
            .bind(title)
            .bind(document)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

            row.ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
        }
        None => {
            let row: ResumeSummaryRow = sqlx::query_as(
                r#"
                INSERT INTO resumes (id, user_id, title, resume_json, updated_at)
                VALUES ($1, $2, $3, $4, now())
                RETURNING id, title, updated_at
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(title)
            .bind(document)
            .fetch_one(pool)
            .await?;

            Ok(row)
        }
    }
}

/// All of a user's resumes, most recently updated first.
pub async fn list_resumes(pool: &PgPool, user_id: Uuid) -> Result<Vec<ResumeSummaryRow>, AppError> {
    let rows = sqlx::query_as(
        "SELECT id, title, updated_at FROM resumes WHERE user_id = $1 ORDER BY updated_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn load_resume(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> Result<Option<ResumeRecordRow>, AppError> {
    let row = sqlx::query_as("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Bulk delete of every resume the user owns — the only destruction path.
pub async fn delete_all_resumes(pool: &PgPool, user_id: Uuid) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM resumes WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
