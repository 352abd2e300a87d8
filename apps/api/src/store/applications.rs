//! Row-store operations for the job application tracker.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{
    ApplicationStatus, JobApplicationRow, JobApplicationWithResumeRow,
};

pub struct NewApplication {
    pub resume_id: Option<Uuid>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub job_url: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: Option<NaiveDate>,
    pub notes: Option<String>,
}

pub async fn insert_application(
    pool: &PgPool,
    user_id: Uuid,
    new: &NewApplication,
) -> Result<JobApplicationRow, AppError> {
    let row = sqlx::query_as(
        r#"
        INSERT INTO job_applications
            (id, user_id, resume_id, company, role, job_url, status, applied_at, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(new.resume_id)
    .bind(&new.company)
    .bind(&new.role)
    .bind(&new.job_url)
    .bind(new.status.as_str())
    .bind(new.applied_at)
    .bind(&new.notes)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Tracker list, newest first. The resume title resolves through a left
/// join so a dangling `resume_id` yields null instead of dropping the row.
pub async fn list_applications(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<JobApplicationWithResumeRow>, AppError> {
    let rows = sqlx::query_as(
        r#"
        SELECT a.*, r.title AS resume_title
        FROM job_applications a
        LEFT JOIN resumes r ON r.id = a.resume_id AND r.user_id = a.user_id
        WHERE a.user_id = $1
        ORDER BY a.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Status is the only field mutable after creation.
pub async fn update_application_status(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    status: ApplicationStatus,
) -> Result<(), AppError> {
    let result = sqlx::query(
        "UPDATE job_applications SET status = $1 WHERE id = $2 AND user_id = $3",
    )
    .bind(status.as_str())
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Application {id} not found")));
    }

    Ok(())
}
