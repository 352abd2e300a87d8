//! Axum route handlers for resume persistence and the application tracker.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthSession;
use crate::document::ResumeDocument;
use crate::errors::AppError;
use crate::models::application::{ApplicationStatus, JobApplicationRow, JobApplicationWithResumeRow};
use crate::models::resume::{ResumeRecordRow, ResumeSummaryRow};
use crate::state::AppState;
use crate::store::applications::{
    insert_application, list_applications, update_application_status, NewApplication,
};
use crate::store::resumes::{delete_all_resumes, list_resumes, load_resume, upsert_resume};

// ────────────────────────────────────────────────────────────────────────────
// Resumes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SaveResumeRequest {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub document: ResumeDocument,
}

/// POST /api/v1/resumes/save
///
/// First save assigns the id; every later save with that id updates the
/// same row. A document with no body has nothing worth persisting.
pub async fn handle_save_resume(
    State(state): State<AppState>,
    session: AuthSession,
    Json(request): Json<SaveResumeRequest>,
) -> Result<Json<ResumeSummaryRow>, AppError> {
    if request.document.body.is_none() {
        return Err(AppError::MissingInput(
            "document body is required — build or import a resume first".to_string(),
        ));
    }

    let title = request
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("Untitled resume");

    let document =
        serde_json::to_value(&request.document).map_err(|e| AppError::Internal(e.into()))?;

    let row = upsert_resume(&state.db, session.user_id, request.id, title, &document).await?;

    Ok(Json(row))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<Vec<ResumeSummaryRow>>, AppError> {
    let rows = list_resumes(&state.db, session.user_id).await?;
    Ok(Json(rows))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    session: AuthSession,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRecordRow>, AppError> {
    let row = load_resume(&state.db, session.user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    Ok(Json(row))
}

#[derive(Debug, Serialize)]
pub struct DeleteAllResponse {
    pub deleted: u64,
}

/// DELETE /api/v1/resumes
///
/// The only destruction path: bulk delete of everything the user owns.
pub async fn handle_delete_all_resumes(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<DeleteAllResponse>, AppError> {
    let deleted = delete_all_resumes(&state.db, session.user_id).await?;
    Ok(Json(DeleteAllResponse { deleted }))
}

// ────────────────────────────────────────────────────────────────────────────
// Job application tracker
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateApplicationRequest {
    #[serde(default)]
    pub resume_id: Option<Uuid>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub job_url: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub applied_at: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// POST /api/v1/applications
pub async fn handle_create_application(
    State(state): State<AppState>,
    session: AuthSession,
    Json(request): Json<CreateApplicationRequest>,
) -> Result<Json<JobApplicationRow>, AppError> {
    let new = NewApplication {
        resume_id: request.resume_id,
        company: request.company,
        role: request.role,
        job_url: request.job_url,
        status: request.status,
        applied_at: request.applied_at,
        notes: request.notes,
    };

    let row = insert_application(&state.db, session.user_id, &new).await?;

    Ok(Json(row))
}

/// GET /api/v1/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<Vec<JobApplicationWithResumeRow>>, AppError> {
    let rows = list_applications(&state.db, session.user_id).await?;
    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ApplicationStatus,
}

/// PATCH /api/v1/applications/:id/status
pub async fn handle_update_application_status(
    State(state): State<AppState>,
    session: AuthSession,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<StatusCode, AppError> {
    update_application_status(&state.db, session.user_id, id, request.status).await?;
    Ok(StatusCode::NO_CONTENT)
}
