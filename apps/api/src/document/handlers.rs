//! Axum route handler for the stateless patch reducer.

use axum::Json;
use serde::{Deserialize, Serialize};

use super::patch::{apply, DocumentPatch};
use super::ResumeDocument;
use crate::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct ApplyPatchesRequest {
    pub document: ResumeDocument,
    pub patches: Vec<DocumentPatch>,
}

#[derive(Debug, Serialize)]
pub struct ApplyPatchesResponse {
    pub document: ResumeDocument,
}

/// POST /api/v1/documents/patch
///
/// Applies patches in order and returns the resulting document. Stateless:
/// nothing is persisted — clients save explicitly via the resumes API.
pub async fn handle_apply_patches(
    Json(request): Json<ApplyPatchesRequest>,
) -> Result<Json<ApplyPatchesResponse>, AppError> {
    let document = request
        .patches
        .into_iter()
        .fold(request.document, apply);

    Ok(Json(ApplyPatchesResponse { document }))
}
