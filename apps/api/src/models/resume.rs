use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One stored resume. `resume_json` is the whole `ResumeDocument` as one
/// denormalized jsonb blob — header, body, template, and cover letter are
/// never persisted separately.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRecordRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub resume_json: Value,
    pub updated_at: DateTime<Utc>,
}

/// List-view projection, ordered by `updated_at` desc.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeSummaryRow {
    pub id: Uuid,
    pub title: String,
    pub updated_at: DateTime<Utc>,
}
