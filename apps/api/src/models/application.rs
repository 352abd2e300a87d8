use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Tracked application status. Only this field is mutable after creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Interviewing,
    Offer,
    Rejected,
    Hold,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Interviewing => "interviewing",
            ApplicationStatus::Offer => "offer",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Hold => "hold",
        }
    }
}

/// One tracked job application. `resume_id` is a weak reference: deleting
/// the resume leaves it dangling, and the list view simply resolves no
/// title for it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobApplicationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub resume_id: Option<Uuid>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub job_url: Option<String>,
    pub status: String,
    pub applied_at: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// List projection with the linked resume title resolved by left join —
/// null when the reference dangles or was never set.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobApplicationWithResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub resume_id: Option<Uuid>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub job_url: Option<String>,
    pub status: String,
    pub applied_at: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub resume_title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_round_trip() {
        for status in [
            ApplicationStatus::Applied,
            ApplicationStatus::Interviewing,
            ApplicationStatus::Offer,
            ApplicationStatus::Rejected,
            ApplicationStatus::Hold,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            let back: ApplicationStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(serde_json::from_str::<ApplicationStatus>(r#""ghosted""#).is_err());
    }
}
