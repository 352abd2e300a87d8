//! Tailoring & scoring — produces a job-specific resume variant plus a
//! match score and keyword gap analysis.
//!
//! Unlike the build/refine endpoints there is NO silent fallback here: a
//! tailored resume with a silently-wrong structure is worse than an explicit
//! retry prompt, so malformed model output is a distinct PARSE_ERROR.
//!
//! The tailor sits behind a trait so the backend can be swapped without
//! touching the handler (`AppState` carries `Arc<dyn Tailor>`).

use async_trait::async_trait;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::ResumeBody;
use crate::enrichment::extract::extract_json_object;
use crate::errors::AppError;
use crate::llm_client::{ChatOptions, LlmClient};
use crate::state::AppState;

pub mod prompts;

use prompts::{TAILOR_PROMPT_TEMPLATE, TAILOR_SYSTEM};

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// Normalized tailoring result: keyword lists are always present (possibly
/// empty), the score is a clamped integer or null — never NaN, never a
/// missing key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailorOutcome {
    pub tailored_resume_json: ResumeBody,
    pub ats_score: Option<u8>,
    pub missing_skills: Vec<String>,
    pub present_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub job_title: Option<String>,
    pub job_company: Option<String>,
}

/// Raw model output before normalization. Everything optional: the model
/// may drop keys, and the score may arrive as a number or a string.
#[derive(Debug, Deserialize)]
struct RawTailorOutput {
    #[serde(default)]
    tailored_resume_json: Option<ResumeBody>,
    #[serde(default)]
    ats_score: Option<Value>,
    #[serde(default)]
    missing_skills: Option<Vec<String>>,
    #[serde(default)]
    present_keywords: Option<Vec<String>>,
    #[serde(default)]
    missing_keywords: Option<Vec<String>>,
    #[serde(default)]
    job_title: Option<String>,
    #[serde(default)]
    job_company: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait + LLM-backed implementation
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait Tailor: Send + Sync {
    async fn tailor(&self, resume: &ResumeBody, job_input: &str)
        -> Result<TailorOutcome, AppError>;
}

/// The production tailor: one generation call, strict extraction,
/// normalization.
pub struct LlmTailor(pub LlmClient);

#[async_trait]
impl Tailor for LlmTailor {
    async fn tailor(
        &self,
        resume: &ResumeBody,
        job_input: &str,
    ) -> Result<TailorOutcome, AppError> {
        let resume_json =
            serde_json::to_string_pretty(resume).map_err(|e| AppError::Internal(e.into()))?;

        let prompt = TAILOR_PROMPT_TEMPLATE
            .replace("{resume_json}", &resume_json)
            .replace("{job_input}", job_input);

        let raw = self
            .0
            .complete(
                TAILOR_SYSTEM,
                &prompt,
                ChatOptions { temperature: 0.4, json_object: true },
            )
            .await?;

        let parsed = extract_json_object::<RawTailorOutput>(&raw)
            .map_err(|e| AppError::Parse(format!("tailoring: {e}")))?;

        normalize(parsed)
    }
}

/// Fills missing keys with empty collections and coerces the score.
/// A missing tailored resume is malformed output, not a defaultable field.
fn normalize(raw: RawTailorOutput) -> Result<TailorOutcome, AppError> {
    let tailored_resume_json = raw.tailored_resume_json.ok_or_else(|| {
        AppError::Parse("tailoring: response is missing tailored_resume_json".to_string())
    })?;

    Ok(TailorOutcome {
        tailored_resume_json,
        ats_score: raw.ats_score.as_ref().and_then(coerce_score),
        missing_skills: raw.missing_skills.unwrap_or_default(),
        present_keywords: raw.present_keywords.unwrap_or_default(),
        missing_keywords: raw.missing_keywords.unwrap_or_default(),
        job_title: raw.job_title.filter(|s| !s.trim().is_empty()),
        job_company: raw.job_company.filter(|s| !s.trim().is_empty()),
    })
}

/// Coerces a score value to a finite integer in [0, 100], or None.
/// Accepts numbers and numeric strings; anything else is unscorable.
fn coerce_score(value: &Value) -> Option<u8> {
    let score = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !score.is_finite() {
        return None;
    }
    Some(score.round().clamp(0.0, 100.0) as u8)
}

// ────────────────────────────────────────────────────────────────────────────
// Handler
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TailorRequest {
    #[serde(default)]
    pub resume_json: Option<ResumeBody>,
    #[serde(default)]
    pub job_input: String,
}

/// POST /api/v1/resumes/tailor
///
/// Read-only with respect to stored state: the stored resume is untouched
/// regardless of outcome; the caller decides what to do with the variant.
pub async fn handle_tailor(
    State(state): State<AppState>,
    Json(request): Json<TailorRequest>,
) -> Result<Json<TailorOutcome>, AppError> {
    let resume = request.resume_json.as_ref().ok_or_else(|| {
        AppError::MissingInput("resume_json and job_input are required".to_string())
    })?;
    if request.job_input.trim().is_empty() {
        return Err(AppError::MissingInput(
            "resume_json and job_input are required".to_string(),
        ));
    }

    let outcome = state.tailor.tailor(resume, &request.job_input).await?;

    Ok(Json(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_with(body: Value) -> RawTailorOutput {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_missing_keyword_lists_normalize_to_empty() {
        let raw = raw_with(json!({
            "tailored_resume_json": {"summary": "x"},
            "ats_score": 80
        }));
        let outcome = normalize(raw).unwrap();
        assert!(outcome.missing_keywords.is_empty());
        assert!(outcome.present_keywords.is_empty());
        assert!(outcome.missing_skills.is_empty());
        assert_eq!(outcome.ats_score, Some(80));
    }

    #[test]
    fn test_missing_tailored_resume_is_parse_error() {
        let raw = raw_with(json!({"ats_score": 50}));
        let err = normalize(raw).unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn test_score_coercion() {
        assert_eq!(coerce_score(&json!(87)), Some(87));
        assert_eq!(coerce_score(&json!(87.6)), Some(88));
        assert_eq!(coerce_score(&json!(150)), Some(100));
        assert_eq!(coerce_score(&json!(-3)), Some(0));
        assert_eq!(coerce_score(&json!("92")), Some(92));
        assert_eq!(coerce_score(&json!("not a score")), None);
        assert_eq!(coerce_score(&json!(null)), None);
        assert_eq!(coerce_score(&json!([1, 2])), None);
    }

    #[test]
    fn test_blank_job_fields_become_none() {
        let raw = raw_with(json!({
            "tailored_resume_json": {"summary": "x"},
            "job_title": "  ",
            "job_company": "Acme"
        }));
        let outcome = normalize(raw).unwrap();
        assert_eq!(outcome.job_title, None);
        assert_eq!(outcome.job_company.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_outcome_serializes_all_keys() {
        let raw = raw_with(json!({"tailored_resume_json": {"summary": "x"}}));
        let outcome = normalize(raw).unwrap();
        let value = serde_json::to_value(&outcome).unwrap();
        for key in [
            "tailored_resume_json",
            "ats_score",
            "missing_skills",
            "present_keywords",
            "missing_keywords",
            "job_title",
            "job_company",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert!(value["ats_score"].is_null());
    }
}
