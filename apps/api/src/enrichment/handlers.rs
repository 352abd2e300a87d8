//! Axum route handlers for the enrichment endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::document::{ResumeBody, ResumeHeader};
use crate::enrichment::extract::extract_json_object;
use crate::enrichment::prompts::{
    BUILD_PROMPT_TEMPLATE, BUILD_SYSTEM, COVER_LETTER_FROM_JOB_TEMPLATE, COVER_LETTER_SYSTEM,
    COVER_LETTER_TEMPLATE, IMPORT_PROMPT_TEMPLATE, IMPORT_SYSTEM, IMPROVE_BULLETS_SYSTEM,
    IMPROVE_BULLETS_TEMPLATE, IMPROVE_SUMMARY_SYSTEM, IMPROVE_SUMMARY_TEMPLATE,
    REFINE_PROMPT_TEMPLATE, REFINE_SYSTEM, RESUME_BODY_SCHEMA, SUGGEST_BULLETS_SYSTEM,
    SUGGEST_BULLETS_TEMPLATE,
};
use crate::enrichment::{fallback_body, Tone};
use crate::errors::AppError;
use crate::llm_client::ChatOptions;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Build from guided-interview answers
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct BuildResumeRequest {
    #[serde(default)]
    pub answers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ResumeBodyResponse {
    pub resume_json: ResumeBody,
}

/// POST /api/v1/resumes/build
///
/// Structures interview answers into a resume body. A response that fails
/// extraction is replaced with the fixed default body, never an error.
pub async fn handle_build_resume(
    State(state): State<AppState>,
    Json(request): Json<BuildResumeRequest>,
) -> Result<Json<ResumeBodyResponse>, AppError> {
    if request.answers.iter().all(|a| a.trim().is_empty()) {
        return Err(AppError::MissingInput("answers are required".to_string()));
    }

    let answers = request
        .answers
        .iter()
        .enumerate()
        .map(|(i, a)| format!("Answer {}: {}", i + 1, a))
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = BUILD_PROMPT_TEMPLATE
        .replace("{schema}", RESUME_BODY_SCHEMA)
        .replace("{answers}", &answers);

    let raw = state
        .llm
        .complete(
            BUILD_SYSTEM,
            &prompt,
            ChatOptions { temperature: 0.4, json_object: true },
        )
        .await?;

    let resume_json = match extract_json_object::<ResumeBody>(&raw) {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("build-resume output unparseable, using fallback: {e}");
            fallback_body()
        }
    };

    Ok(Json(ResumeBodyResponse { resume_json }))
}

// ────────────────────────────────────────────────────────────────────────────
// Import pasted resume text
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ImportResumeRequest {
    #[serde(default)]
    pub resume_text: String,
}

/// POST /api/v1/resumes/import
///
/// Converts pasted resume text into a structured body. There is no safe
/// fallback here — unparseable output surfaces as PARSE_ERROR.
pub async fn handle_import_resume(
    State(state): State<AppState>,
    Json(request): Json<ImportResumeRequest>,
) -> Result<Json<ResumeBodyResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::MissingInput("resume_text is required".to_string()));
    }

    let prompt = IMPORT_PROMPT_TEMPLATE
        .replace("{schema}", RESUME_BODY_SCHEMA)
        .replace("{resume_text}", &request.resume_text);

    let raw = state
        .llm
        .complete(
            IMPORT_SYSTEM,
            &prompt,
            ChatOptions { temperature: 0.3, json_object: true },
        )
        .await?;

    let resume_json = extract_json_object::<ResumeBody>(&raw)
        .map_err(|e| AppError::Parse(format!("resume import: {e}")))?;

    Ok(Json(ResumeBodyResponse { resume_json }))
}

// ────────────────────────────────────────────────────────────────────────────
// Whole-resume tone refinement
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RefineResumeRequest {
    #[serde(default)]
    pub resume_json: Option<ResumeBody>,
    #[serde(default)]
    pub tone: Tone,
}

#[derive(Debug, Serialize)]
pub struct RefineResumeResponse {
    pub refined_resume_json: ResumeBody,
}

/// POST /api/v1/resumes/refine
///
/// Rewrites summary, bullets, and project descriptions in the requested
/// tone. Unparseable output falls back to the caller's own body.
pub async fn handle_refine_resume(
    State(state): State<AppState>,
    Json(request): Json<RefineResumeRequest>,
) -> Result<Json<RefineResumeResponse>, AppError> {
    let original = request
        .resume_json
        .ok_or_else(|| AppError::MissingInput("resume_json is required".to_string()))?;

    let resume_json =
        serde_json::to_string_pretty(&original).map_err(|e| AppError::Internal(e.into()))?;

    let prompt = REFINE_PROMPT_TEMPLATE
        .replace("{tone_description}", request.tone.refine_description())
        .replace("{resume_json}", &resume_json);

    let raw = state
        .llm
        .complete(
            REFINE_SYSTEM,
            &prompt,
            ChatOptions { temperature: 0.4, json_object: true },
        )
        .await?;

    let refined_resume_json = match extract_json_object::<ResumeBody>(&raw) {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("refine-resume output unparseable, keeping original: {e}");
            original
        }
    };

    Ok(Json(RefineResumeResponse { refined_resume_json }))
}

// ────────────────────────────────────────────────────────────────────────────
// Improve one section
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ImproveSectionRequest {
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub experience: Option<ExperiencePayload>,
}

#[derive(Debug, Deserialize)]
pub struct ExperiencePayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ImproveSectionResponse {
    Summary { summary: String },
    Bullets { bullets: Vec<String> },
}

/// POST /api/v1/sections/improve
///
/// `section: "summary"` rewrites the summary paragraph (plain text);
/// `section: "experience"` rewrites one role's bullets (numbered list,
/// parsed back). Any other section is MISSING_INPUT.
pub async fn handle_improve_section(
    State(state): State<AppState>,
    Json(request): Json<ImproveSectionRequest>,
) -> Result<Json<ImproveSectionResponse>, AppError> {
    let mode = request.mode.as_deref().unwrap_or("improve");

    match request.section.as_str() {
        "summary" => {
            let summary = request
                .summary
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .ok_or_else(|| AppError::MissingInput("summary is required".to_string()))?;

            let prompt = IMPROVE_SUMMARY_TEMPLATE
                .replace("{summary}", summary)
                .replace("{tone_hint}", summary_tone_hint(mode));

            let raw = state
                .llm
                .complete(
                    IMPROVE_SUMMARY_SYSTEM,
                    &prompt,
                    ChatOptions { temperature: 0.6, json_object: false },
                )
                .await?;

            Ok(Json(ImproveSectionResponse::Summary {
                summary: raw.trim().to_string(),
            }))
        }
        "experience" => {
            let experience = request
                .experience
                .as_ref()
                .filter(|e| !e.bullets.is_empty())
                .ok_or_else(|| {
                    AppError::MissingInput("experience bullets are required".to_string())
                })?;

            let bullets_text = experience
                .bullets
                .iter()
                .enumerate()
                .map(|(i, b)| format!("{}. {}", i + 1, b))
                .collect::<Vec<_>>()
                .join("\n");

            let prompt = IMPROVE_BULLETS_TEMPLATE
                .replace("{title}", experience.title.as_deref().unwrap_or("Engineer"))
                .replace("{company}", experience.company.as_deref().unwrap_or("Company"))
                .replace("{period}", experience.period.as_deref().unwrap_or(""))
                .replace("{bullets}", &bullets_text)
                .replace("{tone_hint}", bullets_tone_hint(mode));

            let raw = state
                .llm
                .complete(
                    IMPROVE_BULLETS_SYSTEM,
                    &prompt,
                    ChatOptions { temperature: 0.6, json_object: false },
                )
                .await?;

            Ok(Json(ImproveSectionResponse::Bullets {
                bullets: parse_numbered_list(&raw),
            }))
        }
        other => Err(AppError::MissingInput(format!("unknown section '{other}'"))),
    }
}

fn summary_tone_hint(mode: &str) -> &'static str {
    match mode {
        "concise" => "more concise, while keeping impact and key metrics",
        "technical" => "more technical, with specific tools and metrics",
        _ => "more polished and professional, with strong action verbs and impact",
    }
}

fn bullets_tone_hint(mode: &str) -> &'static str {
    match mode {
        "concise" => "more concise, merging or shortening where possible",
        _ => "more impact-focused, with strong action verbs and measurable outcomes where possible",
    }
}

/// Parses a numbered-list response back into bullets, stripping `1.`-style
/// prefixes and blank lines.
fn parse_numbered_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(strip_list_prefix)
        .filter(|l| !l.is_empty())
        .collect()
}

fn strip_list_prefix(line: &str) -> String {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    let rest = rest.trim_start_matches(|c: char| matches!(c, '.' | ')' | '-') || c.is_whitespace());
    rest.trim().to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Suggest new bullets for one role
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SuggestBulletsRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub existing_bullets: Vec<String>,
    #[serde(default)]
    pub job_snippet: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct BulletsResponse {
    #[serde(default)]
    pub bullets: Vec<String>,
}

/// POST /api/v1/sections/bullets
///
/// Proposes new bullets for one experience entry. Degrades to an empty list
/// when the output is unparseable.
pub async fn handle_suggest_bullets(
    State(state): State<AppState>,
    Json(request): Json<SuggestBulletsRequest>,
) -> Result<Json<BulletsResponse>, AppError> {
    if request.title.trim().is_empty() && request.company.trim().is_empty() {
        return Err(AppError::MissingInput(
            "title or company is required".to_string(),
        ));
    }

    let existing = if request.existing_bullets.is_empty() {
        "  none".to_string()
    } else {
        request
            .existing_bullets
            .iter()
            .enumerate()
            .map(|(i, b)| format!("  {}. {}", i + 1, b))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let prompt = SUGGEST_BULLETS_TEMPLATE
        .replace("{title}", or_na(&request.title))
        .replace("{company}", or_na(&request.company))
        .replace("{period}", or_na(request.period.as_deref().unwrap_or("")))
        .replace("{location}", or_na(request.location.as_deref().unwrap_or("")))
        .replace("{tech_stack}", or_na(&request.tech_stack.join(", ")))
        .replace("{existing_bullets}", &existing)
        .replace("{job_snippet}", or_na(request.job_snippet.as_deref().unwrap_or("")));

    let raw = state
        .llm
        .complete(
            SUGGEST_BULLETS_SYSTEM,
            &prompt,
            ChatOptions { temperature: 0.5, json_object: true },
        )
        .await?;

    let parsed = extract_json_object::<BulletsResponse>(&raw).unwrap_or_else(|e| {
        tracing::warn!("suggest-bullets output unparseable, returning empty list: {e}");
        BulletsResponse::default()
    });

    Ok(Json(parsed))
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cover letters
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    #[serde(default)]
    pub header: Option<ResumeHeader>,
    #[serde(default)]
    pub resume_json: Option<ResumeBody>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub job_company: Option<String>,
    #[serde(default)]
    pub tone: Tone,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterFromJobRequest {
    #[serde(default)]
    pub header: Option<ResumeHeader>,
    #[serde(default)]
    pub resume_json: Option<ResumeBody>,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub tone: Tone,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

/// POST /api/v1/cover-letter
///
/// Cover letter addressed to the last tailored job title/company, or a
/// generic open role when neither is known.
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let (header, body) = match (&request.header, &request.resume_json) {
        (Some(header), Some(body)) => (header, body),
        _ => {
            return Err(AppError::MissingInput(
                "header and resume_json are required".to_string(),
            ))
        }
    };

    let prompt = COVER_LETTER_TEMPLATE
        .replace(
            "{target_role_line}",
            &target_role_line(request.job_title.as_deref(), request.job_company.as_deref()),
        )
        .replace("{full_name}", candidate_name(header))
        .replace("{title}", candidate_title(header))
        .replace("{location}", or_unspecified(&header.location))
        .replace(
            "{summary}",
            or_placeholder(&body.summary, "(no explicit summary provided)"),
        )
        .replace(
            "{skills}",
            or_placeholder(&body.skills.join(", "), "(no skills listed)"),
        )
        .replace("{experience_lines}", &experience_lines(body))
        .replace("{tone_hint}", request.tone.cover_letter_hint());

    let raw = state
        .llm
        .complete(
            COVER_LETTER_SYSTEM,
            &prompt,
            ChatOptions { temperature: 0.6, json_object: false },
        )
        .await?;

    Ok(Json(CoverLetterResponse {
        cover_letter: clean_cover_letter(&raw),
    }))
}

/// POST /api/v1/cover-letter/from-job
///
/// Cover letter targeted at a full pasted job description.
pub async fn handle_cover_letter_from_job(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterFromJobRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let (header, body) = match (&request.header, &request.resume_json) {
        (Some(header), Some(body)) if !request.job_description.trim().is_empty() => {
            (header, body)
        }
        _ => {
            return Err(AppError::MissingInput(
                "header, resume_json, and job_description are required".to_string(),
            ))
        }
    };

    let resume_json =
        serde_json::to_string_pretty(body).map_err(|e| AppError::Internal(e.into()))?;

    let prompt = COVER_LETTER_FROM_JOB_TEMPLATE
        .replace("{full_name}", candidate_name(header))
        .replace("{title}", candidate_title(header))
        .replace("{location}", or_unspecified(&header.location))
        .replace("{resume_json}", &resume_json)
        .replace("{job_description}", &request.job_description)
        .replace("{tone_hint}", request.tone.cover_letter_hint());

    let raw = state
        .llm
        .complete(
            COVER_LETTER_SYSTEM,
            &prompt,
            ChatOptions { temperature: 0.6, json_object: false },
        )
        .await?;

    Ok(Json(CoverLetterResponse {
        cover_letter: clean_cover_letter(&raw),
    }))
}

fn candidate_name(header: &ResumeHeader) -> &str {
    or_placeholder(&header.full_name, "Candidate")
}

fn candidate_title(header: &ResumeHeader) -> &str {
    or_placeholder(&header.title, "Software Developer")
}

fn or_unspecified(value: &str) -> &str {
    or_placeholder(value, "(not specified)")
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

fn target_role_line(job_title: Option<&str>, job_company: Option<&str>) -> String {
    match (nonempty(job_title), nonempty(job_company)) {
        (Some(title), Some(company)) => format!("for the {title} role at {company}"),
        (Some(title), None) => format!("for the {title} role"),
        (None, Some(company)) => format!("for an open role at {company}"),
        (None, None) => "for an open engineering role".to_string(),
    }
}

fn nonempty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// First two bullets per role, one line per role — the highlights block for
/// the cover-letter prompt.
fn experience_lines(body: &ResumeBody) -> String {
    if body.experiences.is_empty() {
        return "(no experience bullets available)".to_string();
    }
    body.experiences
        .iter()
        .map(|exp| {
            let impact = exp
                .bullets
                .iter()
                .take(2)
                .cloned()
                .collect::<Vec<_>>()
                .join(" ");
            format!("- {} at {}: {}", exp.title, exp.company, impact)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strips code fences and leading whitespace the model sometimes adds
/// around plain-text output.
fn clean_cover_letter(raw: &str) -> String {
    raw.replace("```", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ExperienceItem;

    #[test]
    fn test_parse_numbered_list_strips_prefixes() {
        let raw = "1. Shipped the dashboard\n2) Cut latency by 40%\n- Led the migration\n\n3 - Mentored juniors";
        assert_eq!(
            parse_numbered_list(raw),
            vec![
                "Shipped the dashboard",
                "Cut latency by 40%",
                "Led the migration",
                "Mentored juniors",
            ]
        );
    }

    #[test]
    fn test_parse_numbered_list_drops_empty_items() {
        assert!(parse_numbered_list("1.\n\n2.   ").is_empty());
    }

    #[test]
    fn test_target_role_line_variants() {
        assert_eq!(
            target_role_line(Some("Staff Engineer"), Some("Acme")),
            "for the Staff Engineer role at Acme"
        );
        assert_eq!(
            target_role_line(Some("Staff Engineer"), None),
            "for the Staff Engineer role"
        );
        assert_eq!(
            target_role_line(None, Some("Acme")),
            "for an open role at Acme"
        );
        assert_eq!(target_role_line(None, Some("  ")), "for an open engineering role");
    }

    #[test]
    fn test_experience_lines_take_first_two_bullets() {
        let body = ResumeBody {
            experiences: vec![ExperienceItem {
                title: "Engineer".into(),
                company: "Acme".into(),
                bullets: vec!["a".into(), "b".into(), "c".into()],
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(experience_lines(&body), "- Engineer at Acme: a b");
    }

    #[test]
    fn test_clean_cover_letter_strips_fences() {
        assert_eq!(
            clean_cover_letter("```\nDear Hiring Manager,\n```"),
            "Dear Hiring Manager,"
        );
    }

    #[test]
    fn test_tone_hints_for_modes() {
        assert!(summary_tone_hint("concise").contains("concise"));
        assert!(summary_tone_hint("technical").contains("technical"));
        assert!(summary_tone_hint("anything-else").contains("polished"));
        assert!(bullets_tone_hint("concise").contains("concise"));
    }
}
