//! AI enrichment gateway — stateless request/response handlers that turn
//! free text into resume structure via the generation service.
//!
//! Parsing policy per endpoint (deliberate, not accidental):
//! - build: parse failure falls back to a fixed default body;
//! - refine: parse failure falls back to the caller's input;
//! - import: parse failure is a PARSE_ERROR — substituting a default would
//!   misrepresent user-authored content;
//! - bullet suggestions: parse failure degrades to an empty list.

use serde::{Deserialize, Serialize};

use crate::document::{ExperienceItem, ResumeBody};

pub mod extract;
pub mod handlers;
pub mod prompts;

/// Writing tone shared by refinement and cover-letter generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Neutral,
    Technical,
    Confident,
}

impl Tone {
    /// Tone instruction used by whole-resume refinement.
    pub fn refine_description(self) -> &'static str {
        match self {
            Tone::Technical => {
                "very technical language, emphasizing technologies, architecture, and performance metrics"
            }
            Tone::Confident => {
                "confident and impact-focused language, with strong action verbs and clear achievements"
            }
            Tone::Neutral => "neutral, concise, and professional language with balanced tone",
        }
    }

    /// Tone instruction used by cover-letter generation.
    pub fn cover_letter_hint(self) -> &'static str {
        match self {
            Tone::Technical => {
                "slightly more technical tone, mentioning relevant tools and technologies, but still understandable to a recruiter"
            }
            Tone::Confident => {
                "confident and impact-focused tone, still professional and not arrogant"
            }
            Tone::Neutral => "neutral, professional tone",
        }
    }
}

/// Deterministic fallback body substituted when a build-path generation
/// response cannot be parsed. Fixed content so retries are reproducible.
pub fn fallback_body() -> ResumeBody {
    ResumeBody {
        summary:
            "Software developer with experience building and shipping production applications."
                .to_string(),
        skills: vec![
            "JavaScript".to_string(),
            "TypeScript".to_string(),
            "CSS".to_string(),
        ],
        experiences: vec![ExperienceItem {
            title: "Software Developer".to_string(),
            company: "Example Company".to_string(),
            period: Some(String::new()),
            location: Some(String::new()),
            bullets: vec![
                "Implemented responsive UI components.".to_string(),
                "Collaborated with backend engineers to integrate APIs.".to_string(),
            ],
        }],
        projects: Vec::new(),
        education: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_serde_lowercase() {
        let t: Tone = serde_json::from_str(r#""confident""#).unwrap();
        assert_eq!(t, Tone::Confident);
        assert_eq!(serde_json::to_string(&Tone::Neutral).unwrap(), r#""neutral""#);
    }

    #[test]
    fn test_fallback_body_is_deterministic() {
        assert_eq!(fallback_body(), fallback_body());
        let body = fallback_body();
        assert!(!body.summary.is_empty());
        assert_eq!(body.experiences.len(), 1);
        assert!(body.projects.is_empty());
    }
}
