//! Resume document model — the single denormalized unit stored per resume.
//!
//! Header, body, template choice, and cover letter always travel together;
//! no partial-field consistency exists anywhere else, so nothing may persist
//! or transmit a fragment of this struct on its own.

use serde::{Deserialize, Serialize};

pub mod handlers;
pub mod patch;

/// Contact block rendered at the top of every template.
/// Empty fields render as empty — no validation beyond that.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeHeader {
    pub full_name: String,
    pub title: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
}

/// One job entry. `bullets` keep display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceItem {
    pub title: String,
    pub company: String,
    pub period: Option<String>,
    pub location: Option<String>,
    pub bullets: Vec<String>,
}

/// One project entry. `stack` follows the same tag rules as skills.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectItem {
    pub name: String,
    pub description: Option<String>,
    pub stack: Vec<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationItem {
    pub institution: String,
    pub degree: String,
    pub location: Option<String>,
    pub period: Option<String>,
}

/// Structured resume content, distinct from the contact header.
///
/// Every collection defaults to empty on deserialization so a generation
/// response missing a section still parses into a usable body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeBody {
    pub summary: String,
    pub skills: Vec<String>,
    pub experiences: Vec<ExperienceItem>,
    pub projects: Vec<ProjectItem>,
    pub education: Vec<EducationItem>,
}

/// Print template selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    #[default]
    Classic,
    Compact,
}

/// The full editable document. `body == None` is the pre-interview state:
/// section edits are no-ops until a body exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeDocument {
    pub header: ResumeHeader,
    pub body: Option<ResumeBody>,
    pub template_id: TemplateId,
    pub cover_letter: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_id_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&TemplateId::Compact).unwrap(),
            r#""compact""#
        );
        let t: TemplateId = serde_json::from_str(r#""classic""#).unwrap();
        assert_eq!(t, TemplateId::Classic);
    }

    #[test]
    fn test_body_tolerates_missing_sections() {
        let body: ResumeBody = serde_json::from_str(r#"{"summary":"x"}"#).unwrap();
        assert_eq!(body.summary, "x");
        assert!(body.skills.is_empty());
        assert!(body.experiences.is_empty());
        assert!(body.projects.is_empty());
        assert!(body.education.is_empty());
    }

    #[test]
    fn test_document_defaults() {
        let doc: ResumeDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.body.is_none());
        assert_eq!(doc.template_id, TemplateId::Classic);
        assert!(doc.cover_letter.is_empty());
        assert!(doc.header.full_name.is_empty());
    }

    #[test]
    fn test_document_round_trip() {
        let doc = ResumeDocument {
            header: ResumeHeader {
                full_name: "Lina Haddad".into(),
                title: "Software Engineer".into(),
                ..Default::default()
            },
            body: Some(ResumeBody {
                summary: "Engineer.".into(),
                skills: vec!["Rust".into()],
                ..Default::default()
            }),
            template_id: TemplateId::Compact,
            cover_letter: String::new(),
        };
        let json = serde_json::to_string(&doc).unwrap();
        let back: ResumeDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
