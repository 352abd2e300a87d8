//! Patch reducer for the resume document.
//!
//! Every edit the section editors can make is a `DocumentPatch` variant;
//! `apply` folds one patch into a document and returns the new document.
//! Illegal partial states are unrepresentable and a patch that misses
//! (wrong index, absent body) is a silent no-op rather than an error,
//! matching the editor contract: the UI never sees a failed edit, it sees
//! the unchanged document.

use serde::{Deserialize, Serialize};

use super::{EducationItem, ExperienceItem, ProjectItem, ResumeBody, ResumeDocument, TemplateId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceField {
    Title,
    Company,
    Period,
    Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectField {
    Name,
    Description,
    Link,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationField {
    Institution,
    Degree,
    Location,
    Period,
}

/// One section edit. `move_*` targets are signed so a "move up from index 0"
/// request arrives as `to: -1` and lands in the out-of-range no-op path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DocumentPatch {
    SetHeader { header: super::ResumeHeader },
    SetTemplate { template_id: TemplateId },
    SetCoverLetter { text: String },
    ReplaceBody { body: Option<ResumeBody> },

    SetSummary { text: String },

    AddSkill { skill: String },
    RemoveSkill { index: usize },
    MoveSkill { from: usize, to: isize },

    AddExperience,
    RemoveExperience { index: usize },
    MoveExperience { from: usize, to: isize },
    SetExperienceField { index: usize, field: ExperienceField, value: String },
    AddBullet { experience: usize, text: String },
    SetBullet { experience: usize, bullet: usize, text: String },
    RemoveBullet { experience: usize, bullet: usize },

    AddProject,
    RemoveProject { index: usize },
    MoveProject { from: usize, to: isize },
    SetProjectField { index: usize, field: ProjectField, value: String },
    AddStackTag { project: usize, tag: String },
    RemoveStackTag { project: usize, index: usize },

    AddEducation,
    RemoveEducation { index: usize },
    MoveEducation { from: usize, to: isize },
    SetEducationField { index: usize, field: EducationField, value: String },
}

/// Folds one patch into the document. Pure: the only state is the argument.
pub fn apply(mut doc: ResumeDocument, patch: DocumentPatch) -> ResumeDocument {
    match patch {
        DocumentPatch::SetHeader { header } => doc.header = header,
        DocumentPatch::SetTemplate { template_id } => doc.template_id = template_id,
        DocumentPatch::SetCoverLetter { text } => doc.cover_letter = text,
        DocumentPatch::ReplaceBody { body } => doc.body = body,
        other => {
            // Section edits require a body; before the first build/import
            // there is nothing to edit.
            if let Some(body) = doc.body.as_mut() {
                apply_to_body(body, other);
            }
        }
    }
    doc
}

fn apply_to_body(body: &mut ResumeBody, patch: DocumentPatch) {
    match patch {
        DocumentPatch::SetSummary { text } => body.summary = text,

        DocumentPatch::AddSkill { skill } => add_tag(&mut body.skills, &skill),
        DocumentPatch::RemoveSkill { index } => remove_item(&mut body.skills, index),
        DocumentPatch::MoveSkill { from, to } => move_item(&mut body.skills, from, to),

        DocumentPatch::AddExperience => body.experiences.push(ExperienceItem {
            bullets: vec![String::new()],
            ..Default::default()
        }),
        DocumentPatch::RemoveExperience { index } => remove_item(&mut body.experiences, index),
        DocumentPatch::MoveExperience { from, to } => move_item(&mut body.experiences, from, to),
        DocumentPatch::SetExperienceField { index, field, value } => {
            if let Some(exp) = body.experiences.get_mut(index) {
                match field {
                    ExperienceField::Title => exp.title = value,
                    ExperienceField::Company => exp.company = value,
                    ExperienceField::Period => exp.period = Some(value),
                    ExperienceField::Location => exp.location = Some(value),
                }
            }
        }
        DocumentPatch::AddBullet { experience, text } => {
            if let Some(exp) = body.experiences.get_mut(experience) {
                exp.bullets.push(text);
            }
        }
        DocumentPatch::SetBullet { experience, bullet, text } => {
            if let Some(slot) = body
                .experiences
                .get_mut(experience)
                .and_then(|e| e.bullets.get_mut(bullet))
            {
                *slot = text;
            }
        }
        DocumentPatch::RemoveBullet { experience, bullet } => {
            if let Some(exp) = body.experiences.get_mut(experience) {
                remove_item(&mut exp.bullets, bullet);
            }
        }

        DocumentPatch::AddProject => body.projects.push(ProjectItem::default()),
        DocumentPatch::RemoveProject { index } => remove_item(&mut body.projects, index),
        DocumentPatch::MoveProject { from, to } => move_item(&mut body.projects, from, to),
        DocumentPatch::SetProjectField { index, field, value } => {
            if let Some(project) = body.projects.get_mut(index) {
                match field {
                    ProjectField::Name => project.name = value,
                    ProjectField::Description => project.description = Some(value),
                    ProjectField::Link => project.link = Some(value),
                }
            }
        }
        DocumentPatch::AddStackTag { project, tag } => {
            if let Some(project) = body.projects.get_mut(project) {
                add_tag(&mut project.stack, &tag);
            }
        }
        DocumentPatch::RemoveStackTag { project, index } => {
            if let Some(project) = body.projects.get_mut(project) {
                remove_item(&mut project.stack, index);
            }
        }

        DocumentPatch::AddEducation => body.education.push(EducationItem::default()),
        DocumentPatch::RemoveEducation { index } => remove_item(&mut body.education, index),
        DocumentPatch::MoveEducation { from, to } => move_item(&mut body.education, from, to),
        DocumentPatch::SetEducationField { index, field, value } => {
            if let Some(edu) = body.education.get_mut(index) {
                match field {
                    EducationField::Institution => edu.institution = value,
                    EducationField::Degree => edu.degree = value,
                    EducationField::Location => edu.location = Some(value),
                    EducationField::Period => edu.period = Some(value),
                }
            }
        }

        // Document-level patches are routed in `apply` and never reach here.
        DocumentPatch::SetHeader { .. }
        | DocumentPatch::SetTemplate { .. }
        | DocumentPatch::SetCoverLetter { .. }
        | DocumentPatch::ReplaceBody { .. } => {}
    }
}

/// Remove+insert move. Any out-of-range endpoint makes the whole move a no-op.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: isize) {
    if from >= items.len() || to < 0 || to as usize >= items.len() {
        return;
    }
    let item = items.remove(from);
    items.insert(to as usize, item);
}

fn remove_item<T>(items: &mut Vec<T>, index: usize) {
    if index < items.len() {
        items.remove(index);
    }
}

/// Tag insertion: trimmed, blank input and case-insensitive duplicates are
/// dropped silently.
pub fn add_tag(tags: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        return;
    }
    let exists = tags.iter().any(|t| t.eq_ignore_ascii_case(value));
    if exists {
        return;
    }
    tags.push(value.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ResumeHeader;

    fn doc_with_skills(skills: &[&str]) -> ResumeDocument {
        ResumeDocument {
            body: Some(ResumeBody {
                skills: skills.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn skills(doc: &ResumeDocument) -> Vec<String> {
        doc.body.as_ref().unwrap().skills.clone()
    }

    #[test]
    fn test_add_skill_dedupe_is_case_insensitive_and_idempotent() {
        let doc = doc_with_skills(&[]);
        let doc = apply(doc, DocumentPatch::AddSkill { skill: "React".into() });
        let after_first = skills(&doc);
        let doc = apply(doc, DocumentPatch::AddSkill { skill: "react".into() });
        assert_eq!(skills(&doc), after_first);
        assert_eq!(after_first, vec!["React".to_string()]);
    }

    #[test]
    fn test_add_skill_trims_and_ignores_blank() {
        let doc = doc_with_skills(&[]);
        let doc = apply(doc, DocumentPatch::AddSkill { skill: "  Rust  ".into() });
        assert_eq!(skills(&doc), vec!["Rust".to_string()]);
        let doc = apply(doc, DocumentPatch::AddSkill { skill: "   ".into() });
        assert_eq!(skills(&doc), vec!["Rust".to_string()]);
    }

    #[test]
    fn test_adjacent_move_is_self_inverse() {
        let original = vec!["a", "b", "c", "d"];
        let mut items: Vec<String> = original.iter().map(|s| s.to_string()).collect();
        move_item(&mut items, 2, 1);
        assert_eq!(items, vec!["a", "c", "b", "d"]);
        move_item(&mut items, 1, 2);
        assert_eq!(items, original);
    }

    #[test]
    fn test_move_out_of_range_is_noop() {
        let mut items = vec!["a".to_string(), "b".to_string()];
        move_item(&mut items, 0, -1);
        assert_eq!(items, vec!["a", "b"]);
        move_item(&mut items, 0, 2);
        assert_eq!(items, vec!["a", "b"]);
        move_item(&mut items, 5, 0);
        assert_eq!(items, vec!["a", "b"]);
    }

    #[test]
    fn test_section_patches_without_body_are_noops() {
        let doc = ResumeDocument::default();
        let doc = apply(doc, DocumentPatch::AddSkill { skill: "Rust".into() });
        assert!(doc.body.is_none());
        let doc = apply(doc, DocumentPatch::AddExperience);
        assert!(doc.body.is_none());
    }

    #[test]
    fn test_header_patch_applies_without_body() {
        let doc = ResumeDocument::default();
        let doc = apply(
            doc,
            DocumentPatch::SetHeader {
                header: ResumeHeader {
                    full_name: "Omar Said".into(),
                    ..Default::default()
                },
            },
        );
        assert_eq!(doc.header.full_name, "Omar Said");
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let doc = doc_with_skills(&["a", "b"]);
        let doc = apply(doc, DocumentPatch::RemoveSkill { index: 7 });
        assert_eq!(skills(&doc), vec!["a", "b"]);
    }

    #[test]
    fn test_experience_field_and_bullet_edits() {
        let doc = doc_with_skills(&[]);
        let doc = apply(doc, DocumentPatch::AddExperience);
        let doc = apply(
            doc,
            DocumentPatch::SetExperienceField {
                index: 0,
                field: ExperienceField::Company,
                value: "Acme".into(),
            },
        );
        let doc = apply(
            doc,
            DocumentPatch::SetBullet {
                experience: 0,
                bullet: 0,
                text: "Shipped the thing".into(),
            },
        );
        let doc = apply(
            doc,
            DocumentPatch::AddBullet {
                experience: 0,
                text: "Cut build times in half".into(),
            },
        );
        let body = doc.body.as_ref().unwrap();
        assert_eq!(body.experiences[0].company, "Acme");
        assert_eq!(
            body.experiences[0].bullets,
            vec!["Shipped the thing", "Cut build times in half"]
        );

        // Targeting a missing experience index changes nothing.
        let doc = apply(
            doc,
            DocumentPatch::SetBullet {
                experience: 3,
                bullet: 0,
                text: "lost".into(),
            },
        );
        assert_eq!(doc.body.as_ref().unwrap().experiences[0].bullets.len(), 2);
    }

    #[test]
    fn test_stack_tags_follow_skill_dedupe_rule() {
        let doc = doc_with_skills(&[]);
        let doc = apply(doc, DocumentPatch::AddProject);
        let doc = apply(doc, DocumentPatch::AddStackTag { project: 0, tag: "Rust".into() });
        let doc = apply(doc, DocumentPatch::AddStackTag { project: 0, tag: "RUST".into() });
        assert_eq!(doc.body.as_ref().unwrap().projects[0].stack, vec!["Rust"]);
    }

    #[test]
    fn test_replace_body_installs_and_clears() {
        let doc = ResumeDocument::default();
        let doc = apply(
            doc,
            DocumentPatch::ReplaceBody {
                body: Some(ResumeBody {
                    summary: "hello".into(),
                    ..Default::default()
                }),
            },
        );
        assert_eq!(doc.body.as_ref().unwrap().summary, "hello");
        let doc = apply(doc, DocumentPatch::ReplaceBody { body: None });
        assert!(doc.body.is_none());
    }

    #[test]
    fn test_patch_serde_wire_shape() {
        let patch: DocumentPatch =
            serde_json::from_str(r#"{"op":"move_skill","from":0,"to":-1}"#).unwrap();
        assert_eq!(patch, DocumentPatch::MoveSkill { from: 0, to: -1 });
        let patch: DocumentPatch =
            serde_json::from_str(r#"{"op":"set_experience_field","index":1,"field":"company","value":"Acme"}"#)
                .unwrap();
        assert_eq!(
            patch,
            DocumentPatch::SetExperienceField {
                index: 1,
                field: ExperienceField::Company,
                value: "Acme".into()
            }
        );
    }
}
