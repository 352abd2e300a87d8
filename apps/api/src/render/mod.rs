//! Export renderer — turns the in-memory document into a self-contained,
//! print-ready HTML page.
//!
//! What is in the document is what is exported: there is no separate
//! export model, so an unsaved edit renders exactly as the editor holds
//! it. Empty content is refused rather than rendered blank.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::document::{ResumeBody, ResumeDocument, ResumeHeader, TemplateId};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportMode {
    Resume,
    CoverLetter,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub mode: ExportMode,
    #[serde(default)]
    pub title: Option<String>,
    pub document: ResumeDocument,
}

/// POST /api/v1/export
///
/// Returns `text/html` suitable for the browser print pipeline.
pub async fn handle_export(
    State(_state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let html = match request.mode {
        ExportMode::Resume => {
            let body = request.document.body.as_ref().ok_or_else(|| {
                AppError::MissingInput("nothing to export — the resume body is empty".to_string())
            })?;
            render_resume(
                request.title.as_deref().unwrap_or("Resume"),
                &request.document.header,
                body,
                request.document.template_id,
            )
        }
        ExportMode::CoverLetter => {
            if request.document.cover_letter.trim().is_empty() {
                return Err(AppError::MissingInput(
                    "nothing to export — the cover letter is empty".to_string(),
                ));
            }
            render_cover_letter(&request.document.header, &request.document.cover_letter)
        }
    };

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        html,
    )
        .into_response())
}

/// Page chrome shared by both templates. `compact` tightens type and
/// margins; `classic` is the default single-column layout.
fn page(title: &str, template_id: TemplateId, content: &str) -> String {
    let (font_size, margin) = match template_id {
        TemplateId::Classic => ("11pt", "1in"),
        TemplateId::Compact => ("10pt", "0.6in"),
    };
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
  @page {{ margin: {margin}; }}
  body {{ font-family: Georgia, 'Times New Roman', serif; font-size: {font_size}; color: #111; margin: 0; }}
  h1 {{ font-size: 1.6em; margin: 0; }}
  h2 {{ font-size: 1.05em; text-transform: uppercase; letter-spacing: 0.06em; border-bottom: 1px solid #999; padding-bottom: 2px; margin: 1.1em 0 0.4em; }}
  .contact {{ color: #444; margin: 0.2em 0 0; }}
  .entry {{ margin-bottom: 0.6em; }}
  .entry-head {{ display: flex; justify-content: space-between; }}
  .entry-head .what {{ font-weight: bold; }}
  .entry-head .when {{ color: #444; }}
  ul {{ margin: 0.25em 0 0 1.2em; padding: 0; }}
  li {{ margin-bottom: 0.15em; }}
  .letter {{ white-space: pre-wrap; line-height: 1.45; }}
</style>
</head>
<body>
{content}
</body>
</html>
"#,
        title = escape_html(title),
    )
}

fn render_resume(
    title: &str,
    header: &ResumeHeader,
    body: &ResumeBody,
    template_id: TemplateId,
) -> String {
    let mut content = String::new();
    content.push_str(&header_block(header));

    if !body.summary.trim().is_empty() {
        content.push_str("<h2>Summary</h2>");
        content.push_str(&format!("<p>{}</p>", escape_html(&body.summary)));
    }

    if !body.skills.is_empty() {
        content.push_str("<h2>Technical Skills</h2>");
        let skills = body
            .skills
            .iter()
            .map(|s| escape_html(s))
            .collect::<Vec<_>>()
            .join(" &middot; ");
        content.push_str(&format!("<p>{skills}</p>"));
    }

    if !body.experiences.is_empty() {
        content.push_str("<h2>Experience</h2>");
        for exp in &body.experiences {
            content.push_str("<div class=\"entry\"><div class=\"entry-head\">");
            content.push_str(&format!(
                "<span class=\"what\">{} — {}</span>",
                escape_html(&exp.title),
                escape_html(&exp.company)
            ));
            if let Some(period) = exp.period.as_deref().filter(|p| !p.trim().is_empty()) {
                content.push_str(&format!("<span class=\"when\">{}</span>", escape_html(period)));
            }
            content.push_str("</div>");
            if let Some(location) = exp.location.as_deref().filter(|l| !l.trim().is_empty()) {
                content.push_str(&format!("<div class=\"contact\">{}</div>", escape_html(location)));
            }
            let bullets: Vec<&String> =
                exp.bullets.iter().filter(|b| !b.trim().is_empty()).collect();
            if !bullets.is_empty() {
                content.push_str("<ul>");
                for bullet in bullets {
                    content.push_str(&format!("<li>{}</li>", escape_html(bullet)));
                }
                content.push_str("</ul>");
            }
            content.push_str("</div>");
        }
    }

    if !body.projects.is_empty() {
        content.push_str("<h2>Projects</h2>");
        for project in &body.projects {
            content.push_str("<div class=\"entry\">");
            content.push_str(&format!(
                "<span class=\"what\">{}</span>",
                escape_html(&project.name)
            ));
            if !project.stack.is_empty() {
                let stack = project
                    .stack
                    .iter()
                    .map(|s| escape_html(s))
                    .collect::<Vec<_>>()
                    .join(", ");
                content.push_str(&format!(" <span class=\"when\">({stack})</span>"));
            }
            if let Some(desc) = project.description.as_deref().filter(|d| !d.trim().is_empty()) {
                content.push_str(&format!("<p>{}</p>", escape_html(desc)));
            }
            if let Some(link) = project.link.as_deref().filter(|l| !l.trim().is_empty()) {
                content.push_str(&format!("<div class=\"contact\">{}</div>", escape_html(link)));
            }
            content.push_str("</div>");
        }
    }

    if !body.education.is_empty() {
        content.push_str("<h2>Education</h2>");
        for edu in &body.education {
            content.push_str("<div class=\"entry\"><div class=\"entry-head\">");
            content.push_str(&format!(
                "<span class=\"what\">{} — {}</span>",
                escape_html(&edu.institution),
                escape_html(&edu.degree)
            ));
            if let Some(period) = edu.period.as_deref().filter(|p| !p.trim().is_empty()) {
                content.push_str(&format!("<span class=\"when\">{}</span>", escape_html(period)));
            }
            content.push_str("</div></div>");
        }
    }

    page(title, template_id, &content)
}

fn render_cover_letter(header: &ResumeHeader, cover_letter: &str) -> String {
    let mut content = header_block(header);
    content.push_str(&format!(
        "<div class=\"letter\">{}</div>",
        escape_html(cover_letter)
    ));
    page("Cover letter", TemplateId::Classic, &content)
}

fn header_block(header: &ResumeHeader) -> String {
    let mut block = String::new();
    block.push_str(&format!("<h1>{}</h1>", escape_html(&header.full_name)));
    if !header.title.trim().is_empty() {
        block.push_str(&format!(
            "<div class=\"contact\">{}</div>",
            escape_html(&header.title)
        ));
    }
    let contact: Vec<String> = [
        &header.location,
        &header.email,
        &header.phone,
        &header.linkedin,
        &header.github,
    ]
    .iter()
    .filter(|v| !v.trim().is_empty())
    .map(|v| escape_html(v))
    .collect();
    if !contact.is_empty() {
        block.push_str(&format!(
            "<div class=\"contact\">{}</div>",
            contact.join(" &middot; ")
        ));
    }
    block
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ExperienceItem;

    fn sample_body() -> ResumeBody {
        ResumeBody {
            summary: "Builds things.".into(),
            skills: vec!["Rust".into(), "SQL".into()],
            experiences: vec![ExperienceItem {
                title: "Engineer".into(),
                company: "Acme & Co".into(),
                period: Some("2020–2024".into()),
                location: None,
                bullets: vec!["Cut costs by 30%".into(), "".into()],
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>&"quoted"'</b>"#),
            "&lt;b&gt;&amp;&quot;quoted&quot;&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_resume_render_contains_content_escaped() {
        let header = ResumeHeader {
            full_name: "Sam Odeh".into(),
            ..Default::default()
        };
        let html = render_resume("My CV", &header, &sample_body(), TemplateId::Classic);
        assert!(html.contains("Sam Odeh"));
        assert!(html.contains("Acme &amp; Co"));
        assert!(html.contains("Cut costs by 30%"));
        assert!(html.contains("Rust"));
        // Blank bullets are dropped.
        assert!(!html.contains("<li></li>"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let body = ResumeBody::default();
        let html = render_resume("t", &ResumeHeader::default(), &body, TemplateId::Classic);
        assert!(!html.contains("<h2>"));
    }

    #[test]
    fn test_templates_differ() {
        let header = ResumeHeader::default();
        let classic = render_resume("t", &header, &sample_body(), TemplateId::Classic);
        let compact = render_resume("t", &header, &sample_body(), TemplateId::Compact);
        assert_ne!(classic, compact);
        assert!(classic.contains("11pt"));
        assert!(compact.contains("10pt"));
    }

    #[test]
    fn test_cover_letter_preserves_paragraphs() {
        let html = render_cover_letter(
            &ResumeHeader::default(),
            "Dear Hiring Manager,\n\nFirst paragraph.",
        );
        assert!(html.contains("pre-wrap"));
        assert!(html.contains("Dear Hiring Manager,\n\nFirst paragraph."));
    }
}
