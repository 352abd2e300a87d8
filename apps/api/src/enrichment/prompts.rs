// All prompt constants for the enrichment endpoints.
// Templates carry `{placeholder}` slots filled with .replace() before sending.

/// JSON schema fragment shared by every prompt that returns a full resume
/// body. Field names match the `ResumeBody` serde representation exactly.
pub const RESUME_BODY_SCHEMA: &str = r#"{
  "summary": string,
  "skills": string[],
  "experiences": [
    {
      "title": string,
      "company": string,
      "period": string,
      "location": string,
      "bullets": string[]
    }
  ],
  "projects": [
    {
      "name": string,
      "description": string,
      "stack": string[],
      "link": string
    }
  ],
  "education": [
    {
      "institution": string,
      "degree": string,
      "location": string,
      "period": string
    }
  ]
}"#;

pub const BUILD_SYSTEM: &str =
    "You generate ATS-optimized resumes in JSON for software professionals. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object.";

/// Build-from-answers template. Replace `{schema}` and `{answers}`.
pub const BUILD_PROMPT_TEMPLATE: &str = r#"You are an expert resume writer.

The user has answered several guided-interview questions about their experience. Your tasks:

1. Interpret the answers and phrase everything as professional resume English. Do NOT alter technology names.
2. Write a concise professional summary (2-3 sentences) suitable for ATS screening. No personal information.
3. Infer a flat list of technical skills: languages, frameworks, libraries, tooling, and practices the answers support.
4. Write 3-6 bullet points per role focusing on impact and measurable outcomes where possible (e.g. "reduced load time by 30%").
5. Extract education if mentioned (institution, degree, location, period).
6. Extract any concrete projects with their stack.

Return ONLY valid JSON with this structure:

{schema}

User answers:
{answers}"#;

pub const IMPORT_SYSTEM: &str =
    "You convert unstructured resumes into JSON. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object.";

/// Import template. Replace `{schema}` and `{resume_text}`.
pub const IMPORT_PROMPT_TEMPLATE: &str = r#"Convert the following existing resume into structured JSON.

Tasks:
1. Interpret all content and phrase it as professional resume English. Do NOT alter technology names.
2. Extract a concise professional summary (2-3 sentences).
3. Extract technical skills as a flat list.
4. Extract work experience entries with title, company, period, location (if present) and bullet points.
5. Extract projects with name, description, and technology stack.
6. Extract education entries.

Return ONLY valid JSON with this structure:

{schema}

Raw resume text:
{resume_text}"#;

pub const REFINE_SYSTEM: &str =
    "You refine resumes, returning JSON in the exact same structure as the input. \
    You MUST respond with valid JSON only.";

/// Whole-resume tone refinement. Replace `{tone_description}` and `{resume_json}`.
pub const REFINE_PROMPT_TEMPLATE: &str = r#"You are refining a resume JSON document.

Rewrite the following fields:
- summary
- experience bullets
- project descriptions

Rules:
- Keep the overall structure and factual content.
- Use {tone_description}.
- Do NOT invent new jobs or projects.
- You may add light quantification (e.g. "improved load time by 20%") ONLY if it is strongly implied.

Return ONLY valid JSON with the same structure as the input resume JSON.

Current resume JSON:
{resume_json}"#;

pub const IMPROVE_SUMMARY_SYSTEM: &str =
    "You rewrite resume summaries for software engineers. Be concise and impact-focused.";

/// Summary rewrite. Replace `{summary}` and `{tone_hint}`. Plain-text response.
pub const IMPROVE_SUMMARY_TEMPLATE: &str = r#"You are helping an engineer rewrite their resume summary.

Original summary:
"{summary}"

Rewrite this as a single resume summary paragraph, {tone_hint}.
- Keep it 3-4 lines.
- Do not add personal details.
Return ONLY the rewritten summary text."#;

pub const IMPROVE_BULLETS_SYSTEM: &str =
    "You rewrite resume bullet points for software engineers. Focus on measurable impact.";

/// Bullet rewrite for one role. Replace `{title}`, `{company}`, `{period}`,
/// `{bullets}`, `{tone_hint}`. Numbered-list response.
pub const IMPROVE_BULLETS_TEMPLATE: &str = r#"You are helping an engineer rewrite the bullet points for a single job on their resume.

Job:
- Title: {title}
- Company: {company}
- Period: {period}

Current bullet points:
{bullets}

Rewrite these bullet points to be {tone_hint}.
Guidelines:
- Return 3-6 bullet points.
- Each bullet should start with a strong verb.
- Focus on impact, metrics, and technologies used.
Return ONLY the new bullet points as a numbered list."#;

pub const SUGGEST_BULLETS_SYSTEM: &str =
    "You write concise, impact-focused resume bullet points for software engineers. \
    You MUST respond with valid JSON only.";

/// New-bullet suggestions for one role. Replace `{title}`, `{company}`,
/// `{period}`, `{location}`, `{tech_stack}`, `{existing_bullets}`,
/// `{job_snippet}`.
pub const SUGGEST_BULLETS_TEMPLATE: &str = r#"You are generating strong resume bullet points for one experience entry.

Context:
- Title: {title}
- Company: {company}
- Period: {period}
- Location: {location}
- Tech stack: {tech_stack}
- Existing bullets:
{existing_bullets}

Job description snippet (if any):
{job_snippet}

Tasks:
1. Propose 3-5 NEW bullet points for this job that:
   - Are concise, one line each.
   - Use strong action verbs.
   - Focus on measurable impact when possible.
2. Do NOT repeat existing bullets.

Return ONLY valid JSON:

{
  "bullets": string[]
}"#;

pub const COVER_LETTER_SYSTEM: &str =
    "You are a precise assistant that writes clean, ATS-friendly cover letter text. \
    Output plain text only, no markdown, no bullet lists.";

/// Cover letter from tracked job title/company. Replace `{target_role_line}`,
/// `{full_name}`, `{title}`, `{location}`, `{summary}`, `{skills}`,
/// `{experience_lines}`, `{tone_hint}`.
pub const COVER_LETTER_TEMPLATE: &str = r#"Write a cover letter {target_role_line}.

Candidate:
- Name: {full_name}
- Title: {title}
- Location: {location}

Summary:
{summary}

Key skills:
{skills}

Experience highlights:
{experience_lines}

Tone:
- Use a {tone_hint}

Formatting rules:
- Return plain text ONLY (no markdown, no bullet lists, no code fences).
- Include a greeting (e.g. "Dear Hiring Manager,").
- 3-5 short paragraphs.
- End with a professional closing like "Sincerely," followed by the candidate's name ({full_name}).
- Do NOT include the date or a company address block at the top.
- Do NOT include the candidate's email or phone in the body."#;

/// Cover letter targeted at a full pasted job description. Replace
/// `{full_name}`, `{title}`, `{location}`, `{resume_json}`,
/// `{job_description}`, `{tone_hint}`.
pub const COVER_LETTER_FROM_JOB_TEMPLATE: &str = r#"Write a cover letter for a candidate applying to the job below.

Candidate:
- Name: {full_name}
- Title: {title}
- Location: {location}

Resume JSON:
{resume_json}

Job description:
{job_description}

Write a 3-4 paragraph cover letter that:
- Is targeted to this specific job.
- Highlights the most relevant experience and stack from the resume.
- Uses a {tone_hint}
- Does NOT include a street address or overly personal details.
- Uses a simple sign-off like: "Best regards, {full_name}".

Return ONLY the plain text cover letter. No JSON, no explanations."#;
