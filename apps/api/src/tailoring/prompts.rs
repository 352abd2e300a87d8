// Prompt constants for the tailoring endpoint.

pub const TAILOR_SYSTEM: &str =
    "You are an ATS optimization assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object.";

/// Tailoring template. Replace `{resume_json}` and `{job_input}`.
/// `job_input` is pasted text (possibly containing a link) — it is never
/// fetched; the model works from whatever text is present.
pub const TAILOR_PROMPT_TEMPLATE: &str = r#"Tailor the resume below to the job posting below.

Tasks:
1. Rewrite the resume so its summary, skill ordering, and bullet emphasis match the job, without inventing experience the resume does not contain.
2. Estimate an ATS match score between 0 and 100 for the TAILORED resume against this job. Use null if the job text is too thin to score.
3. List the job's skills that are missing from the resume entirely.
4. List the job's keywords already present in the tailored resume.
5. List the job's keywords still missing from the tailored resume.
6. Extract the job title and company name if the posting states them, else null.

Return ONLY valid JSON with this EXACT structure:

{
  "tailored_resume_json": <same structure as the input resume JSON>,
  "ats_score": number | null,
  "missing_skills": string[],
  "present_keywords": string[],
  "missing_keywords": string[],
  "job_title": string | null,
  "job_company": string | null
}

Resume JSON:
{resume_json}

Job posting:
{job_input}"#;
