/// Role description for job analysis. Combined with the JSON-only instruction.
pub const JOB_ANALYSIS_ROLE: &str = "You are an experienced technical recruiter and resume strategist. \
    You compare a candidate's skills with a job posting and extract the posting's requirements.";

/// Job analysis prompt. Replace `{job_title}`, `{company}`, `{job_description}`
/// and `{user_skills}` before sending.
pub const JOB_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the job posting below against the candidate's skills.

Job title: {job_title}
Company: {company}

Job description:
{job_description}

Candidate skills (JSON array):
{user_skills}

Return a JSON object with this EXACT schema (no extra fields):
{
  "matched_skills": ["skills from the candidate list that the posting asks for"],
  "missing_skills": ["skills the posting asks for that the candidate does not list"],
  "key_requirements": ["short requirement phrases, e.g. '5+ years backend development'"],
  "recommendations": ["concrete suggestions to tailor the resume for this posting"]
}

Rules:
- matched_skills must use the candidate's own spelling of each skill.
- key_requirements must be phrases taken from or closely paraphrasing the posting.
- Keep each list to at most 15 items."#;
