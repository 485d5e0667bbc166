//! Job Analysis: asks the LLM to compare a job posting with a user's skills
//! and produces the `JobAnalysis` record the optimizer consumes.
//!
//! Title, company and description always come from the posting itself; only
//! the skill comparison and requirement extraction come from the model.

pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::json_system_prompt;
use crate::llm_client::LlmClient;
use crate::models::job::JobAnalysis;

use self::prompts::{JOB_ANALYSIS_PROMPT_TEMPLATE, JOB_ANALYSIS_ROLE};

/// The posting a user wants to tailor their resume for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub job_title: String,
    #[serde(default)]
    pub company: Option<String>,
    pub job_description: String,
}

impl JobPosting {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.job_title.trim().is_empty() {
            return Err(AppError::Validation("job_title cannot be empty".to_string()));
        }
        if self.job_description.trim().is_empty() {
            return Err(AppError::Validation(
                "job_description cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// The part of the analysis produced by the model.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobAssessment {
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub key_requirements: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Runs the LLM analysis for a posting against the user's skills.
pub async fn analyze_job(
    llm: &LlmClient,
    posting: &JobPosting,
    user_skills: &[String],
) -> Result<JobAnalysis, AppError> {
    posting.validate()?;

    let prompt = build_analysis_prompt(posting, user_skills)?;
    let system = json_system_prompt(JOB_ANALYSIS_ROLE);

    let assessment: JobAssessment = llm
        .call_json(&prompt, &system)
        .await
        .map_err(|e| AppError::Llm(format!("Job analysis failed: {e}")))?;

    info!(
        "Job analysis for '{}': {} matched, {} missing, {} requirements",
        posting.job_title,
        assessment.matched_skills.len(),
        assessment.missing_skills.len(),
        assessment.key_requirements.len()
    );

    Ok(combine(posting, assessment))
}

/// Merges the posting with the model's assessment, dropping blank list items.
pub fn combine(posting: &JobPosting, assessment: JobAssessment) -> JobAnalysis {
    JobAnalysis {
        job_title: posting.job_title.trim().to_string(),
        company: posting
            .company
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string),
        job_description: posting.job_description.clone(),
        matched_skills: non_blank(assessment.matched_skills),
        missing_skills: non_blank(assessment.missing_skills),
        key_requirements: non_blank(assessment.key_requirements),
        recommendations: non_blank(assessment.recommendations),
    }
}

fn non_blank(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn build_analysis_prompt(posting: &JobPosting, user_skills: &[String]) -> Result<String, AppError> {
    let skills_json = serde_json::to_string(user_skills)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize skills: {e}")))?;

    Ok(JOB_ANALYSIS_PROMPT_TEMPLATE
        .replace("{job_title}", posting.job_title.trim())
        .replace(
            "{company}",
            posting
                .company
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or("Not specified"),
        )
        .replace("{user_skills}", &skills_json)
        .replace("{job_description}", posting.job_description.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_posting() -> JobPosting {
        JobPosting {
            job_title: "  Senior Rust Engineer ".to_string(),
            company: Some(" ".to_string()),
            job_description: "Build distributed systems in Rust.".to_string(),
        }
    }

    #[test]
    fn test_combine_takes_identity_fields_from_posting() {
        let assessment = JobAssessment {
            matched_skills: vec!["Rust".to_string(), "  ".to_string()],
            missing_skills: vec![" Kafka ".to_string()],
            key_requirements: vec!["distributed systems".to_string()],
            recommendations: vec![],
        };
        let analysis = combine(&make_posting(), assessment);

        assert_eq!(analysis.job_title, "Senior Rust Engineer");
        assert!(analysis.company.is_none(), "blank company becomes None");
        assert_eq!(analysis.job_description, "Build distributed systems in Rust.");
        assert_eq!(analysis.matched_skills, vec!["Rust"]);
        assert_eq!(analysis.missing_skills, vec!["Kafka"]);
    }

    #[test]
    fn test_assessment_tolerates_missing_lists() {
        let assessment: JobAssessment =
            serde_json::from_str(r#"{"matched_skills": ["Go"]}"#).unwrap();
        assert_eq!(assessment.matched_skills, vec!["Go"]);
        assert!(assessment.key_requirements.is_empty());
    }

    #[test]
    fn test_prompt_fills_every_placeholder() {
        let prompt =
            build_analysis_prompt(&make_posting(), &["Rust".to_string(), "SQL".to_string()])
                .unwrap();
        assert!(prompt.contains("Job title: Senior Rust Engineer"));
        assert!(prompt.contains(r#"["Rust","SQL"]"#));
        assert!(prompt.contains("Build distributed systems in Rust."));
        for placeholder in ["{job_title}", "{company}", "{job_description}", "{user_skills}"] {
            assert!(!prompt.contains(placeholder), "{placeholder} left unfilled");
        }
    }

    #[test]
    fn test_validate_rejects_empty_description() {
        let posting = JobPosting {
            job_description: "   ".to_string(),
            ..make_posting()
        };
        assert!(matches!(posting.validate(), Err(AppError::Validation(_))));
    }
}
