use serde::{Deserialize, Serialize};

/// Structured summary of a job posting, produced upstream (LLM analysis) and
/// treated as read-only for the duration of one optimization run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobAnalysis {
    pub job_title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub job_description: String,
    /// Skills the candidate has that the posting asks for.
    #[serde(default)]
    pub matched_skills: Vec<String>,
    /// Skills the posting asks for that the candidate has not listed.
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub key_requirements: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl JobAnalysis {
    /// All key requirements, lowercased and joined with single spaces.
    pub fn requirements_text(&self) -> String {
        join_lowercase(&self.key_requirements)
    }

    /// All matched skills, lowercased and joined with single spaces.
    pub fn matched_skills_text(&self) -> String {
        join_lowercase(&self.matched_skills)
    }
}

fn join_lowercase(items: &[String]) -> String {
    items
        .iter()
        .map(|s| s.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_analysis_lists_default_to_empty() {
        let json = r#"{"job_title": "Backend Engineer"}"#;
        let analysis: JobAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.job_title, "Backend Engineer");
        assert!(analysis.company.is_none());
        assert!(analysis.matched_skills.is_empty());
        assert!(analysis.key_requirements.is_empty());
        assert!(analysis.job_description.is_empty());
    }

    #[test]
    fn test_requirements_text_is_lowercase_and_space_joined() {
        let analysis = JobAnalysis {
            key_requirements: vec!["5+ years Rust".to_string(), "Kubernetes".to_string()],
            ..Default::default()
        };
        assert_eq!(analysis.requirements_text(), "5+ years rust kubernetes");
    }

    #[test]
    fn test_matched_skills_text_empty_when_no_skills() {
        assert_eq!(JobAnalysis::default().matched_skills_text(), "");
    }
}
