//! Resume Optimizer: scores every profile entry against a job analysis, then
//! filters, ranks and truncates each category.
//!
//! No I/O. Inputs are borrowed and never mutated; the output owns clones of the
//! surviving entries. All sorts are stable, so identical inputs always produce
//! identical output.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::job::JobAnalysis;
use crate::models::profile::{
    CertificationEntry, EducationEntry, PersonalInfo, UserProfileData, WorkExperienceEntry,
};
use crate::optimization::relevance::{
    score_certification, score_education, score_skill, score_work_experience, RelevanceScore,
};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredWorkExperience {
    pub entry: WorkExperienceEntry,
    pub relevance: RelevanceScore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEducation {
    pub entry: EducationEntry,
    pub relevance: RelevanceScore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCertification {
    pub entry: CertificationEntry,
    pub relevance: RelevanceScore,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizedSkill {
    pub name: String,
    pub is_matched: bool,
    pub is_high_priority: bool,
    pub score: u32,
}

/// Filtered, ranked resume content for one job. Consumed by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedResumeContent {
    pub personal_info: PersonalInfo,
    pub work_experiences: Vec<ScoredWorkExperience>,
    pub skills: Vec<OptimizedSkill>,
    pub education: Vec<ScoredEducation>,
    pub certifications: Vec<ScoredCertification>,
    pub summary: Option<String>,
}

/// Minimum scores and maximum counts per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    pub min_work_experience_score: u32,
    pub max_work_experiences: Option<usize>,
    pub min_skill_score: u32,
    pub max_skills: Option<usize>,
    pub min_education_score: u32,
    pub max_education: Option<usize>,
    pub min_certification_score: u32,
    pub max_certifications: Option<usize>,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            min_work_experience_score: 30,
            max_work_experiences: Some(5),
            min_skill_score: 60,
            max_skills: Some(15),
            min_education_score: 40,
            max_education: None,
            min_certification_score: 50,
            max_certifications: Some(8),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Optimization
// ────────────────────────────────────────────────────────────────────────────

/// Optimizes a profile for a job using the default thresholds and limits.
pub fn optimize_resume_for_job(
    job: &JobAnalysis,
    user_data: &UserProfileData,
) -> OptimizedResumeContent {
    optimize_with_settings(job, user_data, &OptimizerSettings::default())
}

/// Optimizes a profile for a job.
///
/// Per category: score every entry, drop entries below the minimum score,
/// sort (stable) by the category's ranking key, truncate to the limit.
pub fn optimize_with_settings(
    job: &JobAnalysis,
    user_data: &UserProfileData,
    settings: &OptimizerSettings,
) -> OptimizedResumeContent {
    let work_experiences = select_ranked(
        user_data
            .work_experience
            .iter()
            .map(|entry| ScoredWorkExperience {
                relevance: score_work_experience(entry, job),
                entry: entry.clone(),
            })
            .collect(),
        |scored| scored.relevance.score,
        settings.min_work_experience_score,
        settings.max_work_experiences,
    );

    let skills = select_skills(&user_data.skills, job, settings);

    let education = select_ranked(
        user_data
            .education
            .iter()
            .map(|entry| ScoredEducation {
                relevance: score_education(entry, job),
                entry: entry.clone(),
            })
            .collect(),
        |scored| scored.relevance.score,
        settings.min_education_score,
        settings.max_education,
    );

    let certifications = select_ranked(
        user_data
            .certifications
            .iter()
            .map(|entry| ScoredCertification {
                relevance: score_certification(entry, job),
                entry: entry.clone(),
            })
            .collect(),
        |scored| scored.relevance.score,
        settings.min_certification_score,
        settings.max_certifications,
    );

    debug!(
        "Optimized resume for '{}': experience {}/{}, skills {}/{}, education {}/{}, certifications {}/{}",
        job.job_title,
        work_experiences.len(),
        user_data.work_experience.len(),
        skills.len(),
        user_data.skills.len(),
        education.len(),
        user_data.education.len(),
        certifications.len(),
        user_data.certifications.len(),
    );

    OptimizedResumeContent {
        personal_info: user_data.personal_info.clone(),
        work_experiences,
        skills,
        education,
        certifications,
        // Existing summary is kept as-is; not derived from the job analysis.
        summary: user_data.professional_summary.clone(),
    }
}

/// Ranking for skills: matched first, then high-priority, then higher score.
pub fn compare_skills(a: &OptimizedSkill, b: &OptimizedSkill) -> Ordering {
    b.is_matched
        .cmp(&a.is_matched)
        .then_with(|| b.is_high_priority.cmp(&a.is_high_priority))
        .then_with(|| b.score.cmp(&a.score))
}

fn select_skills(
    skills: &[String],
    job: &JobAnalysis,
    settings: &OptimizerSettings,
) -> Vec<OptimizedSkill> {
    let mut kept: Vec<OptimizedSkill> = skills
        .iter()
        .map(|name| {
            let scored = score_skill(name, job);
            OptimizedSkill {
                name: name.clone(),
                is_matched: scored.is_matched,
                is_high_priority: scored.is_high_priority,
                score: scored.score,
            }
        })
        .filter(|skill| skill.score >= settings.min_skill_score)
        .collect();

    kept.sort_by(compare_skills);
    if let Some(limit) = settings.max_skills {
        kept.truncate(limit);
    }
    kept
}

/// Keeps items scoring at least `min_score`, sorted descending by score, truncated to `limit`.
fn select_ranked<T>(
    items: Vec<T>,
    score_of: impl Fn(&T) -> u32,
    min_score: u32,
    limit: Option<usize>,
) -> Vec<T> {
    let mut kept: Vec<T> = items
        .into_iter()
        .filter(|item| score_of(item) >= min_score)
        .collect();

    kept.sort_by(|a, b| score_of(b).cmp(&score_of(a)));
    if let Some(limit) = limit {
        kept.truncate(limit);
    }
    kept
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
