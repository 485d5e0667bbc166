//! Relevance Scoring: rates one profile entry against a `JobAnalysis`.
//!
//! Pure, deterministic heuristics: keyword and phrase overlap, title synonyms,
//! degree level and institution lookups. No I/O and no shared state, so every
//! function here is safe to call from any request concurrently.
//!
//! All text comparisons are case-insensitive. Empty text never matches.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::job::JobAnalysis;
use crate::models::profile::{CertificationEntry, EducationEntry, WorkExperienceEntry};

pub const MAX_SCORE: u32 = 100;

// ────────────────────────────────────────────────────────────────────────────
// Lookup tables
// ────────────────────────────────────────────────────────────────────────────

/// Title words treated as interchangeable when comparing role titles.
const TITLE_SYNONYM_GROUPS: &[&[&str]] = &[
    &["manager", "supervisor", "lead", "director", "coordinator"],
    &["developer", "engineer", "programmer", "analyst", "architect"],
    &["designer", "artist", "creative", "visual"],
    &["specialist", "expert", "consultant", "advisor"],
    &["assistant", "associate", "coordinator", "support"],
];

const INDUSTRY_KEYWORDS: &[&str] = &[
    "tech",
    "software",
    "finance",
    "healthcare",
    "marketing",
    "sales",
    "education",
];

/// Skills that imply familiarity with one another.
const RELATED_SKILL_GROUPS: &[&[&str]] = &[
    &["javascript", "typescript", "react", "node.js", "angular", "vue"],
    &["python", "django", "flask", "fastapi"],
    &["java", "spring", "hibernate"],
    &["project management", "agile", "scrum", "kanban"],
    &["data analysis", "sql", "excel", "tableau", "power bi"],
];

const PRESTIGIOUS_INSTITUTIONS: &[&str] = &[
    "harvard",
    "mit",
    "stanford",
    "berkeley",
    "yale",
    "princeton",
    "oxford",
    "cambridge",
    "caltech",
    "carnegie mellon",
];

// Work experience weights
const TITLE_EXACT_POINTS: u32 = 30;
const TITLE_SYNONYM_POINTS: u32 = 20;
const TITLE_INDUSTRY_POINTS: u32 = 10;
const SKILL_MENTION_POINTS: u32 = 8;
const SKILL_MENTION_CAP: u32 = 40;
const REQUIREMENT_POINTS: u32 = 5;
const REQUIREMENT_CAP: u32 = 20;
const COMPANY_POINTS: u32 = 10;

// Skill tiers (first match wins)
const SKILL_MATCHED: u32 = 100;
const SKILL_MISSING: u32 = 90;
const SKILL_REQUIRED: u32 = 80;
const SKILL_RELATED: u32 = 70;
const SKILL_BASE: u32 = 50;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// Clamped 0–100 score plus the reasons that contributed, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevanceScore {
    pub score: u32,
    pub reasons: Vec<String>,
}

impl RelevanceScore {
    fn clamped(total: u32, reasons: Vec<String>) -> Self {
        Self {
            score: total.min(MAX_SCORE),
            reasons,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillScore {
    pub score: u32,
    pub is_matched: bool,
    pub is_high_priority: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring functions
// ────────────────────────────────────────────────────────────────────────────

/// Scores a work experience entry.
///
/// Contributions (summed, then capped at 100):
/// - title: exact/containment +30, else synonym group +20, else shared industry keyword +10
/// - matched skills mentioned in description or title: 8 each, capped at 40
/// - key requirements mentioned in description or title: 5 each, capped at 20
/// - company names contain one another: +10
pub fn score_work_experience(entry: &WorkExperienceEntry, job: &JobAnalysis) -> RelevanceScore {
    let mut total = 0;
    let mut reasons = Vec::new();

    let position = normalize(&entry.position);
    let job_title = normalize(&job.job_title);
    let description = normalize(&entry.description);

    if let Some((points, reason)) = title_match(&position, &job_title) {
        total += points;
        reasons.push(reason.to_string());
    }

    let skill_mentions = count_mentions(&[&description, &position], &job.matched_skills);
    if skill_mentions > 0 {
        total += (skill_mentions * SKILL_MENTION_POINTS).min(SKILL_MENTION_CAP);
        reasons.push(format!("Mentions {skill_mentions} relevant skill(s)"));
    }

    let requirement_hits = count_mentions(&[&description, &position], &job.key_requirements);
    if requirement_hits > 0 {
        total += (requirement_hits * REQUIREMENT_POINTS).min(REQUIREMENT_CAP);
        reasons.push(format!("Aligns with {requirement_hits} key requirement(s)"));
    }

    let company = normalize(&entry.company);
    let target_company = normalize(job.company.as_deref().unwrap_or_default());
    if contains(&company, &target_company) || contains(&target_company, &company) {
        total += COMPANY_POINTS;
        reasons.push("Relevant company experience".to_string());
    }

    RelevanceScore::clamped(total, reasons)
}

/// Scores a single skill name. The first matching tier wins; tiers never add up.
pub fn score_skill(skill_name: &str, job: &JobAnalysis) -> SkillScore {
    let skill = normalize(skill_name);

    let is_matched = in_list(&skill, &job.matched_skills);
    let is_missing = in_list(&skill, &job.missing_skills);
    let is_in_requirements = contains(&job.requirements_text(), &skill);

    let (score, is_high_priority) = if is_matched {
        (SKILL_MATCHED, true)
    } else if is_missing {
        (SKILL_MISSING, true)
    } else if is_in_requirements {
        (SKILL_REQUIRED, true)
    } else if is_related_to_matched(&skill, &job.matched_skills) {
        (SKILL_RELATED, false)
    } else {
        (SKILL_BASE, false)
    };

    SkillScore {
        score,
        is_matched,
        is_high_priority,
    }
}

/// Scores an education entry from a base of 40.
pub fn score_education(entry: &EducationEntry, job: &JobAnalysis) -> RelevanceScore {
    let mut total = 40;
    let mut reasons = Vec::new();

    let description = normalize(&job.job_description);
    let requirements = job.requirements_text();
    let field = normalize(&entry.field_of_study);
    let degree = normalize(&entry.degree);
    let institution = normalize(&entry.institution);

    if contains(&description, &field) || contains(&requirements, &field) {
        total += 30;
        reasons.push("Field of study matches job requirements".to_string());
    }

    let degree_levels: [(&str, u32, &str); 3] = [
        ("bachelor", 20, "Bachelor's degree requirement met"),
        ("master", 25, "Master's degree requirement met"),
        ("phd", 30, "PhD requirement met"),
    ];
    for (level, points, reason) in degree_levels {
        if description.contains(level) && degree.contains(level) {
            total += points;
            reasons.push(reason.to_string());
        }
    }

    if PRESTIGIOUS_INSTITUTIONS
        .iter()
        .any(|name| contains(&institution, name))
    {
        total += 10;
        reasons.push("Prestigious institution".to_string());
    }

    RelevanceScore::clamped(total, reasons)
}

/// Scores a certification from a base of 30.
pub fn score_certification(entry: &CertificationEntry, job: &JobAnalysis) -> RelevanceScore {
    let mut total = 30;
    let mut reasons = Vec::new();

    let description = normalize(&job.job_description);
    let requirements = job.requirements_text();
    let matched_skills = job.matched_skills_text();
    let name = normalize(&entry.name);
    let issuer = normalize(&entry.issuer);

    if contains(&description, &name) || contains(&requirements, &name) {
        total += 50;
        reasons.push("Certification mentioned in job posting".to_string());
    }

    if contains(&description, &issuer) || contains(&requirements, &issuer) {
        total += 30;
        reasons.push("Issuing organization referenced in job posting".to_string());
    }

    if contains(&matched_skills, &name) || shares_token(&name, &matched_skills) {
        total += 20;
        reasons.push("Related to matched skills".to_string());
    }

    RelevanceScore::clamped(total, reasons)
}

// ────────────────────────────────────────────────────────────────────────────
// Matching helpers
// ────────────────────────────────────────────────────────────────────────────

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Substring test on already-lowercased text. An empty needle never matches.
fn contains(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.contains(needle)
}

fn in_list(needle: &str, list: &[String]) -> bool {
    !needle.is_empty() && list.iter().any(|item| normalize(item) == needle)
}

fn count_mentions(fields: &[&str], phrases: &[String]) -> u32 {
    phrases
        .iter()
        .map(|phrase| normalize(phrase))
        .filter(|phrase| fields.iter().any(|field| contains(field, phrase)))
        .count() as u32
}

fn title_match(position: &str, job_title: &str) -> Option<(u32, &'static str)> {
    if position.is_empty() || job_title.is_empty() {
        return None;
    }

    if position.contains(job_title) || job_title.contains(position) {
        return Some((TITLE_EXACT_POINTS, "Job title matches closely"));
    }

    let shares_synonym = TITLE_SYNONYM_GROUPS.iter().any(|group| {
        group.iter().any(|word| position.contains(word))
            && group.iter().any(|word| job_title.contains(word))
    });
    if shares_synonym {
        return Some((TITLE_SYNONYM_POINTS, "Similar role title"));
    }

    let shares_industry = INDUSTRY_KEYWORDS
        .iter()
        .any(|keyword| position.contains(keyword) && job_title.contains(keyword));
    if shares_industry {
        return Some((TITLE_INDUSTRY_POINTS, "Same industry focus"));
    }

    None
}

fn is_related_to_matched(skill: &str, matched_skills: &[String]) -> bool {
    if skill.is_empty() {
        return false;
    }
    RELATED_SKILL_GROUPS.iter().any(|group| {
        group.contains(&skill)
            && matched_skills
                .iter()
                .any(|matched| group.contains(&normalize(matched).as_str()))
    })
}

/// True when any whitespace-delimited token of `text` is also a token of `other`.
fn shares_token(text: &str, other: &str) -> bool {
    let other_tokens: HashSet<&str> = other.split_whitespace().collect();
    text.split_whitespace()
        .any(|token| other_tokens.contains(token))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
