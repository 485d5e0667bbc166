//! Content Renderer: turns `OptimizedResumeContent` into a markdown document.
//!
//! Section order is fixed: Summary, Experience, Skills, Education, Certifications.
//! Empty sections are omitted. Downstream exporters convert the markdown to
//! plain text, HTML or word-processor formats.

use chrono::{Datelike, NaiveDate};

use crate::models::profile::WorkExperienceEntry;
use crate::optimization::optimizer::{OptimizedResumeContent, OptimizedSkill};

/// Glyphs users paste in front of description lines.
const BULLET_GLYPHS: &[char] = &['•', '-', '*', '◦', '▪', '‣', '·'];

/// Renders the optimized resume as markdown.
pub fn generate_resume_content(optimized: &OptimizedResumeContent) -> String {
    let mut md = String::new();

    let info = &optimized.personal_info;
    if !info.full_name.trim().is_empty() {
        md.push_str(&format!("# {}\n", info.full_name.trim()));
    }
    for contact in [&info.email, &info.phone, &info.location]
        .into_iter()
        .flatten()
    {
        if !contact.trim().is_empty() {
            md.push_str(&format!("{}\n", contact.trim()));
        }
    }

    if let Some(summary) = optimized
        .summary
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        push_section(&mut md, "Professional Summary");
        md.push_str(summary);
        md.push('\n');
    }

    if !optimized.work_experiences.is_empty() {
        push_section(&mut md, "Professional Experience");
        for scored in &optimized.work_experiences {
            push_work_entry(&mut md, &scored.entry);
        }
    }

    if !optimized.skills.is_empty() {
        push_section(&mut md, "Skills");
        for skill in order_skills_for_display(&optimized.skills) {
            md.push_str(&format!("- {}\n", skill.name));
        }
    }

    if !optimized.education.is_empty() {
        push_section(&mut md, "Education");
        for scored in &optimized.education {
            let entry = &scored.entry;
            md.push_str(&format!("### {}\n", entry.degree));
            push_bold_line(&mut md, &entry.institution);
            if !entry.field_of_study.trim().is_empty() {
                md.push_str(&format!("{}\n", entry.field_of_study.trim()));
            }
            if let Some(start) = entry.start_date {
                md.push_str(&format!("{}\n", start.year()));
            }
            if let Some(gpa) = entry.gpa {
                md.push_str(&format!("GPA: {gpa}\n"));
            }
            md.push('\n');
        }
    }

    if !optimized.certifications.is_empty() {
        push_section(&mut md, "Certifications");
        for scored in &optimized.certifications {
            let entry = &scored.entry;
            md.push_str(&format!("### {}\n", entry.name));
            push_bold_line(&mut md, &entry.issuer);
            if let Some(issued) = entry.issue_date {
                md.push_str(&format!("{}\n", issued.year()));
            }
            md.push('\n');
        }
    }

    let rendered = md.trim();
    if rendered.is_empty() {
        String::new()
    } else {
        format!("{rendered}\n")
    }
}

/// Groups skills as matched, then high-priority, then the rest.
///
/// This is a separate pass from the optimizer's sort. For optimizer output the
/// two agree; the grouping is kept here so the renderer does not depend on
/// how its input was ordered.
pub fn order_skills_for_display(skills: &[OptimizedSkill]) -> Vec<&OptimizedSkill> {
    let matched = skills.iter().filter(|s| s.is_matched);
    let high_priority = skills.iter().filter(|s| !s.is_matched && s.is_high_priority);
    let other = skills
        .iter()
        .filter(|s| !s.is_matched && !s.is_high_priority);
    matched.chain(high_priority).chain(other).collect()
}

fn push_section(md: &mut String, title: &str) {
    md.push_str(&format!("\n## {title}\n\n"));
}

fn push_bold_line(md: &mut String, text: &str) {
    if !text.trim().is_empty() {
        md.push_str(&format!("**{}**\n", text.trim()));
    }
}

fn push_work_entry(md: &mut String, entry: &WorkExperienceEntry) {
    md.push_str(&format!("### {}\n", entry.position));
    push_bold_line(md, &entry.company);
    if let Some(range) = format_date_range(entry) {
        md.push_str(&format!("{range}\n"));
    }
    for line in description_bullets(&entry.description) {
        md.push_str(&format!("- {line}\n"));
    }
    md.push('\n');
}

/// `Mon YYYY - Mon YYYY`, or `Mon YYYY - Present` for current/open-ended roles.
fn format_date_range(entry: &WorkExperienceEntry) -> Option<String> {
    let start = entry.start_date?;
    let end = match entry.end_date {
        Some(end) if !entry.is_current_role => format_month_year(end),
        _ => "Present".to_string(),
    };
    Some(format!("{} - {}", format_month_year(start), end))
}

fn format_month_year(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// Non-empty description lines with leading bullet glyphs removed.
fn description_bullets(description: &str) -> Vec<&str> {
    description
        .lines()
        .map(|line| line.trim().trim_start_matches(BULLET_GLYPHS).trim())
        .filter(|line| !line.is_empty())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
