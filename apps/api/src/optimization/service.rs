//! Resume service: runs the optimization pipeline for a stored profile and
//! keeps rendered results.
//!
//! Flow: load_profile → optimize_resume_for_job → generate_resume_content →
//!       (optional) upload markdown to S3 + INSERT generated_resumes row.

use std::future::Future;

use aws_sdk_s3::primitives::ByteStream;
use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::JobAnalysis;
use crate::models::profile::UserProfileData;
use crate::models::resume::GeneratedResumeRow;
use crate::optimization::optimizer::{optimize_resume_for_job, OptimizedResumeContent};
use crate::optimization::renderer::generate_resume_content;
use crate::profile::store::ProfileStore;

/// Optimized content together with its rendered markdown.
#[derive(Debug, Clone, Serialize)]
pub struct TailoredResume {
    pub optimized: OptimizedResumeContent,
    pub content: String,
}

/// Absent job analysis is the one input fault the pipeline defines.
pub fn require_job_analysis(job_analysis: Option<JobAnalysis>) -> Result<JobAnalysis, AppError> {
    job_analysis.ok_or_else(|| AppError::InvalidInput("job_analysis is required".to_string()))
}

/// Runs optimize → render for an already loaded profile.
pub fn build_tailored_resume(
    user_id: Uuid,
    profile: &UserProfileData,
    job: &JobAnalysis,
) -> TailoredResume {
    let optimized = optimize_resume_for_job(job, profile);
    let content = generate_resume_content(&optimized);

    info!(
        "Tailored resume for user {user_id} ('{}'): {} experience, {} skills, {} education, {} certifications",
        job.job_title,
        optimized.work_experiences.len(),
        optimized.skills.len(),
        optimized.education.len(),
        optimized.certifications.len()
    );

    TailoredResume { optimized, content }
}

/// Loads the profile once, derives a job analysis from its skills via
/// `analyze`, then optimizes that same snapshot.
pub async fn tailor_profile<F, Fut>(
    store: &dyn ProfileStore,
    user_id: Uuid,
    analyze: F,
) -> Result<(JobAnalysis, TailoredResume), AppError>
where
    F: FnOnce(Vec<String>) -> Fut,
    Fut: Future<Output = Result<JobAnalysis, AppError>>,
{
    let profile = store.load_profile(user_id).await?;
    let job = analyze(profile.skills.clone()).await?;
    let tailored = build_tailored_resume(user_id, &profile, &job);
    Ok((job, tailored))
}

/// Uploads the rendered markdown and records it.
pub async fn save_generated_resume(
    pool: &PgPool,
    s3: &aws_sdk_s3::Client,
    s3_bucket: &str,
    user_id: Uuid,
    job: &JobAnalysis,
    content: &str,
) -> Result<GeneratedResumeRow, AppError> {
    let resume_id = Uuid::new_v4();
    let s3_key = resume_object_key(user_id, resume_id);

    s3.put_object()
        .bucket(s3_bucket)
        .key(&s3_key)
        .body(ByteStream::from(content.as_bytes().to_vec()))
        .content_type("text/markdown")
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Upload of {s3_key} failed: {e}")))?;

    info!("Uploaded resume to s3://{s3_bucket}/{s3_key}");

    let inserted = sqlx::query_as::<_, GeneratedResumeRow>(
        r#"
        INSERT INTO generated_resumes (id, user_id, job_title, company, content, s3_key)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(resume_id)
    .bind(user_id)
    .bind(&job.job_title)
    .bind(&job.company)
    .bind(content)
    .bind(&s3_key)
    .fetch_one(pool)
    .await;

    let key = s3_key.as_str();
    discard_on_failure(inserted, key, move || async move {
        s3.delete_object()
            .bucket(s3_bucket)
            .key(key)
            .send()
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    })
    .await
}

/// Passes a successful insert through. On failure runs `discard` so the
/// uploaded object does not outlive its missing row.
async fn discard_on_failure<T, F, Fut>(
    inserted: Result<T, sqlx::Error>,
    s3_key: &str,
    discard: F,
) -> Result<T, AppError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), String>>,
{
    match inserted {
        Ok(row) => Ok(row),
        Err(e) => {
            warn!("Insert for {s3_key} failed, removing uploaded object: {e}");
            if let Err(cleanup) = discard().await {
                warn!("Orphaned object left at {s3_key}: {cleanup}");
            }
            Err(e.into())
        }
    }
}

/// Returns a stored resume by id.
pub async fn get_generated_resume(
    pool: &PgPool,
    resume_id: Uuid,
) -> Result<GeneratedResumeRow, AppError> {
    sqlx::query_as::<_, GeneratedResumeRow>("SELECT * FROM generated_resumes WHERE id = $1")
        .bind(resume_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))
}

fn resume_object_key(user_id: Uuid, resume_id: Uuid) -> String {
    format!("resumes/{user_id}/{resume_id}.md")
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::models::profile::WorkExperienceEntry;
    use crate::profile::store::memory::InMemoryProfileStore;

    fn make_profile() -> UserProfileData {
        UserProfileData {
            skills: vec!["Rust".to_string()],
            work_experience: vec![WorkExperienceEntry {
                id: Uuid::new_v4(),
                position: "Engineer".to_string(),
                company: "Acme".to_string(),
                description: "Built X".to_string(),
                is_current_role: true,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_job_analysis_is_invalid_input() {
        let err = require_job_analysis(None).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_present_job_analysis_passes_through() {
        let job = JobAnalysis {
            job_title: "Engineer".to_string(),
            ..Default::default()
        };
        assert_eq!(require_job_analysis(Some(job.clone())).unwrap(), job);
    }

    #[test]
    fn test_object_key_layout() {
        let user_id = Uuid::nil();
        let resume_id = Uuid::nil();
        assert_eq!(
            resume_object_key(user_id, resume_id),
            format!("resumes/{user_id}/{resume_id}.md")
        );
    }

    #[test]
    fn test_build_tailored_resume_renders_profile() {
        let job = JobAnalysis {
            job_title: "Engineer".to_string(),
            ..Default::default()
        };

        let tailored = build_tailored_resume(Uuid::new_v4(), &make_profile(), &job);
        assert_eq!(tailored.optimized.work_experiences.len(), 1);
        let lines: Vec<&str> = tailored.content.lines().collect();
        assert!(lines.contains(&"### Engineer"));
        assert!(lines.contains(&"**Acme**"));
        assert!(lines.contains(&"- Built X"));
    }

    #[tokio::test]
    async fn test_tailor_profile_reads_store_once() {
        let user_id = Uuid::new_v4();
        let store = InMemoryProfileStore::with_profile(user_id, make_profile());

        let (job, tailored) = tailor_profile(&store, user_id, |skills| async move {
            assert_eq!(skills, vec!["Rust"]);
            Ok(JobAnalysis {
                job_title: "Engineer".to_string(),
                matched_skills: skills,
                ..Default::default()
            })
        })
        .await
        .unwrap();

        assert_eq!(store.load_count(), 1);
        assert_eq!(job.matched_skills, vec!["Rust"]);
        assert_eq!(tailored.optimized.skills[0].name, "Rust");
        assert!(tailored.optimized.skills[0].is_matched);
    }

    #[tokio::test]
    async fn test_tailor_profile_propagates_analysis_failure() {
        let store = InMemoryProfileStore::default();
        let result = tailor_profile(&store, Uuid::new_v4(), |_| async {
            Err(AppError::Llm("unavailable".to_string()))
        })
        .await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }

    #[tokio::test]
    async fn test_failed_insert_discards_uploaded_object() {
        let discarded = AtomicBool::new(false);
        let flag = &discarded;
        let result: Result<(), AppError> = discard_on_failure(
            Err(sqlx::Error::RowNotFound),
            "resumes/a/b.md",
            move || async move {
                flag.store(true, Ordering::SeqCst);
                Ok(())
            },
        )
        .await;

        assert!(matches!(result, Err(AppError::Database(_))));
        assert!(discarded.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_failed_cleanup_still_reports_insert_error() {
        let result: Result<(), AppError> = discard_on_failure(
            Err(sqlx::Error::RowNotFound),
            "resumes/a/b.md",
            || async { Err("access denied".to_string()) },
        )
        .await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_successful_insert_keeps_object() {
        let discarded = AtomicBool::new(false);
        let flag = &discarded;
        let result = discard_on_failure(Ok(7), "resumes/a/b.md", move || async move {
            flag.store(true, Ordering::SeqCst);
            Ok(())
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert!(!discarded.load(Ordering::SeqCst));
    }
}
