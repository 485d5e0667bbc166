//! Axum route handlers for resume optimization.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::{analyze_job, JobPosting};
use crate::errors::AppError;
use crate::models::job::JobAnalysis;
use crate::models::resume::GeneratedResumeRow;
use crate::optimization::optimizer::OptimizedResumeContent;
use crate::optimization::service::{
    build_tailored_resume, get_generated_resume, require_job_analysis, save_generated_resume,
    tailor_profile,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub job_analysis: Option<JobAnalysis>,
}

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub optimized: OptimizedResumeContent,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct TailorRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub posting: JobPosting,
}

#[derive(Debug, Serialize)]
pub struct TailorResponse {
    pub resume_id: Uuid,
    pub s3_key: String,
    pub job_analysis: JobAnalysis,
    pub optimized: OptimizedResumeContent,
    pub content: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/optimize
///
/// Optimizes and renders the user's stored profile against a caller-supplied
/// job analysis. Nothing is persisted.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, AppError> {
    let job = require_job_analysis(request.job_analysis)?;

    let profile = state.profile_store.load_profile(request.user_id).await?;
    let tailored = build_tailored_resume(request.user_id, &profile, &job);

    Ok(Json(OptimizeResponse {
        optimized: tailored.optimized,
        content: tailored.content,
    }))
}

/// POST /api/v1/resumes/tailor
///
/// Full pipeline: analyze posting (LLM) → optimize → render → store.
pub async fn handle_tailor(
    State(state): State<AppState>,
    Json(request): Json<TailorRequest>,
) -> Result<Json<TailorResponse>, AppError> {
    request.posting.validate()?;

    let llm = &state.llm;
    let posting = &request.posting;
    let (job_analysis, tailored) = tailor_profile(
        state.profile_store.as_ref(),
        request.user_id,
        move |skills| async move { analyze_job(llm, posting, &skills).await },
    )
    .await?;

    let row = save_generated_resume(
        &state.db,
        &state.s3,
        &state.config.s3_bucket,
        request.user_id,
        &job_analysis,
        &tailored.content,
    )
    .await?;

    Ok(Json(TailorResponse {
        resume_id: row.id,
        s3_key: row.s3_key,
        job_analysis,
        optimized: tailored.optimized,
        content: tailored.content,
    }))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<GeneratedResumeRow>, AppError> {
    Ok(Json(get_generated_resume(&state.db, resume_id).await?))
}
