use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::analysis::{analyze_job, JobPosting};
use crate::errors::AppError;
use crate::models::job::JobAnalysis;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeJobRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub posting: JobPosting,
}

/// POST /api/v1/jobs/analyze
///
/// Compares a job posting with the user's stored skills. The result can be
/// passed straight to `/api/v1/resumes/optimize`.
pub async fn handle_analyze_job(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeJobRequest>,
) -> Result<Json<JobAnalysis>, AppError> {
    request.posting.validate()?;

    let profile = state.profile_store.load_profile(request.user_id).await?;
    let analysis = analyze_job(&state.llm, &request.posting, &profile.skills).await?;

    Ok(Json(analysis))
}
