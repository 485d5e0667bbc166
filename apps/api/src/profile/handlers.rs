//! Axum route handlers for profile records.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{
    CertificationEntry, EducationEntry, PersonalInfo, UserProfileData, WorkExperienceEntry,
};
use crate::profile::store::EntryKind;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SavePersonalInfoRequest {
    pub user_id: Uuid,
    pub personal_info: PersonalInfo,
    pub professional_summary: Option<String>,
}

/// A new profile entry. Any client-supplied `id` is replaced.
#[derive(Debug, Deserialize)]
pub struct NewEntryRequest<T> {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub entry: T,
}

#[derive(Debug, Deserialize)]
pub struct NewSkillRequest {
    pub user_id: Uuid,
    pub name: String,
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<UserProfileData>, AppError> {
    let profile = state.profile_store.load_profile(params.user_id).await?;
    Ok(Json(profile))
}

/// PUT /api/v1/profile
pub async fn handle_save_personal_info(
    State(state): State<AppState>,
    Json(req): Json<SavePersonalInfoRequest>,
) -> Result<StatusCode, AppError> {
    state
        .profile_store
        .save_personal_info(
            req.user_id,
            &req.personal_info,
            req.professional_summary.as_deref(),
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/profile/experience
pub async fn handle_add_work_experience(
    State(state): State<AppState>,
    Json(req): Json<NewEntryRequest<WorkExperienceEntry>>,
) -> Result<(StatusCode, Json<WorkExperienceEntry>), AppError> {
    let mut entry = req.entry;
    require_text("position", &entry.position)?;
    if let (Some(start), Some(end)) = (entry.start_date, entry.end_date) {
        if end < start {
            return Err(AppError::Validation(
                "end_date cannot be before start_date".to_string(),
            ));
        }
    }
    entry.id = Uuid::new_v4();

    state
        .profile_store
        .add_work_experience(req.user_id, &entry)
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// POST /api/v1/profile/education
pub async fn handle_add_education(
    State(state): State<AppState>,
    Json(req): Json<NewEntryRequest<EducationEntry>>,
) -> Result<(StatusCode, Json<EducationEntry>), AppError> {
    let mut entry = req.entry;
    require_text("degree", &entry.degree)?;
    if entry.gpa.is_some_and(|gpa| !(0.0..=10.0).contains(&gpa)) {
        return Err(AppError::Validation("gpa must be between 0 and 10".to_string()));
    }
    entry.id = Uuid::new_v4();

    state.profile_store.add_education(req.user_id, &entry).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// POST /api/v1/profile/certifications
pub async fn handle_add_certification(
    State(state): State<AppState>,
    Json(req): Json<NewEntryRequest<CertificationEntry>>,
) -> Result<(StatusCode, Json<CertificationEntry>), AppError> {
    let mut entry = req.entry;
    require_text("name", &entry.name)?;
    entry.id = Uuid::new_v4();

    state
        .profile_store
        .add_certification(req.user_id, &entry)
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// POST /api/v1/profile/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Json(req): Json<NewSkillRequest>,
) -> Result<StatusCode, AppError> {
    require_text("name", &req.name)?;
    state
        .profile_store
        .add_skill(req.user_id, req.name.trim())
        .await?;
    Ok(StatusCode::CREATED)
}

/// DELETE /api/v1/profile/experience/:id
pub async fn handle_delete_work_experience(
    state: State<AppState>,
    path: Path<Uuid>,
    query: Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    delete_entry(state, path, query, EntryKind::WorkExperience).await
}

/// DELETE /api/v1/profile/education/:id
pub async fn handle_delete_education(
    state: State<AppState>,
    path: Path<Uuid>,
    query: Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    delete_entry(state, path, query, EntryKind::Education).await
}

/// DELETE /api/v1/profile/certifications/:id
pub async fn handle_delete_certification(
    state: State<AppState>,
    path: Path<Uuid>,
    query: Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    delete_entry(state, path, query, EntryKind::Certification).await
}

/// DELETE /api/v1/profile/skills/:name
pub async fn handle_delete_skill(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    if state
        .profile_store
        .remove_skill(params.user_id, &name)
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Skill '{name}' not found")))
    }
}

async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
    kind: EntryKind,
) -> Result<StatusCode, AppError> {
    if state
        .profile_store
        .delete_entry(params.user_id, kind, id)
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Entry {id} not found")))
    }
}

fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}
