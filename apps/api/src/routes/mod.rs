pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::optimization::handlers as optimization;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile records
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).put(profile::handle_save_personal_info),
        )
        .route(
            "/api/v1/profile/experience",
            post(profile::handle_add_work_experience),
        )
        .route(
            "/api/v1/profile/experience/:id",
            delete(profile::handle_delete_work_experience),
        )
        .route(
            "/api/v1/profile/education",
            post(profile::handle_add_education),
        )
        .route(
            "/api/v1/profile/education/:id",
            delete(profile::handle_delete_education),
        )
        .route(
            "/api/v1/profile/certifications",
            post(profile::handle_add_certification),
        )
        .route(
            "/api/v1/profile/certifications/:id",
            delete(profile::handle_delete_certification),
        )
        .route("/api/v1/profile/skills", post(profile::handle_add_skill))
        .route(
            "/api/v1/profile/skills/:name",
            delete(profile::handle_delete_skill),
        )
        // Job analysis
        .route("/api/v1/jobs/analyze", post(analysis::handle_analyze_job))
        // Resume optimization
        .route(
            "/api/v1/resumes/optimize",
            post(optimization::handle_optimize),
        )
        .route("/api/v1/resumes/tailor", post(optimization::handle_tailor))
        .route("/api/v1/resumes/:id", get(optimization::handle_get_resume))
        .with_state(state)
}
