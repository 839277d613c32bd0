pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::fitment::handlers as fitment;
use crate::placement::handlers as placement;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Assessment + matching
        .route(
            "/api/v1/assessment/questionnaire",
            get(fitment::handle_questionnaire),
        )
        .route("/api/v1/assessment/score", post(fitment::handle_score))
        .route("/api/v1/careers", get(fitment::handle_list_careers))
        .route(
            "/api/v1/students/:student_id/assessment",
            put(fitment::handle_submit_assessment),
        )
        .route(
            "/api/v1/students/:student_id/matches",
            get(fitment::handle_get_matches),
        )
        .route(
            "/api/v1/students/:student_id/interests",
            post(placement::handle_add_interest),
        )
        // Companies + jobs
        .route("/api/v1/companies", post(placement::handle_create_company))
        .route("/api/v1/companies/:id", get(placement::handle_get_company))
        .route(
            "/api/v1/jobs",
            get(placement::handle_list_jobs).post(placement::handle_create_job),
        )
        .route(
            "/api/v1/jobs/:id/applications",
            get(placement::handle_list_applications).post(placement::handle_apply),
        )
        // Admin
        .route(
            "/api/v1/admin/overview",
            get(placement::handle_admin_overview),
        )
        .with_state(state)
}
