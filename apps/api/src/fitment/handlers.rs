//! Axum route handlers for the assessment and matching API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::fitment::catalog::CareerArchetype;
use crate::fitment::profile::{questionnaire, AssessmentRequest, Questionnaire, StudentProfile};
use crate::fitment::ranking::{top_matches, CareerMatch, MatchLimit};
use crate::models::student::StoredAssessment;
use crate::placement::handlers::rescore_student_applications;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchesResponse {
    pub student_id: Uuid,
    pub matches: Vec<CareerMatch>,
    pub scorer_backend: &'static str,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/assessment/questionnaire
pub async fn handle_questionnaire(State(state): State<AppState>) -> Json<Questionnaire> {
    Json(questionnaire(state.config.selection_bounds()))
}

/// GET /api/v1/careers
pub async fn handle_list_careers(State(state): State<AppState>) -> Json<Vec<CareerArchetype>> {
    Json(state.catalog.archetypes().to_vec())
}

/// POST /api/v1/assessment/score
///
/// Stateless: validates the profile and returns ranked matches without storing anything.
pub async fn handle_score(
    State(state): State<AppState>,
    Query(params): Query<LimitQuery>,
    Json(request): Json<AssessmentRequest>,
) -> Result<Json<Vec<CareerMatch>>, AppError> {
    let limit = MatchLimit::parse(params.limit.as_deref(), state.config.top_matches)?;
    let profile = request.validate(state.config.selection_bounds())?;
    Ok(Json(score_profile(&state, &profile, limit)))
}

/// PUT /api/v1/students/:student_id/assessment
///
/// Stores the student's assessment (replacing any earlier one), re-scores the
/// applications they already filed and returns their matches.
pub async fn handle_submit_assessment(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    Query(params): Query<LimitQuery>,
    Json(request): Json<AssessmentRequest>,
) -> Result<Json<MatchesResponse>, AppError> {
    let limit = MatchLimit::parse(params.limit.as_deref(), state.config.top_matches)?;
    let profile = request.validate(state.config.selection_bounds())?;

    let matches = score_profile(&state, &profile, limit);
    rescore_student_applications(&state, student_id, &profile).await?;
    state
        .store
        .save_assessment(StoredAssessment {
            student_id,
            profile,
            created_at: Utc::now(),
        })
        .await?;

    Ok(Json(MatchesResponse {
        student_id,
        matches,
        scorer_backend: state.fit_scorer.backend(),
    }))
}

/// GET /api/v1/students/:student_id/matches
pub async fn handle_get_matches(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    Query(params): Query<LimitQuery>,
) -> Result<Json<MatchesResponse>, AppError> {
    let limit = MatchLimit::parse(params.limit.as_deref(), state.config.top_matches)?;
    let assessment = state
        .store
        .get_assessment(student_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No assessment for student {student_id}")))?;

    Ok(Json(MatchesResponse {
        student_id,
        matches: score_profile(&state, &assessment.profile, limit),
        scorer_backend: state.fit_scorer.backend(),
    }))
}

fn score_profile(state: &AppState, profile: &StudentProfile, limit: MatchLimit) -> Vec<CareerMatch> {
    let matches = top_matches(
        state.fit_scorer.as_ref(),
        profile,
        state.catalog.archetypes(),
        limit,
    );
    debug!(
        returned = matches.len(),
        best = ?matches.first().map(|m| m.fitment_score),
        "Scored profile against catalog"
    );
    matches
}
