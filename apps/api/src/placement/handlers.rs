//! Axum route handlers for companies, jobs, applications, interests and the admin view.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::fitment::profile::StudentProfile;
use crate::models::application::{Application, ApplicationFitment};
use crate::models::company::Company;
use crate::models::job::JobPosting;
use crate::models::student::Interest;
use crate::placement::overview::{build_overview, AdminOverview, OverviewCounts};
use crate::placement::qr::{apply_url, qr_code_url};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyRequest {
    pub name: String,
    #[serde(default)]
    pub industry: String,
    pub contact_email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub company_id: Uuid,
    pub career_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub location: Option<String>,
    /// Defaults to the career archetype's skills.
    pub skills: Option<Vec<String>>,
    pub openings: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFilter {
    pub career_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub student_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestRequest {
    pub career_id: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Companies
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/companies
pub async fn handle_create_company(
    State(state): State<AppState>,
    Json(request): Json<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<Company>), AppError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    let contact_email = request.contact_email.trim();
    if !is_plausible_email(contact_email) {
        return Err(AppError::Validation(format!(
            "contactEmail: '{contact_email}' is not a valid email address"
        )));
    }

    let company = Company {
        id: Uuid::new_v4(),
        name: name.to_string(),
        industry: request.industry.trim().to_string(),
        contact_email: contact_email.to_string(),
        created_at: Utc::now(),
    };
    state.store.create_company(company.clone()).await?;
    info!(company_id = %company.id, "Company registered");

    Ok((StatusCode::CREATED, Json(company)))
}

/// GET /api/v1/companies/:id
pub async fn handle_get_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Company>, AppError> {
    state
        .store
        .get_company(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Company {id} not found")))
}

// ────────────────────────────────────────────────────────────────────────────
// Jobs
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs
///
/// Posts a job against a catalog career and attaches its apply link and QR code.
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(request): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobPosting>), AppError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }

    let archetype = state
        .catalog
        .get(&request.career_id)
        .ok_or_else(|| AppError::NotFound(format!("Career {} not found", request.career_id)))?;

    state
        .store
        .get_company(request.company_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {} not found", request.company_id)))?;

    let id = Uuid::new_v4();
    let apply_url = apply_url(&state.config.public_base_url, id);
    let job = JobPosting {
        id,
        company_id: request.company_id,
        career_id: archetype.id.clone(),
        title: title.to_string(),
        description: request.description,
        location: request.location,
        skills: request.skills.unwrap_or_else(|| archetype.skills.clone()),
        openings: request.openings.unwrap_or(archetype.openings),
        qr_code_url: qr_code_url(&state.config.qr_service_url, &apply_url),
        apply_url,
        created_at: Utc::now(),
    };
    state.store.create_job(job.clone()).await?;
    info!(job_id = %job.id, career_id = %job.career_id, "Job posted");

    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(filter): Query<JobFilter>,
) -> Result<Json<Vec<JobPosting>>, AppError> {
    let mut jobs = state.store.list_jobs().await?;
    if let Some(career_id) = filter.career_id.as_deref() {
        jobs.retain(|j| j.career_id == career_id);
    }
    Ok(Json(jobs))
}

// ────────────────────────────────────────────────────────────────────────────
// Applications
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/:id/applications
///
/// Fitment is scored against the job's career when the student has a stored
/// assessment; otherwise the application is recorded as pending until they submit one.
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Json(request): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    let job = state
        .store
        .get_job(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let assessment = state.store.get_assessment(request.student_id).await?;
    if assessment.is_none() {
        warn!(student_id = %request.student_id, %job_id, "No assessment on file, fitment pending");
    }
    let fitment = application_fitment(&state, &job, assessment.as_ref().map(|a| &a.profile));

    let application = Application {
        id: Uuid::new_v4(),
        job_id,
        student_id: request.student_id,
        fitment,
        created_at: Utc::now(),
    };
    state.store.create_application(application.clone()).await?;

    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /api/v1/jobs/:id/applications
///
/// Highest fitment first; pending applications last, in submission order.
pub async fn handle_list_applications(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Vec<Application>>, AppError> {
    state
        .store
        .get_job(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let mut applications = state.store.list_applications(Some(job_id)).await?;
    // None sorts below Some, so reversing the comparison puts pending last.
    applications.sort_by(|a, b| b.fitment.score().cmp(&a.fitment.score()));
    Ok(Json(applications))
}

/// Re-scores every application the student has filed against `profile`.
/// Called whenever an assessment is stored, so pending applications resolve and
/// scored ones follow the latest answers.
pub(crate) async fn rescore_student_applications(
    state: &AppState,
    student_id: Uuid,
    profile: &StudentProfile,
) -> Result<usize, AppError> {
    let mut updated = 0;
    for application in state.store.list_student_applications(student_id).await? {
        let Some(job) = state.store.get_job(application.job_id).await? else {
            continue;
        };
        let fitment = application_fitment(state, &job, Some(profile));
        if fitment != application.fitment {
            state
                .store
                .update_application_fitment(application.id, fitment)
                .await?;
            updated += 1;
        }
    }
    if updated > 0 {
        info!(%student_id, updated, "Application fitment refreshed");
    }
    Ok(updated)
}

/// Engine score against the job's career, or `Pending` without a profile.
fn application_fitment(
    state: &AppState,
    job: &JobPosting,
    profile: Option<&StudentProfile>,
) -> ApplicationFitment {
    let Some(profile) = profile else {
        return ApplicationFitment::Pending;
    };
    match state.catalog.get(&job.career_id) {
        Some(archetype) => ApplicationFitment::Scored {
            score: state.fit_scorer.score_archetype(profile, archetype).fitment_score,
        },
        None => {
            warn!(career_id = %job.career_id, job_id = %job.id, "Job references a career missing from the catalog");
            ApplicationFitment::Pending
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Interests + admin
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/students/:student_id/interests
pub async fn handle_add_interest(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    Json(request): Json<InterestRequest>,
) -> Result<(StatusCode, Json<Interest>), AppError> {
    let archetype = state
        .catalog
        .get(&request.career_id)
        .ok_or_else(|| AppError::NotFound(format!("Career {} not found", request.career_id)))?;

    let interest = state
        .store
        .add_interest(Interest {
            id: Uuid::new_v4(),
            student_id,
            career_id: archetype.id.clone(),
            created_at: Utc::now(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(interest)))
}

/// GET /api/v1/admin/overview
pub async fn handle_admin_overview(
    State(state): State<AppState>,
) -> Result<Json<AdminOverview>, AppError> {
    let counts = OverviewCounts {
        students_assessed: state.store.count_assessments().await?,
        companies: state.store.list_companies().await?.len(),
        jobs: state.store.list_jobs().await?.len(),
    };
    let applications = state.store.list_applications(None).await?;
    let interests = state.store.list_interests().await?;

    Ok(Json(build_overview(
        &state.catalog,
        counts,
        &applications,
        &interests,
    )))
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plausible_email() {
        assert!(is_plausible_email("hr@acme.io"));
        assert!(!is_plausible_email("hr@acme"));
        assert!(!is_plausible_email("@acme.io"));
        assert!(!is_plausible_email("acme.io"));
    }
}
