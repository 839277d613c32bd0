use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::AppError;
use crate::fitment::profile::StudentProfile;
use crate::models::application::{Application, ApplicationFitment};
use crate::models::company::Company;
use crate::models::job::JobPosting;
use crate::models::student::{Interest, StoredAssessment};
use crate::store::Store;

/// PostgreSQL-backed store. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AssessmentRow {
    student_id: Uuid,
    profile: Json<StudentProfile>,
    created_at: DateTime<Utc>,
}

impl From<AssessmentRow> for StoredAssessment {
    fn from(row: AssessmentRow) -> Self {
        StoredAssessment {
            student_id: row.student_id,
            profile: row.profile.0,
            created_at: row.created_at,
        }
    }
}

#[derive(FromRow)]
struct JobRow {
    id: Uuid,
    company_id: Uuid,
    career_id: String,
    title: String,
    description: String,
    location: Option<String>,
    skills: Vec<String>,
    openings: i32,
    apply_url: String,
    qr_code_url: String,
    created_at: DateTime<Utc>,
}

impl From<JobRow> for JobPosting {
    fn from(row: JobRow) -> Self {
        JobPosting {
            id: row.id,
            company_id: row.company_id,
            career_id: row.career_id,
            title: row.title,
            description: row.description,
            location: row.location,
            skills: row.skills,
            openings: u32::try_from(row.openings).unwrap_or(0),
            apply_url: row.apply_url,
            qr_code_url: row.qr_code_url,
            created_at: row.created_at,
        }
    }
}

#[derive(FromRow)]
struct ApplicationRow {
    id: Uuid,
    job_id: Uuid,
    student_id: Uuid,
    fitment_score: Option<i32>,
    created_at: DateTime<Utc>,
}

impl From<ApplicationRow> for Application {
    fn from(row: ApplicationRow) -> Self {
        let fitment = match row.fitment_score.and_then(|s| u32::try_from(s).ok()) {
            Some(score) => ApplicationFitment::Scored { score },
            None => ApplicationFitment::Pending,
        };
        Application {
            id: row.id,
            job_id: row.job_id,
            student_id: row.student_id,
            fitment,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn save_assessment(&self, assessment: StoredAssessment) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO assessments (student_id, profile, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (student_id)
            DO UPDATE SET profile = EXCLUDED.profile, created_at = EXCLUDED.created_at
            "#,
        )
        .bind(assessment.student_id)
        .bind(Json(&assessment.profile))
        .bind(assessment.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_assessment(&self, student_id: Uuid) -> Result<Option<StoredAssessment>, AppError> {
        let row: Option<AssessmentRow> =
            sqlx::query_as("SELECT * FROM assessments WHERE student_id = $1")
                .bind(student_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(StoredAssessment::from))
    }

    async fn count_assessments(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM assessments")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn add_interest(&self, interest: Interest) -> Result<Interest, AppError> {
        sqlx::query(
            r#"
            INSERT INTO interests (id, student_id, career_id, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (student_id, career_id) DO NOTHING
            "#,
        )
        .bind(interest.id)
        .bind(interest.student_id)
        .bind(&interest.career_id)
        .bind(interest.created_at)
        .execute(&self.pool)
        .await?;

        let stored: Interest =
            sqlx::query_as("SELECT * FROM interests WHERE student_id = $1 AND career_id = $2")
                .bind(interest.student_id)
                .bind(&interest.career_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(stored)
    }

    async fn list_interests(&self) -> Result<Vec<Interest>, AppError> {
        let rows: Vec<Interest> = sqlx::query_as("SELECT * FROM interests ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_company(&self, company: Company) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO companies (id, name, industry, contact_email, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(company.id)
        .bind(&company.name)
        .bind(&company.industry)
        .bind(&company.contact_email)
        .bind(company.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_company(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        let company: Option<Company> = sqlx::query_as("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(company)
    }

    async fn list_companies(&self) -> Result<Vec<Company>, AppError> {
        let rows: Vec<Company> = sqlx::query_as("SELECT * FROM companies ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_job(&self, job: JobPosting) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO jobs
                (id, company_id, career_id, title, description, location,
                 skills, openings, apply_url, qr_code_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(job.id)
        .bind(job.company_id)
        .bind(&job.career_id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.location)
        .bind(&job.skills)
        .bind(i32::try_from(job.openings).unwrap_or(i32::MAX))
        .bind(&job.apply_url)
        .bind(&job.qr_code_url)
        .bind(job.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<JobPosting>, AppError> {
        let row: Option<JobRow> = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(JobPosting::from))
    }

    async fn list_jobs(&self) -> Result<Vec<JobPosting>, AppError> {
        let rows: Vec<JobRow> = sqlx::query_as("SELECT * FROM jobs ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(JobPosting::from).collect())
    }

    async fn create_application(&self, application: Application) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO applications (id, job_id, student_id, fitment_score, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(application.id)
        .bind(application.job_id)
        .bind(application.student_id)
        .bind(application.fitment.score().map(|s| s as i32))
        .bind(application.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AppError::Conflict(format!(
                    "Student {} already applied to job {}",
                    application.student_id, application.job_id
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_applications(&self, job_id: Option<Uuid>) -> Result<Vec<Application>, AppError> {
        let rows: Vec<ApplicationRow> = sqlx::query_as(
            r#"
            SELECT * FROM applications
            WHERE $1::uuid IS NULL OR job_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Application::from).collect())
    }

    async fn list_student_applications(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<Application>, AppError> {
        let rows: Vec<ApplicationRow> = sqlx::query_as(
            "SELECT * FROM applications WHERE student_id = $1 ORDER BY created_at, id",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Application::from).collect())
    }

    async fn update_application_fitment(
        &self,
        id: Uuid,
        fitment: ApplicationFitment,
    ) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE applications SET fitment_score = $2 WHERE id = $1")
            .bind(id)
            .bind(fitment.score().map(|s| s as i32))
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Application {id} not found")));
        }
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
