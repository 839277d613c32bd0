//! Store: explicit repository for everything the collaborator layer records.
//!
//! Created once at startup and handed to handlers through `AppState`.
//! `InMemoryStore` is the default; `PgStore` is used when `DATABASE_URL` is set.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{Application, ApplicationFitment};
use crate::models::company::Company;
use crate::models::job::JobPosting;
use crate::models::student::{Interest, StoredAssessment};

pub use memory::InMemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    /// Inserts or replaces the student's assessment.
    async fn save_assessment(&self, assessment: StoredAssessment) -> Result<(), AppError>;

    async fn get_assessment(&self, student_id: Uuid) -> Result<Option<StoredAssessment>, AppError>;

    async fn count_assessments(&self) -> Result<u64, AppError>;

    /// Records an interest. Repeating the same (student, career) pair returns the
    /// existing record.
    async fn add_interest(&self, interest: Interest) -> Result<Interest, AppError>;

    async fn list_interests(&self) -> Result<Vec<Interest>, AppError>;

    async fn create_company(&self, company: Company) -> Result<(), AppError>;

    async fn get_company(&self, id: Uuid) -> Result<Option<Company>, AppError>;

    async fn list_companies(&self) -> Result<Vec<Company>, AppError>;

    async fn create_job(&self, job: JobPosting) -> Result<(), AppError>;

    async fn get_job(&self, id: Uuid) -> Result<Option<JobPosting>, AppError>;

    /// Jobs in posting order.
    async fn list_jobs(&self) -> Result<Vec<JobPosting>, AppError>;

    /// Fails with `AppError::Conflict` if the student already applied to the job.
    async fn create_application(&self, application: Application) -> Result<(), AppError>;

    /// Applications in submission order, optionally for one job only.
    async fn list_applications(&self, job_id: Option<Uuid>) -> Result<Vec<Application>, AppError>;

    /// Every application filed by one student, in submission order.
    async fn list_student_applications(&self, student_id: Uuid)
        -> Result<Vec<Application>, AppError>;

    /// Replaces the fitment on an existing application.
    async fn update_application_fitment(
        &self,
        id: Uuid,
        fitment: ApplicationFitment,
    ) -> Result<(), AppError>;

    /// Backend label for startup logging.
    fn backend(&self) -> &'static str;
}
