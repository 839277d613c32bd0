use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{Application, ApplicationFitment};
use crate::models::company::Company;
use crate::models::job::JobPosting;
use crate::models::student::{Interest, StoredAssessment};
use crate::store::Store;

#[derive(Default)]
struct Tables {
    assessments: HashMap<Uuid, StoredAssessment>,
    interests: Vec<Interest>,
    companies: Vec<Company>,
    jobs: Vec<JobPosting>,
    applications: Vec<Application>,
}

/// Process-local store. Lives as long as the server; insertion order is kept.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every record.
    #[cfg(test)]
    pub async fn reset(&self) {
        *self.tables.write().await = Tables::default();
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn save_assessment(&self, assessment: StoredAssessment) -> Result<(), AppError> {
        self.tables
            .write()
            .await
            .assessments
            .insert(assessment.student_id, assessment);
        Ok(())
    }

    async fn get_assessment(&self, student_id: Uuid) -> Result<Option<StoredAssessment>, AppError> {
        Ok(self.tables.read().await.assessments.get(&student_id).cloned())
    }

    async fn count_assessments(&self) -> Result<u64, AppError> {
        Ok(self.tables.read().await.assessments.len() as u64)
    }

    async fn add_interest(&self, interest: Interest) -> Result<Interest, AppError> {
        let mut tables = self.tables.write().await;
        if let Some(existing) = tables
            .interests
            .iter()
            .find(|i| i.student_id == interest.student_id && i.career_id == interest.career_id)
        {
            return Ok(existing.clone());
        }
        tables.interests.push(interest.clone());
        Ok(interest)
    }

    async fn list_interests(&self) -> Result<Vec<Interest>, AppError> {
        Ok(self.tables.read().await.interests.clone())
    }

    async fn create_company(&self, company: Company) -> Result<(), AppError> {
        self.tables.write().await.companies.push(company);
        Ok(())
    }

    async fn get_company(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .companies
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn list_companies(&self) -> Result<Vec<Company>, AppError> {
        Ok(self.tables.read().await.companies.clone())
    }

    async fn create_job(&self, job: JobPosting) -> Result<(), AppError> {
        self.tables.write().await.jobs.push(job);
        Ok(())
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<JobPosting>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .jobs
            .iter()
            .find(|j| j.id == id)
            .cloned())
    }

    async fn list_jobs(&self) -> Result<Vec<JobPosting>, AppError> {
        Ok(self.tables.read().await.jobs.clone())
    }

    async fn create_application(&self, application: Application) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        let duplicate = tables
            .applications
            .iter()
            .any(|a| a.job_id == application.job_id && a.student_id == application.student_id);
        if duplicate {
            return Err(AppError::Conflict(format!(
                "Student {} already applied to job {}",
                application.student_id, application.job_id
            )));
        }
        tables.applications.push(application);
        Ok(())
    }

    async fn list_applications(&self, job_id: Option<Uuid>) -> Result<Vec<Application>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .applications
            .iter()
            .filter(|a| job_id.map_or(true, |id| a.job_id == id))
            .cloned()
            .collect())
    }

    async fn list_student_applications(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<Application>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .applications
            .iter()
            .filter(|a| a.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn update_application_fitment(
        &self,
        id: Uuid,
        fitment: ApplicationFitment,
    ) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        let application = tables
            .applications
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;
        application.fitment = fitment;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
