use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A job posted by a company against one career archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: Uuid,
    pub company_id: Uuid,
    /// Catalog archetype this job is scored against.
    pub career_id: String,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub openings: u32,
    pub apply_url: String,
    pub qr_code_url: String,
    pub created_at: DateTime<Utc>,
}
