use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::fitment::profile::StudentProfile;

/// The latest validated assessment of a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAssessment {
    pub student_id: Uuid,
    pub profile: StudentProfile,
    pub created_at: DateTime<Utc>,
}

/// A student's expressed interest in a career.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Interest {
    pub id: Uuid,
    pub student_id: Uuid,
    pub career_id: String,
    pub created_at: DateTime<Utc>,
}
