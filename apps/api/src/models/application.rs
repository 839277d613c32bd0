use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fitment attached to an application. `Pending` means the student has no stored
/// assessment yet; no score is invented for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ApplicationFitment {
    Scored { score: u32 },
    Pending,
}

impl ApplicationFitment {
    pub fn score(&self) -> Option<u32> {
        match self {
            ApplicationFitment::Scored { score } => Some(*score),
            ApplicationFitment::Pending => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub student_id: Uuid,
    pub fitment: ApplicationFitment,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitment_serializes_with_status_tag() {
        let scored = serde_json::to_value(ApplicationFitment::Scored { score: 72 }).unwrap();
        assert_eq!(scored, serde_json::json!({"status": "scored", "score": 72}));

        let pending = serde_json::to_value(ApplicationFitment::Pending).unwrap();
        assert_eq!(pending, serde_json::json!({"status": "pending"}));
    }

    #[test]
    fn test_pending_has_no_score() {
        assert_eq!(ApplicationFitment::Pending.score(), None);
        assert_eq!(ApplicationFitment::Scored { score: 60 }.score(), Some(60));
    }
}
