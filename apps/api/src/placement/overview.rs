//! Admin overview: aggregate counts across the store.

use std::collections::HashMap;

use serde::Serialize;

use crate::fitment::catalog::Catalog;
use crate::models::application::Application;
use crate::models::student::Interest;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerInterest {
    pub career_id: String,
    pub title: String,
    pub interested_students: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub students_assessed: u64,
    pub companies: usize,
    pub jobs: usize,
    pub applications: usize,
    pub pending_applications: usize,
    pub interests: usize,
    /// Mean over scored applications only; `None` when nothing is scored yet.
    pub average_fitment: Option<f64>,
    /// Most popular first; careers nobody picked are omitted.
    pub interest_by_career: Vec<CareerInterest>,
}

/// Store-level counts that `build_overview` cannot derive from the record lists.
pub struct OverviewCounts {
    pub students_assessed: u64,
    pub companies: usize,
    pub jobs: usize,
}

pub fn build_overview(
    catalog: &Catalog,
    counts: OverviewCounts,
    applications: &[Application],
    interests: &[Interest],
) -> AdminOverview {
    let scores: Vec<u32> = applications
        .iter()
        .filter_map(|a| a.fitment.score())
        .collect();
    let average_fitment = if scores.is_empty() {
        None
    } else {
        let mean = scores.iter().map(|&s| s as f64).sum::<f64>() / scores.len() as f64;
        Some((mean * 10.0).round() / 10.0)
    };

    let mut per_career: HashMap<&str, usize> = HashMap::new();
    for interest in interests {
        *per_career.entry(interest.career_id.as_str()).or_default() += 1;
    }

    // Catalog order first, then a stable sort by popularity.
    let mut interest_by_career: Vec<CareerInterest> = catalog
        .archetypes()
        .iter()
        .filter_map(|a| {
            per_career.get(a.id.as_str()).map(|&n| CareerInterest {
                career_id: a.id.clone(),
                title: a.label.clone(),
                interested_students: n,
            })
        })
        .collect();
    interest_by_career.sort_by(|a, b| b.interested_students.cmp(&a.interested_students));

    AdminOverview {
        students_assessed: counts.students_assessed,
        companies: counts.companies,
        jobs: counts.jobs,
        applications: applications.len(),
        pending_applications: applications.len() - scores.len(),
        interests: interests.len(),
        average_fitment,
        interest_by_career,
    }
}
