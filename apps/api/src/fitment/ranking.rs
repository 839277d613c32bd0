//! Ranking: scores a profile against the whole catalog and formats the matches
//! for presentation.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::fitment::catalog::CareerArchetype;
use crate::fitment::profile::StudentProfile;
use crate::fitment::scoring::{FitmentScorer, ScoreBreakdown};

/// One ranked career, denormalised for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerMatch {
    pub career_id: String,
    pub title: String,
    pub fitment_score: u32,
    pub reasoning: Vec<String>,
    pub skills: Vec<String>,
    pub openings: u32,
    pub breakdown: ScoreBreakdown,
    pub icon: String,
    pub color: String,
}

/// How many matches a caller wants back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchLimit {
    Top(usize),
    All,
}

impl MatchLimit {
    /// Parses a `?limit=` value: absent → `Top(default)`, `all`, or a positive count.
    pub fn parse(raw: Option<&str>, default: usize) -> Result<Self, AppError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(MatchLimit::Top(default)),
            Some(s) if s.eq_ignore_ascii_case("all") => Ok(MatchLimit::All),
            Some(s) => match s.parse::<usize>() {
                Ok(n) if n > 0 => Ok(MatchLimit::Top(n)),
                _ => Err(AppError::Validation(format!(
                    "limit: expected a positive number or 'all', got '{s}'"
                ))),
            },
        }
    }
}

/// Scores every archetype and returns them ranked by fitment, highest first.
/// Equal scores keep catalog order.
pub fn rank_matches(
    scorer: &dyn FitmentScorer,
    profile: &StudentProfile,
    catalog: &[CareerArchetype],
) -> Vec<CareerMatch> {
    let mut matches: Vec<CareerMatch> = catalog
        .iter()
        .map(|archetype| {
            let score = scorer.score_archetype(profile, archetype);
            CareerMatch {
                career_id: archetype.id.clone(),
                title: archetype.label.clone(),
                fitment_score: score.fitment_score,
                reasoning: score.reasoning,
                skills: archetype.skills.clone(),
                openings: archetype.openings,
                breakdown: score.breakdown,
                icon: archetype.icon.clone(),
                color: archetype.color.clone(),
            }
        })
        .collect();

    // sort_by is stable
    matches.sort_by(|a, b| b.fitment_score.cmp(&a.fitment_score));
    matches
}

/// Ranked matches truncated to `limit`.
pub fn top_matches(
    scorer: &dyn FitmentScorer,
    profile: &StudentProfile,
    catalog: &[CareerArchetype],
    limit: MatchLimit,
) -> Vec<CareerMatch> {
    let mut matches = rank_matches(scorer, profile, catalog);
    if let MatchLimit::Top(n) = limit {
        matches.truncate(n);
    }
    matches
}
