//! Fitment Scoring: pluggable, trait-based scorer that measures a student profile
//! against a single career archetype.
//!
//! Default: `WeightedFitmentScorer` (values 30 / personality 40 / work preferences 30
//! on top of a base of 50, clamped to 45–95). Pure and deterministic.
//!
//! `AppState` holds an `Arc<dyn FitmentScorer>`, built at startup from config.

use serde::{Deserialize, Serialize};

use crate::fitment::catalog::CareerArchetype;
use crate::fitment::profile::{StudentProfile, WorkAxis, LIKERT_NEUTRAL};

pub const BASE_SCORE: f64 = 50.0;
pub const VALUES_WEIGHT: f64 = 30.0;
pub const PERSONALITY_WEIGHT: f64 = 40.0;
pub const WORK_PREF_WEIGHT: f64 = 30.0;

/// Scores outside this band are never surfaced.
pub const SCORE_FLOOR: u32 = 45;
pub const SCORE_CEILING: u32 = 95;

/// Points per Likert step away from neutral.
const PERSONALITY_STEP: f64 = 4.0;
const POINTS_PER_AXIS: f64 = 10.0;

/// Axes evaluated by the work-preference term. `routine` and `building` are collected
/// by the questionnaire but not scored.
pub const SCORED_AXES: [WorkAxis; 3] = [WorkAxis::Independence, WorkAxis::Pace, WorkAxis::Focus];

pub const DEFAULT_EXPECTED_VALUE_COUNT: usize = 5;

const FALLBACK_REASON: &str =
    "This path is worth exploring; your profile shows potential you can build on here.";

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Per-category contributions before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub base: f64,
    pub values: f64,
    pub personality: f64,
    pub work_preferences: f64,
}

impl ScoreBreakdown {
    pub fn raw_total(&self) -> f64 {
        self.base + self.values + self.personality + self.work_preferences
    }

    /// Rounded total, clamped to `[SCORE_FLOOR, SCORE_CEILING]`.
    pub fn fitment_score(&self) -> u32 {
        let rounded = self.raw_total().round();
        rounded.clamp(SCORE_FLOOR as f64, SCORE_CEILING as f64) as u32
    }
}

/// Result of scoring one archetype.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchetypeScore {
    pub fitment_score: u32,
    pub breakdown: ScoreBreakdown,
    pub reasoning: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The fitment scorer trait. Implement this to swap formulas without touching
/// the ranking, handler, or application code.
///
/// Implementations must be pure: the same profile and archetype always produce
/// the same score.
pub trait FitmentScorer: Send + Sync {
    fn score_archetype(&self, profile: &StudentProfile, archetype: &CareerArchetype)
        -> ArchetypeScore;

    /// Backend label, reported for transparency.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// WeightedFitmentScorer
// ────────────────────────────────────────────────────────────────────────────

/// Weighted value / personality / work-preference formula.
///
/// Algorithm:
/// 1. base = 50
/// 2. values = overlap / expected_value_count × 30
/// 3. personality = Σ((answer − 3) × 4) / (4 × referenced) × 40, unanswered = 3
/// 4. work = in-band axes (independence, pace, focus) × 10
/// 5. round, clamp to 45–95
#[derive(Debug, Clone)]
pub struct WeightedFitmentScorer {
    expected_value_count: usize,
}

impl WeightedFitmentScorer {
    /// `expected_value_count` is the selection size the value term is normalised by.
    pub fn new(expected_value_count: usize) -> Self {
        Self {
            expected_value_count: expected_value_count.max(1),
        }
    }

    pub fn expected_value_count(&self) -> usize {
        self.expected_value_count
    }
}

impl Default for WeightedFitmentScorer {
    fn default() -> Self {
        Self::new(DEFAULT_EXPECTED_VALUE_COUNT)
    }
}

impl FitmentScorer for WeightedFitmentScorer {
    fn score_archetype(
        &self,
        profile: &StudentProfile,
        archetype: &CareerArchetype,
    ) -> ArchetypeScore {
        let matched_values = matched_values(profile, archetype);
        let values = matched_values.len() as f64 / self.expected_value_count as f64 * VALUES_WEIGHT;
        let personality = personality_term(profile, archetype);
        let (in_band, work_preferences) = work_preference_term(profile, archetype);

        let breakdown = ScoreBreakdown {
            base: BASE_SCORE,
            values,
            personality,
            work_preferences,
        };

        ArchetypeScore {
            fitment_score: breakdown.fitment_score(),
            breakdown,
            reasoning: build_reasoning(&breakdown, &matched_values, &in_band, archetype),
        }
    }

    fn backend(&self) -> &'static str {
        "weighted"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Terms
// ────────────────────────────────────────────────────────────────────────────

/// Selected values the archetype also cares about, in the student's order.
fn matched_values<'a>(profile: &'a StudentProfile, archetype: &CareerArchetype) -> Vec<&'a str> {
    profile
        .selected_values
        .iter()
        .filter(|v| archetype.values_affinity.contains(*v))
        .map(String::as_str)
        .collect()
}

fn personality_term(profile: &StudentProfile, archetype: &CareerArchetype) -> f64 {
    let questions = &archetype.personality_weights;
    if questions.is_empty() {
        return 0.0;
    }

    let sum: f64 = questions
        .iter()
        .map(|&q| (profile.answer_or_neutral(q) as f64 - LIKERT_NEUTRAL as f64) * PERSONALITY_STEP)
        .sum();

    sum / (PERSONALITY_STEP * questions.len() as f64) * PERSONALITY_WEIGHT
}

/// Returns the in-band axes and the normalised term.
fn work_preference_term(
    profile: &StudentProfile,
    archetype: &CareerArchetype,
) -> (Vec<WorkAxis>, f64) {
    let in_band: Vec<WorkAxis> = SCORED_AXES
        .into_iter()
        .filter(|axis| {
            archetype
                .work_pref_ranges
                .get(axis)
                .is_some_and(|band| band.contains(profile.work_preferences.get(*axis)))
        })
        .collect();

    let raw = in_band.len() as f64 * POINTS_PER_AXIS;
    let max_raw = SCORED_AXES.len() as f64 * POINTS_PER_AXIS;
    (in_band, raw / max_raw * WORK_PREF_WEIGHT)
}

/// One sentence per positively contributing term, or a single fallback.
fn build_reasoning(
    breakdown: &ScoreBreakdown,
    matched_values: &[&str],
    in_band: &[WorkAxis],
    archetype: &CareerArchetype,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if breakdown.values > 0.0 {
        reasons.push(format!(
            "Your values align with this path: {}.",
            matched_values.join(", ")
        ));
    }

    if breakdown.personality > 0.0 {
        reasons.push(format!(
            "Your personality traits suit the day-to-day of a {}.",
            archetype.label
        ));
    }

    if breakdown.work_preferences > 0.0 {
        let axes: Vec<&str> = in_band.iter().map(WorkAxis::as_str).collect();
        reasons.push(format!(
            "Your work style preferences fit the role ({}).",
            axes.join(", ")
        ));
    }

    if reasons.is_empty() {
        reasons.push(FALLBACK_REASON.to_string());
    }
    reasons
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitment::test_support::{make_archetype, make_profile};

    #[test]
    fn test_value_term_uses_expected_selection_size() {
        // Three selected, two overlap, denominator stays 5: 2/5 × 30 = 12.
        let archetype = make_archetype("designer", &["Creativity", "Excellence", "Craftsmanship"], &[], &[]);
        let profile = make_profile(&["Growth", "Creativity", "Excellence"], &[], [50, 50, 50]);

        let score = WeightedFitmentScorer::default().score_archetype(&profile, &archetype);
        assert!((score.breakdown.values - 12.0).abs() < 1e-9);
        assert_eq!(score.fitment_score, 62);
        assert!(score.reasoning[0].contains("Creativity, Excellence"));
    }

    #[test]
    fn test_maximal_personality_clamps_to_ceiling() {
        // (5−3)×4 = 8 per question, 24 total, 24/12 × 40 = 80, 50 + 80 = 130 → 95.
        let archetype = make_archetype("lead", &[], &[0, 1, 2], &[]);
        let profile = make_profile(&[], &[(0, 5), (1, 5), (2, 5)], [50, 50, 50]);

        let score = WeightedFitmentScorer::default().score_archetype(&profile, &archetype);
        assert!((score.breakdown.personality - 80.0).abs() < 1e-9);
        assert!((score.breakdown.raw_total() - 130.0).abs() < 1e-9);
        assert_eq!(score.fitment_score, SCORE_CEILING);
    }

    #[test]
    fn test_out_of_band_preferences_contribute_nothing() {
        let archetype = make_archetype(
            "clerk",
            &[],
            &[],
            &[
                (WorkAxis::Independence, 0, 50),
                (WorkAxis::Pace, 50, 100),
                (WorkAxis::Focus, 0, 50),
            ],
        );
        let profile = make_profile(&[], &[], [80, 20, 90]);

        let score = WeightedFitmentScorer::default().score_archetype(&profile, &archetype);
        assert_eq!(score.breakdown.work_preferences, 0.0);
    }

    #[test]
    fn test_unaligned_profile_sits_at_base_and_negative_traits_hit_floor() {
        let archetype = make_archetype(
            "clerk",
            &["Stability"],
            &[0, 1],
            &[
                (WorkAxis::Independence, 0, 50),
                (WorkAxis::Pace, 50, 100),
                (WorkAxis::Focus, 0, 50),
            ],
        );
        let profile = make_profile(&[], &[(0, 3), (1, 3)], [80, 20, 90]);

        let score = WeightedFitmentScorer::default().score_archetype(&profile, &archetype);
        assert_eq!(score.breakdown.raw_total(), 50.0);
        // Floor only bites when the raw total drops below it.
        assert_eq!(score.fitment_score, 50);

        let averse = make_profile(&[], &[(0, 1), (1, 1)], [80, 20, 90]);
        let score = WeightedFitmentScorer::default().score_archetype(&averse, &archetype);
        assert!((score.breakdown.personality + 80.0).abs() < 1e-9);
        assert_eq!(score.fitment_score, SCORE_FLOOR);
    }

    #[test]
    fn test_fallback_reason_when_nothing_contributes() {
        let archetype = make_archetype("clerk", &["Stability"], &[0], &[]);
        let profile = make_profile(&[], &[], [0, 0, 0]);

        let score = WeightedFitmentScorer::default().score_archetype(&profile, &archetype);
        assert_eq!(score.reasoning, vec![FALLBACK_REASON.to_string()]);
    }

    #[test]
    fn test_unanswered_matches_neutral() {
        let archetype = make_archetype("analyst", &[], &[4, 7, 9], &[]);
        let unanswered = make_profile(&[], &[], [50, 50, 50]);
        let neutral = make_profile(&[], &[(4, 3), (7, 3), (9, 3)], [50, 50, 50]);

        let scorer = WeightedFitmentScorer::default();
        assert_eq!(
            scorer.score_archetype(&unanswered, &archetype).breakdown.personality,
            scorer.score_archetype(&neutral, &archetype).breakdown.personality
        );
    }

    #[test]
    fn test_empty_weights_and_ranges_contribute_zero() {
        let archetype = make_archetype("blank", &["Growth"], &[], &[]);
        let profile = make_profile(&["Growth"], &[(0, 5)], [100, 100, 100]);

        let score = WeightedFitmentScorer::default().score_archetype(&profile, &archetype);
        assert_eq!(score.breakdown.personality, 0.0);
        assert_eq!(score.breakdown.work_preferences, 0.0);
        assert!((score.breakdown.values - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_band_for_scored_axis_is_out_of_band() {
        let archetype = make_archetype("partial", &[], &[], &[(WorkAxis::Pace, 0, 100)]);
        let profile = make_profile(&[], &[], [50, 50, 50]);

        let score = WeightedFitmentScorer::default().score_archetype(&profile, &archetype);
        assert!((score.breakdown.work_preferences - 10.0).abs() < 1e-9);
        assert!(score.reasoning.iter().any(|r| r.contains("(pace)")));
    }

    #[test]
    fn test_unscored_axes_are_ignored() {
        let archetype = make_archetype(
            "builder",
            &[],
            &[],
            &[(WorkAxis::Routine, 0, 100), (WorkAxis::Building, 0, 100)],
        );
        let profile = make_profile(&[], &[], [50, 50, 50]);

        let score = WeightedFitmentScorer::default().score_archetype(&profile, &archetype);
        assert_eq!(score.breakdown.work_preferences, 0.0);
    }

    #[test]
    fn test_band_edges_are_inclusive() {
        let archetype = make_archetype(
            "edges",
            &[],
            &[],
            &[
                (WorkAxis::Independence, 40, 60),
                (WorkAxis::Pace, 40, 60),
                (WorkAxis::Focus, 40, 60),
            ],
        );
        let profile = make_profile(&[], &[], [40, 60, 50]);

        let score = WeightedFitmentScorer::default().score_archetype(&profile, &archetype);
        assert!((score.breakdown.work_preferences - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_value_term_never_decreases_with_overlap() {
        let affinity = ["Growth", "Impact", "Service", "Learning", "Balance"];
        let archetype = make_archetype("mentor", &affinity, &[1, 6], &[(WorkAxis::Pace, 0, 50)]);
        let filler = ["Adventure", "Recognition", "Autonomy", "Stability", "Innovation"];
        let scorer = WeightedFitmentScorer::default();

        let mut previous = 0;
        for overlap in 0..=5 {
            let values: Vec<&str> = affinity[..overlap]
                .iter()
                .chain(filler[..5 - overlap].iter())
                .copied()
                .collect();
            let profile = make_profile(&values, &[(1, 4)], [50, 30, 50]);
            let score = scorer.score_archetype(&profile, &archetype).fitment_score;
            assert!(score >= previous, "overlap {overlap}: {score} < {previous}");
            previous = score;
        }
    }

    #[test]
    fn test_custom_expected_value_count() {
        let archetype = make_archetype("designer", &["Creativity", "Excellence"], &[], &[]);
        let profile = make_profile(&["Creativity", "Excellence", "Growth"], &[], [50, 50, 50]);

        let score = WeightedFitmentScorer::new(3).score_archetype(&profile, &archetype);
        assert!((score.breakdown.values - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_expected_count_is_treated_as_one() {
        assert_eq!(WeightedFitmentScorer::new(0).expected_value_count(), 1);
    }

    #[test]
    fn test_scores_are_deterministic() {
        let archetype = make_archetype(
            "dev",
            &["Growth", "Craftsmanship"],
            &[0, 4, 8],
            &[(WorkAxis::Focus, 60, 100)],
        );
        let profile = make_profile(&["Growth", "Learning", "Craftsmanship"], &[(0, 4), (8, 2)], [70, 40, 80]);
        let scorer = WeightedFitmentScorer::default();
        assert_eq!(
            scorer.score_archetype(&profile, &archetype),
            scorer.score_archetype(&profile, &archetype)
        );
    }

    #[test]
    fn test_backend_label_is_weighted() {
        assert_eq!(WeightedFitmentScorer::default().backend(), "weighted");
    }
}
