//! Student profile: the validated input to fitment scoring.
//!
//! Requests arrive as a loose `AssessmentRequest` (string keys, wide integers) so
//! that every malformed field can be reported by name. `validate` turns it into an
//! immutable `StudentProfile`; the scorer only ever sees validated profiles.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const LIKERT_MIN: u8 = 1;
pub const LIKERT_MAX: u8 = 5;
pub const LIKERT_NEUTRAL: u8 = 3;

pub const SLIDER_MAX: u8 = 100;

/// Core values a student can pick from.
pub const CORE_VALUES: &[&str] = &[
    "Growth",
    "Creativity",
    "Excellence",
    "Impact",
    "Collaboration",
    "Autonomy",
    "Stability",
    "Innovation",
    "Integrity",
    "Learning",
    "Leadership",
    "Service",
    "Balance",
    "Recognition",
    "Adventure",
    "Craftsmanship",
];

/// Personality statements, answered on a 1–5 Likert scale. The index is the question id.
pub const PERSONALITY_STATEMENTS: &[&str] = &[
    "I enjoy solving complex analytical problems.",
    "I feel energized when working closely with other people.",
    "I like to take charge and lead a group.",
    "I come up with original ideas easily.",
    "I pay close attention to details.",
    "I stay calm and effective under pressure.",
    "I enjoy helping others learn and grow.",
    "I prefer clear plans and procedures over improvisation.",
    "I like building things, whether with my hands or with code.",
    "I am comfortable taking risks when the payoff is uncertain.",
];

// ────────────────────────────────────────────────────────────────────────────
// Work preferences
// ────────────────────────────────────────────────────────────────────────────

/// Named behavioural axis of the work-preference sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkAxis {
    Independence,
    Routine,
    Pace,
    Focus,
    Building,
}

impl WorkAxis {
    pub const ALL: [WorkAxis; 5] = [
        WorkAxis::Independence,
        WorkAxis::Routine,
        WorkAxis::Pace,
        WorkAxis::Focus,
        WorkAxis::Building,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkAxis::Independence => "independence",
            WorkAxis::Routine => "routine",
            WorkAxis::Pace => "pace",
            WorkAxis::Focus => "focus",
            WorkAxis::Building => "building",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == key)
    }
}

/// Slider positions, each 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkPreferences {
    pub independence: u8,
    pub routine: u8,
    pub pace: u8,
    pub focus: u8,
    pub building: u8,
}

impl WorkPreferences {
    pub fn get(&self, axis: WorkAxis) -> u8 {
        match axis {
            WorkAxis::Independence => self.independence,
            WorkAxis::Routine => self.routine,
            WorkAxis::Pace => self.pace,
            WorkAxis::Focus => self.focus,
            WorkAxis::Building => self.building,
        }
    }
}

impl Default for WorkPreferences {
    fn default() -> Self {
        Self {
            independence: 50,
            routine: 50,
            pace: 50,
            focus: 50,
            building: 50,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Profile
// ────────────────────────────────────────────────────────────────────────────

/// A completed assessment. Created once per session and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    /// Canonical core-value names in the order the student picked them.
    pub selected_values: Vec<String>,
    /// Question index → Likert answer. Unanswered questions are absent.
    pub personality_answers: BTreeMap<u32, u8>,
    pub work_preferences: WorkPreferences,
}

impl StudentProfile {
    /// Likert answer for `question`, or the neutral midpoint when unanswered.
    pub fn answer_or_neutral(&self, question: u32) -> u8 {
        self.personality_answers
            .get(&question)
            .copied()
            .unwrap_or(LIKERT_NEUTRAL)
    }
}

/// How many core values a student must pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionBounds {
    pub min: usize,
    pub max: usize,
}

impl Default for SelectionBounds {
    fn default() -> Self {
        Self { min: 3, max: 5 }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Request + validation
// ────────────────────────────────────────────────────────────────────────────

/// Raw assessment payload as submitted by the client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRequest {
    #[serde(default)]
    pub selected_values: Vec<String>,
    #[serde(default)]
    pub personality_answers: HashMap<String, i64>,
    #[serde(default)]
    pub work_preferences: HashMap<String, i64>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("selectedValues: expected between {min} and {max} values, got {got}")]
    ValueCount { min: usize, max: usize, got: usize },

    #[error("selectedValues: unknown core value '{0}'")]
    UnknownValue(String),

    #[error("selectedValues: '{0}' is selected more than once")]
    DuplicateValue(String),

    #[error("personalityAnswers.{0}: no such question")]
    UnknownQuestion(String),

    #[error("personalityAnswers.{key}: answer {value} is outside 1-5")]
    AnswerOutOfRange { key: String, value: i64 },

    #[error("workPreferences.{0}: unknown axis")]
    UnknownAxis(String),

    #[error("workPreferences.{0}: missing")]
    MissingAxis(&'static str),

    #[error("workPreferences.{axis}: value {value} is outside 0-100")]
    AxisOutOfRange { axis: &'static str, value: i64 },
}

impl AssessmentRequest {
    /// Validates every field and returns the canonical profile.
    /// The first offending field is reported.
    pub fn validate(&self, bounds: SelectionBounds) -> Result<StudentProfile, ProfileError> {
        Ok(StudentProfile {
            selected_values: validate_values(&self.selected_values, bounds)?,
            personality_answers: validate_answers(&self.personality_answers)?,
            work_preferences: validate_preferences(&self.work_preferences)?,
        })
    }
}

fn validate_values(raw: &[String], bounds: SelectionBounds) -> Result<Vec<String>, ProfileError> {
    if raw.len() < bounds.min || raw.len() > bounds.max {
        return Err(ProfileError::ValueCount {
            min: bounds.min,
            max: bounds.max,
            got: raw.len(),
        });
    }

    let mut seen = HashSet::new();
    let mut values = Vec::with_capacity(raw.len());
    for value in raw {
        let canonical = canonical_core_value(value)
            .ok_or_else(|| ProfileError::UnknownValue(value.clone()))?;
        if !seen.insert(canonical) {
            return Err(ProfileError::DuplicateValue(canonical.to_string()));
        }
        values.push(canonical.to_string());
    }
    Ok(values)
}

fn validate_answers(raw: &HashMap<String, i64>) -> Result<BTreeMap<u32, u8>, ProfileError> {
    let mut answers = BTreeMap::new();
    for (key, &value) in raw {
        let question = key
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|q| (*q as usize) < PERSONALITY_STATEMENTS.len())
            .ok_or_else(|| ProfileError::UnknownQuestion(key.clone()))?;
        if value < LIKERT_MIN as i64 || value > LIKERT_MAX as i64 {
            return Err(ProfileError::AnswerOutOfRange {
                key: key.clone(),
                value,
            });
        }
        answers.insert(question, value as u8);
    }
    Ok(answers)
}

fn validate_preferences(raw: &HashMap<String, i64>) -> Result<WorkPreferences, ProfileError> {
    if let Some(unknown) = raw.keys().find(|k| WorkAxis::from_key(k).is_none()) {
        return Err(ProfileError::UnknownAxis(unknown.clone()));
    }

    let slider = |axis: WorkAxis| -> Result<u8, ProfileError> {
        let value = *raw
            .get(axis.as_str())
            .ok_or(ProfileError::MissingAxis(axis.as_str()))?;
        if !(0..=SLIDER_MAX as i64).contains(&value) {
            return Err(ProfileError::AxisOutOfRange {
                axis: axis.as_str(),
                value,
            });
        }
        Ok(value as u8)
    };

    Ok(WorkPreferences {
        independence: slider(WorkAxis::Independence)?,
        routine: slider(WorkAxis::Routine)?,
        pace: slider(WorkAxis::Pace)?,
        focus: slider(WorkAxis::Focus)?,
        building: slider(WorkAxis::Building)?,
    })
}

/// Case-insensitive lookup of a core value, returning its canonical spelling.
pub fn canonical_core_value(value: &str) -> Option<&'static str> {
    let needle = value.trim();
    CORE_VALUES
        .iter()
        .copied()
        .find(|v| v.eq_ignore_ascii_case(needle))
}

// ────────────────────────────────────────────────────────────────────────────
// Questionnaire
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityQuestion {
    pub index: u32,
    pub statement: &'static str,
}

/// Everything a client needs to render the assessment form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Questionnaire {
    pub core_values: Vec<&'static str>,
    pub min_values: usize,
    pub max_values: usize,
    pub personality_questions: Vec<PersonalityQuestion>,
    pub work_axes: Vec<&'static str>,
}

pub fn questionnaire(bounds: SelectionBounds) -> Questionnaire {
    Questionnaire {
        core_values: CORE_VALUES.to_vec(),
        min_values: bounds.min,
        max_values: bounds.max,
        personality_questions: PERSONALITY_STATEMENTS
            .iter()
            .enumerate()
            .map(|(i, statement)| PersonalityQuestion {
                index: i as u32,
                statement,
            })
            .collect(),
        work_axes: WorkAxis::ALL.iter().map(WorkAxis::as_str).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sliders(values: [i64; 5]) -> HashMap<String, i64> {
        WorkAxis::ALL
            .iter()
            .zip(values)
            .map(|(a, v)| (a.as_str().to_string(), v))
            .collect()
    }

    fn valid_request() -> AssessmentRequest {
        AssessmentRequest {
            selected_values: vec![
                "Growth".to_string(),
                "creativity".to_string(),
                " Excellence ".to_string(),
            ],
            personality_answers: HashMap::from([("0".to_string(), 5), ("4".to_string(), 2)]),
            work_preferences: sliders([80, 30, 20, 90, 60]),
        }
    }

    #[test]
    fn test_valid_request_produces_canonical_profile() {
        let profile = valid_request().validate(SelectionBounds::default()).unwrap();
        assert_eq!(
            profile.selected_values,
            vec!["Growth", "Creativity", "Excellence"]
        );
        assert_eq!(profile.personality_answers.get(&0), Some(&5));
        assert_eq!(profile.work_preferences.independence, 80);
        assert_eq!(profile.work_preferences.get(WorkAxis::Focus), 90);
    }

    #[test]
    fn test_unanswered_question_is_neutral() {
        let profile = valid_request().validate(SelectionBounds::default()).unwrap();
        assert_eq!(profile.answer_or_neutral(7), LIKERT_NEUTRAL);
        assert_eq!(profile.answer_or_neutral(4), 2);
    }

    #[test]
    fn test_too_few_values_rejected() {
        let mut req = valid_request();
        req.selected_values.truncate(2);
        let err = req.validate(SelectionBounds::default()).unwrap_err();
        assert_eq!(
            err,
            ProfileError::ValueCount {
                min: 3,
                max: 5,
                got: 2
            }
        );
        assert!(err.to_string().starts_with("selectedValues"));
    }

    #[test]
    fn test_exact_five_bounds() {
        let bounds = SelectionBounds { min: 5, max: 5 };
        let err = valid_request().validate(bounds).unwrap_err();
        assert!(matches!(err, ProfileError::ValueCount { got: 3, .. }));
    }

    #[test]
    fn test_unknown_value_rejected() {
        let mut req = valid_request();
        req.selected_values[0] = "Wealth".to_string();
        let err = req.validate(SelectionBounds::default()).unwrap_err();
        assert_eq!(err, ProfileError::UnknownValue("Wealth".to_string()));
    }

    #[test]
    fn test_duplicate_value_rejected_case_insensitively() {
        let mut req = valid_request();
        req.selected_values[1] = "GROWTH".to_string();
        let err = req.validate(SelectionBounds::default()).unwrap_err();
        assert_eq!(err, ProfileError::DuplicateValue("Growth".to_string()));
    }

    #[test]
    fn test_answer_out_of_range_names_question() {
        let mut req = valid_request();
        req.personality_answers.insert("3".to_string(), 6);
        let err = req.validate(SelectionBounds::default()).unwrap_err();
        assert_eq!(err.to_string(), "personalityAnswers.3: answer 6 is outside 1-5");
    }

    #[test]
    fn test_unknown_question_rejected() {
        let mut req = valid_request();
        req.personality_answers.insert("42".to_string(), 3);
        let err = req.validate(SelectionBounds::default()).unwrap_err();
        assert_eq!(err, ProfileError::UnknownQuestion("42".to_string()));

        let mut req = valid_request();
        req.personality_answers.insert("first".to_string(), 3);
        assert!(matches!(
            req.validate(SelectionBounds::default()),
            Err(ProfileError::UnknownQuestion(_))
        ));
    }

    #[test]
    fn test_missing_axis_rejected() {
        let mut req = valid_request();
        req.work_preferences.remove("pace");
        let err = req.validate(SelectionBounds::default()).unwrap_err();
        assert_eq!(err, ProfileError::MissingAxis("pace"));
        assert_eq!(err.to_string(), "workPreferences.pace: missing");
    }

    #[test]
    fn test_axis_out_of_range_rejected() {
        let mut req = valid_request();
        req.work_preferences.insert("focus".to_string(), 101);
        let err = req.validate(SelectionBounds::default()).unwrap_err();
        assert_eq!(
            err,
            ProfileError::AxisOutOfRange {
                axis: "focus",
                value: 101
            }
        );
    }

    #[test]
    fn test_unknown_axis_rejected() {
        let mut req = valid_request();
        req.work_preferences.insert("salary".to_string(), 50);
        let err = req.validate(SelectionBounds::default()).unwrap_err();
        assert_eq!(err, ProfileError::UnknownAxis("salary".to_string()));
    }

    #[test]
    fn test_request_deserializes_from_camel_case_json() {
        let req: AssessmentRequest = serde_json::from_str(
            r#"{
                "selectedValues": ["Growth", "Impact", "Service"],
                "personalityAnswers": {"1": 4, "6": 5},
                "workPreferences": {"independence": 10, "routine": 20, "pace": 30, "focus": 40, "building": 50}
            }"#,
        )
        .unwrap();
        let profile = req.validate(SelectionBounds::default()).unwrap();
        assert_eq!(profile.answer_or_neutral(6), 5);
        assert_eq!(profile.work_preferences.building, 50);
    }

    #[test]
    fn test_questionnaire_lists_every_statement() {
        let q = questionnaire(SelectionBounds::default());
        assert_eq!(q.personality_questions.len(), PERSONALITY_STATEMENTS.len());
        assert_eq!(q.personality_questions[2].index, 2);
        assert_eq!(q.work_axes.len(), 5);
        assert!(q.core_values.contains(&"Craftsmanship"));
    }
}
