//! Builders shared by the fitment unit tests.

use std::collections::BTreeMap;

use crate::fitment::catalog::{CareerArchetype, PrefBand};
use crate::fitment::profile::{StudentProfile, WorkAxis, WorkPreferences};

pub fn make_archetype(
    id: &str,
    values: &[&str],
    questions: &[u32],
    ranges: &[(WorkAxis, u8, u8)],
) -> CareerArchetype {
    CareerArchetype {
        id: id.to_string(),
        label: id.to_string(),
        category: "Test".to_string(),
        skills: vec!["Skill".to_string()],
        values_affinity: values.iter().map(|v| v.to_string()).collect(),
        personality_weights: questions.to_vec(),
        work_pref_ranges: ranges
            .iter()
            .map(|&(axis, min, max)| (axis, PrefBand(min, max)))
            .collect(),
        openings: 3,
        icon: "briefcase".to_string(),
        color: "#000000".to_string(),
    }
}

/// `prefs` is `[independence, pace, focus]`; the unscored axes stay at 50.
pub fn make_profile(values: &[&str], answers: &[(u32, u8)], prefs: [u8; 3]) -> StudentProfile {
    StudentProfile {
        selected_values: values.iter().map(|v| v.to_string()).collect(),
        personality_answers: answers.iter().copied().collect::<BTreeMap<_, _>>(),
        work_preferences: WorkPreferences {
            independence: prefs[0],
            pace: prefs[1],
            focus: prefs[2],
            ..WorkPreferences::default()
        },
    }
}
