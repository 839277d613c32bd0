//! Career catalog: the fixed set of archetypes every profile is scored against.
//!
//! The catalog ships embedded in the binary (`catalog/careers.json`) and may be
//! overridden with `CATALOG_PATH`. It is validated once at startup; a malformed
//! entry stops the process instead of surfacing per request.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fitment::profile::{canonical_core_value, WorkAxis, PERSONALITY_STATEMENTS, SLIDER_MAX};

const EMBEDDED_CATALOG: &str = include_str!("../../catalog/careers.json");

/// Inclusive `[min, max]` band on a work-preference slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefBand(pub u8, pub u8);

impl PrefBand {
    pub fn min(&self) -> u8 {
        self.0
    }

    pub fn max(&self) -> u8 {
        self.1
    }

    pub fn contains(&self, value: u8) -> bool {
        value >= self.0 && value <= self.1
    }
}

/// A role family and its ideal candidate profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerArchetype {
    pub id: String,
    pub label: String,
    pub category: String,
    pub skills: Vec<String>,
    pub values_affinity: Vec<String>,
    /// Personality question indices relevant to this role.
    pub personality_weights: Vec<u32>,
    pub work_pref_ranges: BTreeMap<WorkAxis, PrefBand>,
    pub openings: u32,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog contains no archetypes")]
    Empty,

    #[error("catalog entry #{index}: missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("catalog entry '{0}': duplicate id")]
    DuplicateId(String),

    #[error("catalog entry '{id}': {axis} band [{min}, {max}] is not a valid 0-100 range")]
    InvalidBand {
        id: String,
        axis: &'static str,
        min: u8,
        max: u8,
    },

    #[error("catalog entry '{id}': personality question {question} does not exist")]
    UnknownQuestion { id: String, question: u32 },

    #[error("catalog entry '{id}': unknown core value '{value}'")]
    UnknownValue { id: String, value: String },
}

/// On-disk shape. Everything is optional so a missing field is reported by name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArchetype {
    id: Option<String>,
    label: Option<String>,
    category: Option<String>,
    skills: Option<Vec<String>>,
    values_affinity: Option<Vec<String>>,
    personality_weights: Option<Vec<u32>>,
    work_pref_ranges: Option<BTreeMap<WorkAxis, PrefBand>>,
    openings: Option<u32>,
    icon: Option<String>,
    color: Option<String>,
}

impl RawArchetype {
    fn into_archetype(self, index: usize) -> Result<CareerArchetype, CatalogError> {
        let missing = |field: &'static str| CatalogError::MissingField { index, field };

        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| missing("id"))?;

        let values_affinity = self
            .values_affinity
            .ok_or_else(|| missing("valuesAffinity"))?
            .into_iter()
            .map(|value| match canonical_core_value(&value) {
                Some(canonical) => Ok(canonical.to_string()),
                None => Err(CatalogError::UnknownValue {
                    id: id.clone(),
                    value,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let personality_weights = self
            .personality_weights
            .ok_or_else(|| missing("personalityWeights"))?;
        if let Some(&question) = personality_weights
            .iter()
            .find(|q| **q as usize >= PERSONALITY_STATEMENTS.len())
        {
            return Err(CatalogError::UnknownQuestion {
                id: id.clone(),
                question,
            });
        }

        let work_pref_ranges = self
            .work_pref_ranges
            .ok_or_else(|| missing("workPrefRanges"))?;
        for (axis, band) in &work_pref_ranges {
            if band.min() > band.max() || band.max() > SLIDER_MAX {
                return Err(CatalogError::InvalidBand {
                    id: id.clone(),
                    axis: axis.as_str(),
                    min: band.min(),
                    max: band.max(),
                });
            }
        }

        Ok(CareerArchetype {
            label: self.label.ok_or_else(|| missing("label"))?,
            category: self.category.unwrap_or_else(|| "General".to_string()),
            skills: self.skills.ok_or_else(|| missing("skills"))?,
            values_affinity,
            personality_weights,
            work_pref_ranges,
            openings: self.openings.ok_or_else(|| missing("openings"))?,
            icon: self.icon.unwrap_or_else(|| "briefcase".to_string()),
            color: self.color.unwrap_or_else(|| "#6B7280".to_string()),
            id,
        })
    }
}

/// Validated, read-only list of archetypes in catalog order.
#[derive(Debug, Clone)]
pub struct Catalog {
    archetypes: Vec<CareerArchetype>,
}

impl Catalog {
    /// Parses and validates a JSON array of archetypes.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawArchetype> = serde_json::from_str(json)?;
        if raw.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        let mut archetypes = Vec::with_capacity(raw.len());
        for (index, entry) in raw.into_iter().enumerate() {
            let archetype = entry.into_archetype(index)?;
            if !seen.insert(archetype.id.clone()) {
                return Err(CatalogError::DuplicateId(archetype.id));
            }
            archetypes.push(archetype);
        }

        Ok(Self { archetypes })
    }

    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Loads the catalog from `path`, or the embedded copy when no path is configured.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read catalog at {}", path.display()))?;
                Self::from_json(&json)
                    .with_context(|| format!("Invalid catalog at {}", path.display()))
            }
            None => Self::embedded().context("Embedded career catalog is invalid"),
        }
    }

    pub fn archetypes(&self) -> &[CareerArchetype] {
        &self.archetypes
    }

    pub fn get(&self, id: &str) -> Option<&CareerArchetype> {
        self.archetypes.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.archetypes.len()
    }
}
