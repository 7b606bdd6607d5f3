//! Ancestry data model for breeding and birth events.
//!
//! Ancestor records arrive from persisted horse data with inconsistent,
//! partially-populated discipline fields; every field beyond `id`/`name`
//! is optional and absence is never an error.

use serde::{Deserialize, Serialize};

/// One competition entry in an ancestor's record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionRecord {
    pub discipline: String,
    pub placement: u32,
}

/// Named proficiency score. Stored as a sequence rather than a map so that
/// insertion order survives serialization; the analyzer's tie-breaks depend
/// on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisciplineScore {
    pub discipline: String,
    pub score: f32,
}

/// One ancestor in a lineage. Duplicate `id` values across a lineage are a
/// first-class signal (shared ancestors), not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Ancestor {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discipline: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discipline_scores: Vec<DisciplineScore>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub competition_history: Vec<CompetitionRecord>,
}

impl Ancestor {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Ancestor carrying a direct discipline tag.
    #[must_use]
    pub fn tagged(id: impl Into<String>, name: impl Into<String>, discipline: &str) -> Self {
        Self {
            discipline: Some(discipline.to_string()),
            ..Self::new(id, name)
        }
    }

    /// True when at least one discipline source is populated.
    #[must_use]
    pub fn has_discipline_source(&self) -> bool {
        self.discipline.is_some()
            || !self.discipline_scores.is_empty()
            || !self.competition_history.is_empty()
    }
}

/// Minimal dam identity carried through for traceability. Trait rules read
/// the explicit stress/feed fields on [`BirthContext`], not this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Mare {
    pub id: String,
    #[serde(default)]
    pub stress_level: f32,
    #[serde(default)]
    pub health_status: String,
}

/// The single input to the trait assigner, built by the birth-event driver
/// from persisted horse and lineage data. A missing lineage deserializes as
/// empty; out-of-range care inputs are clamped at rule evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BirthContext {
    pub mare: Mare,
    #[serde(default)]
    pub lineage: Vec<Ancestor>,
    #[serde(default)]
    pub feed_quality: f32,
    #[serde(default)]
    pub stress_level: f32,
}
