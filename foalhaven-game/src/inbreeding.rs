//! Inbreeding detection over a lineage.
//!
//! Duplicate ancestor ids inside one lineage mean a shared ancestor on both
//! sides of the pairing. The detector only classifies; the trait assigner
//! decides what the classification costs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ancestry::Ancestor;
use crate::constants::INBREEDING_SEVERE_MIN;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InbreedingSeverity {
    #[default]
    None,
    Moderate,
    Severe,
}

impl InbreedingSeverity {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }

    /// Classify from the size of the largest duplicate-id group.
    #[must_use]
    pub const fn from_max_duplicates(max_duplicate_count: u32) -> Self {
        if max_duplicate_count >= INBREEDING_SEVERE_MIN {
            Self::Severe
        } else if max_duplicate_count >= 2 {
            Self::Moderate
        } else {
            Self::None
        }
    }
}

/// Inbreeding signal consumed by the trait assigner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InbreedingReport {
    pub detected: bool,
    pub severity: InbreedingSeverity,
    /// Size of the largest duplicate-id group; 0 or 1 means no duplication.
    pub max_duplicate_count: u32,
    /// Ids occurring more than once, in first-seen lineage order.
    pub duplicate_ids: Vec<String>,
}

/// Group ancestors by id and classify the repetition.
#[must_use]
pub fn detect_inbreeding(lineage: &[Ancestor]) -> InbreedingReport {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for ancestor in lineage {
        *counts.entry(ancestor.id.as_str()).or_insert(0) += 1;
    }

    let mut duplicate_ids: Vec<String> = Vec::new();
    let mut max_duplicate_count = 0_u32;
    for ancestor in lineage {
        let count = counts.get(ancestor.id.as_str()).copied().unwrap_or(0);
        if count > 1 && !duplicate_ids.iter().any(|id| id == &ancestor.id) {
            duplicate_ids.push(ancestor.id.clone());
        }
        max_duplicate_count = max_duplicate_count.max(count);
    }

    InbreedingReport {
        detected: !duplicate_ids.is_empty(),
        severity: if duplicate_ids.is_empty() {
            InbreedingSeverity::None
        } else {
            InbreedingSeverity::from_max_duplicates(max_duplicate_count)
        },
        max_duplicate_count,
        duplicate_ids,
    }
}
