//! Epigenetic trait universe and the per-birth outcome sets.
//!
//! Trait names are plain snake_case strings on the wire (the training and
//! competition systems consume them as such), but inside the engine every
//! grantable trait is a variant of [`EpigeneticTrait`] whose category is
//! fixed by construction. Routing grants through `kind()` is what makes the
//! "one category per trait" invariant structural instead of conventional.

use serde::{Deserialize, Serialize};

const AFFINITY_KEY_PREFIX: &str = "discipline_affinity_";

/// Category a trait belongs to on the foal's record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitKind {
    Positive,
    Negative,
    Hidden,
}

impl TraitKind {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Hidden => "hidden",
        }
    }
}

/// Every trait the birth rules can grant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EpigeneticTrait {
    Resilient,
    PeopleTrusting,
    Nervous,
    LowImmunity,
    Fragile,
    Reactive,
    LegacyTalent,
    /// Parametric affinity trait; carries the slugged discipline name.
    DisciplineAffinity(String),
}

impl EpigeneticTrait {
    /// Build the affinity trait for a display-cased discipline name.
    #[must_use]
    pub fn affinity_for(discipline: &str) -> Self {
        Self::DisciplineAffinity(slug_discipline(discipline))
    }

    #[must_use]
    pub fn kind(&self) -> TraitKind {
        match self {
            Self::Resilient | Self::PeopleTrusting | Self::DisciplineAffinity(_) => {
                TraitKind::Positive
            }
            Self::Nervous | Self::LowImmunity | Self::Fragile | Self::Reactive => {
                TraitKind::Negative
            }
            Self::LegacyTalent => TraitKind::Hidden,
        }
    }

    /// The persisted snake_case key.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Resilient => "resilient".to_string(),
            Self::PeopleTrusting => "people_trusting".to_string(),
            Self::Nervous => "nervous".to_string(),
            Self::LowImmunity => "low_immunity".to_string(),
            Self::Fragile => "fragile".to_string(),
            Self::Reactive => "reactive".to_string(),
            Self::LegacyTalent => "legacy_talent".to_string(),
            Self::DisciplineAffinity(slug) => format!("{AFFINITY_KEY_PREFIX}{slug}"),
        }
    }

    /// Parse a persisted key back into the universe. Affinity keys keep only
    /// the slug; the original casing is not recoverable.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "resilient" => Some(Self::Resilient),
            "people_trusting" => Some(Self::PeopleTrusting),
            "nervous" => Some(Self::Nervous),
            "low_immunity" => Some(Self::LowImmunity),
            "fragile" => Some(Self::Fragile),
            "reactive" => Some(Self::Reactive),
            "legacy_talent" => Some(Self::LegacyTalent),
            other => other
                .strip_prefix(AFFINITY_KEY_PREFIX)
                .filter(|slug| !slug.is_empty())
                .map(|slug| Self::DisciplineAffinity(slug.to_string())),
        }
    }
}

fn slug_discipline(discipline: &str) -> String {
    discipline
        .trim()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c.to_ascii_lowercase() })
        .collect()
}

/// The per-birth trait sets handed back for persistence. Field names are the
/// wire contract: exactly `positive`, `negative`, `hidden`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TraitOutcome {
    #[serde(default)]
    pub positive: Vec<String>,
    #[serde(default)]
    pub negative: Vec<String>,
    #[serde(default)]
    pub hidden: Vec<String>,
}

impl TraitOutcome {
    /// Grant a trait from the enumerated universe, routed into the category
    /// its kind dictates. Returns false when the key is already present in
    /// any category (the earlier grant wins).
    pub fn grant(&mut self, granted: &EpigeneticTrait) -> bool {
        self.add_trait(granted.kind(), &granted.key())
    }

    /// Grant a raw key into a category. Compatibility surface for catalog
    /// entries and downstream collaborators; same dedup rule as [`grant`].
    ///
    /// [`grant`]: Self::grant
    pub fn add_trait(&mut self, kind: TraitKind, key: &str) -> bool {
        if key.is_empty() || self.has_trait(key) {
            return false;
        }
        self.category_mut(kind).push(key.to_string());
        true
    }

    /// Membership across every category.
    #[must_use]
    pub fn has_trait(&self, key: &str) -> bool {
        self.positive.iter().any(|t| t == key)
            || self.negative.iter().any(|t| t == key)
            || self.hidden.iter().any(|t| t == key)
    }

    #[must_use]
    pub fn positive_traits(&self) -> &[String] {
        &self.positive
    }

    #[must_use]
    pub fn negative_traits(&self) -> &[String] {
        &self.negative
    }

    #[must_use]
    pub fn hidden_traits(&self) -> &[String] {
        &self.hidden
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len() + self.hidden.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Re-establish both dedup invariants on a set that may have been built
    /// outside the grant path (e.g. deserialized from storage). Categories
    /// are scanned positive, negative, hidden; the first occurrence of a key
    /// wins. Idempotent.
    pub fn normalize(&mut self) {
        let mut seen: Vec<String> = Vec::with_capacity(self.len());
        for kind in [TraitKind::Positive, TraitKind::Negative, TraitKind::Hidden] {
            let list = self.category_mut(kind);
            list.retain(|key| {
                if seen.iter().any(|s| s == key) {
                    false
                } else {
                    seen.push(key.clone());
                    true
                }
            });
        }
    }

    fn category_mut(&mut self, kind: TraitKind) -> &mut Vec<String> {
        match kind {
            TraitKind::Positive => &mut self.positive,
            TraitKind::Negative => &mut self.negative,
            TraitKind::Hidden => &mut self.hidden,
        }
    }
}
