//! Data-driven trait catalog: display keys and weighted penalty pools.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

use crate::trace::{RollValue, SelectionTrace, WeightedCandidate};
use crate::traits::{EpigeneticTrait, TraitKind};

const DEFAULT_TRAIT_DATA: &str = include_str!("../assets/data/traits.json");

/// Tag marking catalog entries eligible for the inbreeding penalty pool.
pub const INBREEDING_POOL_TAG: &str = "inbreeding_pool";

const INBREEDING_POOL_ID: &str = "birth.inbreeding_penalty";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TraitCatalogError {
    #[error("catalog trait `{id}` is not in the trait universe")]
    UnknownTrait { id: String },
    #[error("catalog trait `{id}` declares kind `{declared}` but the universe says `{expected}`")]
    KindMismatch {
        id: String,
        declared: &'static str,
        expected: &'static str,
    },
    #[error("catalog trait `{id}` appears more than once")]
    DuplicateId { id: String },
}

/// One trait definition in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitDef {
    pub id: String,
    pub kind: TraitKind,
    pub display_key: String,
    #[serde(default = "default_weight")]
    pub weight: u16,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TraitDef {
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TraitCatalog {
    #[serde(default)]
    pub traits: Vec<TraitDef>,
}

impl TraitCatalog {
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_TRAIT_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn default_catalog() -> &'static Self {
        static CATALOG: OnceLock<TraitCatalog> = OnceLock::new();
        CATALOG.get_or_init(Self::load_from_static)
    }

    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a trait catalog.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check every entry against the enumerated trait universe.
    ///
    /// # Errors
    ///
    /// Returns the first unknown id, category mismatch, or duplicate id.
    pub fn validate(&self) -> Result<(), TraitCatalogError> {
        for (idx, def) in self.traits.iter().enumerate() {
            let Some(known) = EpigeneticTrait::from_key(&def.id) else {
                return Err(TraitCatalogError::UnknownTrait { id: def.id.clone() });
            };
            if known.kind() != def.kind {
                return Err(TraitCatalogError::KindMismatch {
                    id: def.id.clone(),
                    declared: def.kind.key(),
                    expected: known.kind().key(),
                });
            }
            if self.traits[..idx].iter().any(|prior| prior.id == def.id) {
                return Err(TraitCatalogError::DuplicateId { id: def.id.clone() });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&TraitDef> {
        self.traits.iter().find(|def| def.id == id)
    }

    /// Negative traits eligible as inbreeding penalties, in catalog order.
    #[must_use]
    pub fn inbreeding_pool(&self) -> Vec<&TraitDef> {
        self.traits
            .iter()
            .filter(|def| def.kind == TraitKind::Negative && def.has_tag(INBREEDING_POOL_TAG))
            .collect()
    }

    /// Draw up to `count` distinct penalties from the inbreeding pool,
    /// weighted by catalog weight.
    #[must_use]
    pub fn pick_inbreeding_penalties<R>(&self, count: u32, rng: &mut R) -> Vec<&TraitDef>
    where
        R: Rng + ?Sized,
    {
        let (picks, _) = self.pick_inbreeding_penalties_with_trace(count, rng);
        picks
    }

    #[must_use]
    pub fn pick_inbreeding_penalties_with_trace<R>(
        &self,
        count: u32,
        rng: &mut R,
    ) -> (Vec<&TraitDef>, Option<SelectionTrace>)
    where
        R: Rng + ?Sized,
    {
        let mut remaining = self.inbreeding_pool();
        if remaining.is_empty() || count == 0 {
            return (Vec::new(), None);
        }

        let candidates = remaining
            .iter()
            .map(|def| WeightedCandidate {
                id: def.id.clone(),
                base_weight: f64::from(def.weight),
                multipliers: Vec::new(),
                final_weight: f64::from(def.weight),
            })
            .collect();

        let draw_target = usize::try_from(count).unwrap_or(usize::MAX);
        let mut picks = Vec::with_capacity(draw_target.min(remaining.len()));
        let mut rolls = Vec::with_capacity(picks.capacity());
        while picks.len() < draw_target && !remaining.is_empty() {
            let total_weight: u32 = remaining
                .iter()
                .fold(0_u32, |acc, def| acc.saturating_add(u32::from(def.weight)));
            let chosen_pos = if total_weight == 0 {
                // All-zero weights fall back to a uniform draw.
                let choice = rng.gen_range(0..remaining.len());
                rolls.push(RollValue::U32(u32::try_from(choice).unwrap_or(0)));
                choice
            } else {
                let mut roll = rng.gen_range(0..total_weight);
                rolls.push(RollValue::U32(roll));
                let mut selected = 0;
                for (pos, def) in remaining.iter().enumerate() {
                    let weight = u32::from(def.weight);
                    if weight == 0 {
                        continue;
                    }
                    if roll < weight {
                        selected = pos;
                        break;
                    }
                    roll -= weight;
                }
                selected
            };
            picks.push(remaining.remove(chosen_pos));
        }

        let trace = SelectionTrace {
            pool_id: INBREEDING_POOL_ID.to_string(),
            rolls,
            candidates,
            chosen_ids: picks.iter().map(|def| def.id.clone()).collect(),
        };
        (picks, Some(trace))
    }
}

const fn default_weight() -> u16 {
    1
}
