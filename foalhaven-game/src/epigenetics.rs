//! Epigenetic trait assignment at birth.
//!
//! One pass, pure modulo the injected RNG bundle: maternal care thresholds,
//! the inbreeding signal, and lineage affinity each contribute grants, and
//! the outcome sets absorb the union with first-grant-wins deduplication.
//! Degraded inputs never abort a birth; they degrade to "no signal".

#[cfg(debug_assertions)]
use crate::constants::DEBUG_ENV_VAR;

use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::ancestry::BirthContext;
use crate::catalog::TraitCatalog;
use crate::config::EpigeneticsConfig;
use crate::inbreeding::{InbreedingReport, InbreedingSeverity, detect_inbreeding};
use crate::lineage::{AffinityReport, check_lineage_affinity_detailed};
use crate::numbers::clamp_percent;
use crate::rng::BirthRngBundle;
use crate::trace::{RollValue, SelectionTrace};
use crate::traits::{EpigeneticTrait, TraitOutcome};

#[cfg(debug_assertions)]
fn debug_log_enabled() -> bool {
    matches!(std::env::var(DEBUG_ENV_VAR), Ok(val) if val != "0")
}

#[cfg(not(debug_assertions))]
const fn debug_log_enabled() -> bool {
    false
}

/// Birth rules, in evaluation order. Earlier rules win key collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BirthRuleId {
    OptimalCare,
    HighStress,
    PoorNutrition,
    InbreedingPenalty,
    DisciplineAffinity,
    LegacyTalent,
}

pub type BirthRuleSet = SmallVec<[BirthRuleId; 4]>;

/// Telemetry for one birth: which rules fired and what the random draws saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthDecisionTrace {
    pub rules_fired: BirthRuleSet,
    pub inbreeding: InbreedingReport,
    pub affinity: AffinityReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty_selection: Option<SelectionTrace>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_roll: Option<RollValue>,
}

/// Outcome plus trace, as handed to the birth-event driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthAssignment {
    pub outcome: TraitOutcome,
    pub trace: BirthDecisionTrace,
}

/// Assign the newborn's epigenetic traits.
///
/// Care inputs are clamped into the normalized percent range before rule
/// evaluation; an empty lineage yields no lineage-derived grants; the mare
/// record is carried for traceability only.
#[must_use]
pub fn apply_epigenetic_traits_at_birth(
    ctx: &BirthContext,
    cfg: &EpigeneticsConfig,
    catalog: &TraitCatalog,
    rng: &BirthRngBundle,
) -> TraitOutcome {
    apply_epigenetic_traits_with_trace(ctx, cfg, catalog, rng).outcome
}

/// Same assignment, returning the decision trace alongside the outcome.
#[must_use]
pub fn apply_epigenetic_traits_with_trace(
    ctx: &BirthContext,
    cfg: &EpigeneticsConfig,
    catalog: &TraitCatalog,
    rng: &BirthRngBundle,
) -> BirthAssignment {
    let stress = clamp_percent(ctx.stress_level);
    let feed = clamp_percent(ctx.feed_quality);

    let mut outcome = TraitOutcome::default();
    let mut rules_fired = BirthRuleSet::new();

    if stress <= cfg.care.stress_calm_max && feed >= cfg.care.feed_rich_min {
        rules_fired.push(BirthRuleId::OptimalCare);
        outcome.grant(&EpigeneticTrait::Resilient);
        outcome.grant(&EpigeneticTrait::PeopleTrusting);
    }
    if stress >= cfg.care.stress_high_min {
        rules_fired.push(BirthRuleId::HighStress);
        outcome.grant(&EpigeneticTrait::Nervous);
    }
    if feed <= cfg.care.feed_poor_max {
        rules_fired.push(BirthRuleId::PoorNutrition);
        outcome.grant(&EpigeneticTrait::LowImmunity);
    }

    let inbreeding = detect_inbreeding(&ctx.lineage);
    let mut penalty_selection = None;
    if inbreeding.detected {
        rules_fired.push(BirthRuleId::InbreedingPenalty);
        let grant_count = match inbreeding.severity {
            InbreedingSeverity::Severe => cfg.severe_grant_count,
            InbreedingSeverity::Moderate => cfg.moderate_grant_count,
            InbreedingSeverity::None => 0,
        };
        let (picks, selection) =
            catalog.pick_inbreeding_penalties_with_trace(grant_count, &mut *rng.penalty());
        for def in picks {
            outcome.add_trait(def.kind, &def.id);
        }
        penalty_selection = selection;
    }

    let affinity = check_lineage_affinity_detailed(&ctx.lineage);
    if affinity.affinity
        && let Some(discipline) = &affinity.discipline
    {
        rules_fired.push(BirthRuleId::DisciplineAffinity);
        outcome.grant(&EpigeneticTrait::affinity_for(discipline));
    }

    let mut legacy_roll = None;
    if affinity.dominant_count >= cfg.legacy_required {
        let roll: f32 = rng.legacy().gen_range(0.0..1.0);
        legacy_roll = Some(RollValue::F32(roll));
        if roll < cfg.legacy_talent_chance {
            rules_fired.push(BirthRuleId::LegacyTalent);
            outcome.grant(&EpigeneticTrait::LegacyTalent);
        }
    }

    // Grants already route through the dedup path; normalize is a no-op
    // safety pass and keeps the idempotence law observable.
    outcome.normalize();

    if debug_log_enabled() {
        println!(
            "Birth assignment | mare {} rules {:?} outcome {:?}",
            ctx.mare.id, rules_fired, outcome
        );
    }

    BirthAssignment {
        outcome,
        trace: BirthDecisionTrace {
            rules_fired,
            inbreeding,
            affinity,
            penalty_selection,
            legacy_roll,
        },
    }
}
