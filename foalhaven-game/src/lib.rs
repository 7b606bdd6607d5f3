//! Foalhaven Breeding Engine
//!
//! Platform-agnostic core breeding logic for the Foalhaven horse-breeding
//! simulation game. This crate provides the epigenetic trait assignment
//! invoked once per birth event, without UI or platform-specific
//! dependencies: lineage analysis, inbreeding detection, and the
//! threshold-rule trait assigner composing both.

pub mod ancestry;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod epigenetics;
pub mod inbreeding;
pub mod lineage;
pub mod numbers;
pub mod rng;
pub mod trace;
pub mod traits;

// Re-export commonly used types
pub use ancestry::{Ancestor, BirthContext, CompetitionRecord, DisciplineScore, Mare};
pub use catalog::{INBREEDING_POOL_TAG, TraitCatalog, TraitCatalogError, TraitDef};
pub use config::{CareThresholds, EpigeneticsConfig, EpigeneticsConfigError};
pub use epigenetics::{
    BirthAssignment, BirthDecisionTrace, BirthRuleId, BirthRuleSet,
    apply_epigenetic_traits_at_birth, apply_epigenetic_traits_with_trace,
};
pub use inbreeding::{InbreedingReport, InbreedingSeverity, detect_inbreeding};
pub use lineage::{
    AffinityReport, AffinityStrengthTier, AffinitySummary, DisciplineCount, SpecificAffinity,
    check_lineage_affinity, check_lineage_affinity_detailed, check_specific_affinity,
    resolve_discipline,
};
pub use rng::BirthRngBundle;
pub use trace::{RollValue, SelectionTrace, WeightFactor, WeightedCandidate};
pub use traits::{EpigeneticTrait, TraitKind, TraitOutcome};

/// Trait for abstracting data loading operations
/// Platform-specific implementations should provide this
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the trait catalog from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    fn load_trait_catalog(&self) -> Result<TraitCatalog, Self::Error>;

    /// Load configuration data for a specific system
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or parsed.
    fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
    where
        T: serde::de::DeserializeOwned;
}

/// Birth-event facade composing catalog, config, and per-birth RNG streams.
pub struct BreedingEngine<L>
where
    L: DataLoader,
{
    data_loader: L,
}

impl<L> BreedingEngine<L>
where
    L: DataLoader,
{
    /// Create a new breeding engine with the provided data loader
    pub const fn new(data_loader: L) -> Self {
        Self { data_loader }
    }

    /// Assign the traits for one birth event, deterministically for the
    /// given seed.
    ///
    /// # Errors
    ///
    /// Returns an error if catalog or configuration data cannot be loaded
    /// or fails validation.
    pub fn assign_traits_at_birth(
        &self,
        seed: u64,
        ctx: &BirthContext,
    ) -> Result<BirthAssignment, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
    {
        let catalog = self.data_loader.load_trait_catalog().map_err(Into::into)?;
        catalog.validate()?;
        let cfg: EpigeneticsConfig = self
            .data_loader
            .load_config("epigenetics")
            .map_err(Into::into)?;
        cfg.validate()?;
        let rng = BirthRngBundle::from_birth_seed(seed);
        Ok(apply_epigenetic_traits_with_trace(ctx, &cfg, &catalog, &rng))
    }

    /// Lineage insight for breeding-preview tooling; no data loading and no
    /// trait assignment.
    #[must_use]
    pub fn preview_lineage(&self, lineage: &[Ancestor]) -> AffinityReport {
        check_lineage_affinity_detailed(lineage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::DeserializeOwned;
    use std::convert::Infallible;

    #[derive(Clone, Copy, Default)]
    struct FixtureLoader;

    impl DataLoader for FixtureLoader {
        type Error = Infallible;

        fn load_trait_catalog(&self) -> Result<TraitCatalog, Self::Error> {
            Ok(TraitCatalog::default_catalog().clone())
        }

        fn load_config<T>(&self, _config_name: &str) -> Result<T, Self::Error>
        where
            T: DeserializeOwned,
        {
            let parsed = serde_json::from_str("{}")
                .or_else(|_| serde_json::from_str("null"))
                .unwrap();
            Ok(parsed)
        }
    }

    fn severe_context() -> BirthContext {
        BirthContext {
            mare: Mare {
                id: "mare-7".to_string(),
                stress_level: 12.0,
                health_status: "healthy".to_string(),
            },
            lineage: (0..4).map(|_| Ancestor::new("shared", "Shared")).collect(),
            feed_quality: 55.0,
            stress_level: 45.0,
        }
    }

    #[test]
    fn engine_assigns_deterministically_for_a_seed() {
        let engine = BreedingEngine::new(FixtureLoader);
        let ctx = severe_context();
        let first = engine.assign_traits_at_birth(0xABCD, &ctx).unwrap();
        let second = engine.assign_traits_at_birth(0xABCD, &ctx).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.trace.inbreeding.severity, InbreedingSeverity::Severe);
        assert_eq!(first.outcome.negative_traits().len(), 2);
    }

    #[test]
    fn engine_preview_matches_direct_analyzer() {
        let engine = BreedingEngine::new(FixtureLoader);
        let lineage: Vec<Ancestor> = (0..3)
            .map(|i| Ancestor::tagged(format!("a{i}"), "A", "Racing"))
            .collect();
        let preview = engine.preview_lineage(&lineage);
        assert_eq!(preview, check_lineage_affinity_detailed(&lineage));
        assert!(preview.affinity);
    }
}
