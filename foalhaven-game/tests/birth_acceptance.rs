use foalhaven_game::{
    Ancestor, BirthContext, BirthRngBundle, EpigeneticsConfig, InbreedingSeverity, Mare,
    TraitCatalog, apply_epigenetic_traits_at_birth, apply_epigenetic_traits_with_trace,
    detect_inbreeding,
};

const SAMPLE_SIZE: u64 = 5000;
const TOLERANCE: f64 = 0.025;

const PENALTY_POOL: [&str; 3] = ["fragile", "reactive", "low_immunity"];

fn context(stress: f32, feed: f32, lineage: Vec<Ancestor>) -> BirthContext {
    BirthContext {
        mare: Mare {
            id: "mare-1".to_string(),
            stress_level: stress,
            health_status: "healthy".to_string(),
        },
        lineage,
        feed_quality: feed,
        stress_level: stress,
    }
}

fn racing_lineage(count: u32) -> Vec<Ancestor> {
    (0..count)
        .map(|i| Ancestor::tagged(format!("r{i}"), format!("Racer {i}"), "Racing"))
        .collect()
}

#[test]
fn optimal_care_scenario() {
    let ctx = context(15.0, 85.0, vec![]);
    let outcome = apply_epigenetic_traits_at_birth(
        &ctx,
        EpigeneticsConfig::default_config(),
        TraitCatalog::default_catalog(),
        &BirthRngBundle::from_birth_seed(1),
    );
    assert!(outcome.has_trait("resilient"));
    assert!(outcome.has_trait("people_trusting"));
    assert!(outcome.negative_traits().is_empty());
    assert!(outcome.hidden_traits().is_empty());
}

#[test]
fn high_stress_poor_nutrition_scenario() {
    let ctx = context(85.0, 25.0, vec![]);
    let outcome = apply_epigenetic_traits_at_birth(
        &ctx,
        EpigeneticsConfig::default_config(),
        TraitCatalog::default_catalog(),
        &BirthRngBundle::from_birth_seed(1),
    );
    assert!(outcome.has_trait("nervous"));
    assert!(outcome.has_trait("low_immunity"));
    assert!(outcome.positive_traits().is_empty());
}

#[test]
fn severe_inbreeding_scenario() {
    let lineage: Vec<Ancestor> = (0..4)
        .map(|i| {
            let mut a = Ancestor::new("shared", "Shared Sire");
            a.name = format!("Shared Sire ({i})");
            a
        })
        .collect();
    assert_eq!(
        detect_inbreeding(&lineage).severity,
        InbreedingSeverity::Severe
    );

    for seed in 0..64_u64 {
        let ctx = context(50.0, 50.0, lineage.clone());
        let outcome = apply_epigenetic_traits_at_birth(
            &ctx,
            EpigeneticsConfig::default_config(),
            TraitCatalog::default_catalog(),
            &BirthRngBundle::from_birth_seed(seed),
        );
        let pool_hits = outcome
            .negative_traits()
            .iter()
            .filter(|t| PENALTY_POOL.contains(&t.as_str()))
            .count();
        assert!(pool_hits >= 2, "seed {seed} granted {pool_hits} penalties");
    }
}

#[test]
fn outcomes_respect_dedup_invariants_across_seeds() {
    let lineage = {
        let mut l = racing_lineage(4);
        l.push(Ancestor::new("shared", "Shared"));
        l.push(Ancestor::new("shared", "Shared"));
        l
    };
    for seed in 0..128_u64 {
        let ctx = context(85.0, 25.0, lineage.clone());
        let mut outcome = apply_epigenetic_traits_at_birth(
            &ctx,
            EpigeneticsConfig::default_config(),
            TraitCatalog::default_catalog(),
            &BirthRngBundle::from_birth_seed(seed),
        );

        let once = outcome.clone();
        outcome.normalize();
        assert_eq!(outcome, once, "normalize must be idempotent (seed {seed})");

        let mut seen: Vec<&str> = Vec::new();
        for key in outcome
            .positive_traits()
            .iter()
            .chain(outcome.negative_traits())
            .chain(outcome.hidden_traits())
        {
            assert!(
                !seen.contains(&key.as_str()),
                "trait {key} appears twice (seed {seed})"
            );
            seen.push(key);
        }
    }
}

#[test]
fn legacy_talent_rate_tracks_configured_chance() {
    let cfg = EpigeneticsConfig::default_config();
    let catalog = TraitCatalog::default_catalog();
    let lineage = racing_lineage(4);
    let ctx = context(50.0, 50.0, lineage);

    let mut granted = 0_u32;
    for seed in 0..SAMPLE_SIZE {
        let outcome =
            apply_epigenetic_traits_at_birth(&ctx, cfg, catalog, &BirthRngBundle::from_birth_seed(seed));
        if outcome.has_trait("legacy_talent") {
            granted += 1;
        }
    }
    let sample_size = u32::try_from(SAMPLE_SIZE).expect("sample size fits u32");
    let observed = f64::from(granted) / f64::from(sample_size);
    let expected = f64::from(cfg.legacy_talent_chance);
    assert!(
        (observed - expected).abs() <= TOLERANCE,
        "legacy talent rate drifted: observed {observed:.4}"
    );
}

#[test]
fn legacy_talent_requires_four_specialized_ancestors() {
    let cfg = {
        let mut cfg = EpigeneticsConfig::default();
        cfg.legacy_talent_chance = 1.0;
        cfg
    };
    let catalog = TraitCatalog::default_catalog();

    let three = context(50.0, 50.0, racing_lineage(3));
    let result = apply_epigenetic_traits_with_trace(
        &three,
        &cfg,
        catalog,
        &BirthRngBundle::from_birth_seed(9),
    );
    assert!(!result.outcome.has_trait("legacy_talent"));
    assert!(result.trace.legacy_roll.is_none());
    assert!(result.outcome.has_trait("discipline_affinity_racing"));

    let four = context(50.0, 50.0, racing_lineage(4));
    let result = apply_epigenetic_traits_with_trace(
        &four,
        &cfg,
        catalog,
        &BirthRngBundle::from_birth_seed(9),
    );
    assert!(result.outcome.has_trait("legacy_talent"));
    assert!(result.trace.legacy_roll.is_some());
}

#[test]
fn rules_stack_on_one_birth() {
    // Calm, well-fed mare with a specialized but inbred lineage hits the
    // positive care rule, the penalty rule, and both affinity rules at once.
    let mut lineage = racing_lineage(4);
    lineage.extend((0..2).map(|_| Ancestor::new("shared", "Shared")));
    let ctx = context(10.0, 90.0, lineage);
    let cfg = {
        let mut cfg = EpigeneticsConfig::default();
        cfg.legacy_talent_chance = 1.0;
        cfg
    };
    let result = apply_epigenetic_traits_with_trace(
        &ctx,
        &cfg,
        TraitCatalog::default_catalog(),
        &BirthRngBundle::from_birth_seed(21),
    );
    assert!(result.outcome.has_trait("resilient"));
    assert!(result.outcome.has_trait("people_trusting"));
    assert!(result.outcome.has_trait("discipline_affinity_racing"));
    assert!(result.outcome.has_trait("legacy_talent"));
    assert_eq!(result.outcome.negative_traits().len(), 1);
    assert_eq!(
        result.trace.inbreeding.severity,
        InbreedingSeverity::Moderate
    );
}
