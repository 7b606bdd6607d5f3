//! Centralized balance and tuning constants for Foalhaven breeding logic.
//!
//! These values define the deterministic math for the epigenetic trait
//! rules. Keeping them together ensures that birth outcomes can only be
//! adjusted via code changes reviewed in version control, rather than
//! through external JSON assets.

// Debug logging ------------------------------------------------------------
pub(crate) const DEBUG_ENV_VAR: &str = "FOALHAVEN_DEBUG_LOGS";

// Maternal care thresholds -------------------------------------------------
pub(crate) const STRESS_CALM_MAX: f32 = 20.0;
pub(crate) const FEED_RICH_MIN: f32 = 80.0;
pub(crate) const STRESS_HIGH_MIN: f32 = 80.0;
pub(crate) const FEED_POOR_MAX: f32 = 30.0;

// Care inputs are normalized percentages.
pub(crate) const CARE_PERCENT_MIN: f32 = 0.0;
pub(crate) const CARE_PERCENT_MAX: f32 = 100.0;

// Lineage affinity ---------------------------------------------------------
pub(crate) const AFFINITY_REQUIRED: u32 = 3;
pub(crate) const LEGACY_TALENT_REQUIRED: u32 = 4;
pub(crate) const LEGACY_TALENT_CHANCE: f32 = 0.25;

// Inbreeding severity bands ------------------------------------------------
pub(crate) const INBREEDING_SEVERE_MIN: u32 = 4;
pub(crate) const MODERATE_GRANT_COUNT: u32 = 1;
pub(crate) const SEVERE_GRANT_COUNT: u32 = 2;
