//! Epigenetics tuning configuration.
//!
//! Thresholds mirror the documented birth rules; the probabilistic knobs
//! (legacy talent chance, severity grant counts) are tunable because the
//! design intentionally exposes them rather than hard-coding a curve.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

use crate::constants::{
    CARE_PERCENT_MAX, CARE_PERCENT_MIN, FEED_POOR_MAX, FEED_RICH_MIN, LEGACY_TALENT_CHANCE,
    LEGACY_TALENT_REQUIRED, MODERATE_GRANT_COUNT, SEVERE_GRANT_COUNT, STRESS_CALM_MAX,
    STRESS_HIGH_MIN,
};

const DEFAULT_EPIGENETICS_DATA: &str = include_str!("../assets/data/epigenetics.json");

#[derive(Debug, Error, PartialEq)]
pub enum EpigeneticsConfigError {
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f32,
        max: f32,
        value: f32,
    },
    #[error("calm stress ceiling {calm_max:.2} must stay below the high-stress floor {high_min:.2}")]
    StressBandsOverlap { calm_max: f32, high_min: f32 },
    #[error("poor feed ceiling {poor_max:.2} must stay below the rich feed floor {rich_min:.2}")]
    FeedBandsOverlap { poor_max: f32, rich_min: f32 },
    #[error("severe inbreeding must grant at least as many penalties as moderate ({moderate} > {severe})")]
    SeverityGrantsInverted { moderate: u32, severe: u32 },
    #[error("severe inbreeding must grant at least one penalty")]
    SevereGrantsNothing,
}

/// Maternal care thresholds driving the deterministic stress/feed rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CareThresholds {
    #[serde(default = "default_stress_calm_max")]
    pub stress_calm_max: f32,
    #[serde(default = "default_feed_rich_min")]
    pub feed_rich_min: f32,
    #[serde(default = "default_stress_high_min")]
    pub stress_high_min: f32,
    #[serde(default = "default_feed_poor_max")]
    pub feed_poor_max: f32,
}

impl Default for CareThresholds {
    fn default() -> Self {
        Self {
            stress_calm_max: default_stress_calm_max(),
            feed_rich_min: default_feed_rich_min(),
            stress_high_min: default_stress_high_min(),
            feed_poor_max: default_feed_poor_max(),
        }
    }
}

/// Complete epigenetics configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpigeneticsConfig {
    #[serde(default)]
    pub care: CareThresholds,
    /// Ancestors resolving to one discipline before a legacy talent roll.
    #[serde(default = "default_legacy_required")]
    pub legacy_required: u32,
    #[serde(default = "default_legacy_talent_chance")]
    pub legacy_talent_chance: f32,
    #[serde(default = "default_moderate_grant_count")]
    pub moderate_grant_count: u32,
    #[serde(default = "default_severe_grant_count")]
    pub severe_grant_count: u32,
}

impl Default for EpigeneticsConfig {
    fn default() -> Self {
        Self {
            care: CareThresholds::default(),
            legacy_required: default_legacy_required(),
            legacy_talent_chance: default_legacy_talent_chance(),
            moderate_grant_count: default_moderate_grant_count(),
            severe_grant_count: default_severe_grant_count(),
        }
    }
}

impl EpigeneticsConfig {
    /// Load configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or validation fails.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }

    /// Get embedded default configuration.
    #[must_use]
    pub fn default_config() -> &'static Self {
        static CONFIG: OnceLock<EpigeneticsConfig> = OnceLock::new();
        CONFIG.get_or_init(|| {
            serde_json::from_str(DEFAULT_EPIGENETICS_DATA).unwrap_or_default()
        })
    }

    /// Validate threshold ordering and probability bounds.
    ///
    /// # Errors
    ///
    /// Returns `EpigeneticsConfigError` when any field violates the
    /// documented bounds.
    pub fn validate(&self) -> Result<(), EpigeneticsConfigError> {
        for (field, value) in [
            ("care.stress_calm_max", self.care.stress_calm_max),
            ("care.feed_rich_min", self.care.feed_rich_min),
            ("care.stress_high_min", self.care.stress_high_min),
            ("care.feed_poor_max", self.care.feed_poor_max),
        ] {
            if !value.is_finite() || !(CARE_PERCENT_MIN..=CARE_PERCENT_MAX).contains(&value) {
                return Err(EpigeneticsConfigError::RangeViolation {
                    field,
                    min: CARE_PERCENT_MIN,
                    max: CARE_PERCENT_MAX,
                    value,
                });
            }
        }
        if self.care.stress_calm_max >= self.care.stress_high_min {
            return Err(EpigeneticsConfigError::StressBandsOverlap {
                calm_max: self.care.stress_calm_max,
                high_min: self.care.stress_high_min,
            });
        }
        if self.care.feed_poor_max >= self.care.feed_rich_min {
            return Err(EpigeneticsConfigError::FeedBandsOverlap {
                poor_max: self.care.feed_poor_max,
                rich_min: self.care.feed_rich_min,
            });
        }
        if !self.legacy_talent_chance.is_finite()
            || !(0.0..=1.0).contains(&self.legacy_talent_chance)
        {
            return Err(EpigeneticsConfigError::RangeViolation {
                field: "legacy_talent_chance",
                min: 0.0,
                max: 1.0,
                value: self.legacy_talent_chance,
            });
        }
        if self.severe_grant_count == 0 {
            return Err(EpigeneticsConfigError::SevereGrantsNothing);
        }
        if self.moderate_grant_count > self.severe_grant_count {
            return Err(EpigeneticsConfigError::SeverityGrantsInverted {
                moderate: self.moderate_grant_count,
                severe: self.severe_grant_count,
            });
        }
        Ok(())
    }
}

const fn default_stress_calm_max() -> f32 {
    STRESS_CALM_MAX
}

const fn default_feed_rich_min() -> f32 {
    FEED_RICH_MIN
}

const fn default_stress_high_min() -> f32 {
    STRESS_HIGH_MIN
}

const fn default_feed_poor_max() -> f32 {
    FEED_POOR_MAX
}

const fn default_legacy_required() -> u32 {
    LEGACY_TALENT_REQUIRED
}

const fn default_legacy_talent_chance() -> f32 {
    LEGACY_TALENT_CHANCE
}

const fn default_moderate_grant_count() -> u32 {
    MODERATE_GRANT_COUNT
}

const fn default_severe_grant_count() -> u32 {
    SEVERE_GRANT_COUNT
}
