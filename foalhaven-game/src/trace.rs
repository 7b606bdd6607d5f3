//! Decision telemetry captured during trait assignment.
//!
//! Traces carry enough structure for breeding-preview tooling and debugging
//! to reconstruct why a birth produced its traits, without re-running the
//! rules.

use serde::{Deserialize, Serialize};

/// Random roll value used by weighted selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RollValue {
    U32(u32),
    F32(f32),
}

/// Single multiplicative weight factor used in a selection trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightFactor {
    pub label: String,
    pub value: f64,
}

/// Candidate weight telemetry captured during a weighted pool selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedCandidate {
    pub id: String,
    pub base_weight: f64,
    /// Multipliers applied in order.
    #[serde(default)]
    pub multipliers: Vec<WeightFactor>,
    pub final_weight: f64,
}

/// Trace of one weighted pool selection, possibly drawing several entries
/// without replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionTrace {
    /// Identifier for the selection pool (e.g. `birth.inbreeding_penalty`).
    pub pool_id: String,
    /// Random draws in selection order.
    pub rolls: Vec<RollValue>,
    /// Candidate weights considered at the start of the selection.
    pub candidates: Vec<WeightedCandidate>,
    /// Identifiers of the selected candidates, in draw order.
    pub chosen_ids: Vec<String>,
}
