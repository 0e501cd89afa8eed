use serde::{Deserialize, Serialize};

/// Inter-match stability costs/bonuses that discourage unnecessary
/// lineup churn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct StabilityParams {
    pub inertia_weight: f64,
    pub base_switch_cost: f64,
    pub continuity_bonus: f64,
    pub anchor_threshold: u32,
    pub anchor_multiplier: f64,
}

impl Default for StabilityParams {
    fn default() -> Self {
        Self {
            inertia_weight: 0.5,
            base_switch_cost: 0.15,
            continuity_bonus: 0.05,
            anchor_threshold: 3,
            anchor_multiplier: 2.0,
        }
    }
}

/// The forbidden-assignment sentinel cost.
/// Must exceed any feasible matrix sum by orders of magnitude while
/// staying well within float64 precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct BigMParams {
    pub m: f64,
}

impl Default for BigMParams {
    fn default() -> Self {
        Self { m: 1_000_000.0 }
    }
}

/// Bench composition: how many residual players get an
/// explicit bench slot (and thus a coverage-utility score) each match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct BenchParams {
    pub size: usize,
}

impl Default for BenchParams {
    fn default() -> Self {
        Self { size: 7 }
    }
}
