use serde::{Deserialize, Serialize};

/// Shadow-pricing discount, scarcity, and weighting constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ShadowPriceParams {
    pub discount_gamma: f64,
    pub scarcity_lambda_v: f64,
    pub scarcity_cap: f64,
    pub shadow_weight: f64,
}

impl Default for ShadowPriceParams {
    fn default() -> Self {
        Self { discount_gamma: 0.85, scarcity_lambda_v: 2.0, scarcity_cap: 0.5, shadow_weight: 1.0 }
    }
}
