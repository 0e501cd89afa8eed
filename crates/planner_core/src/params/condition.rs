use serde::{Deserialize, Serialize};

/// Condition sigmoid, hard floor, and match-drain/recovery constants.
/// `recovery_rate` and `jadedness_throttle_scale` are the calibration
/// surface for how aggressively condition recovers with rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ConditionParams {
    pub sigmoid_k: f64,
    pub sigmoid_c0: f64,
    pub c_floor: f64,
    pub cup_final_floor_multiplier: f64,
    /// Drain per played minute fraction at a neutral (stamina=100) slot.
    pub drain_rate: f64,
    /// Recovery points per rest day at natural_fitness=100, zero jadedness.
    pub recovery_rate: f64,
    /// Shape parameter of the jadedness recovery throttle: higher means
    /// jadedness suppresses recovery more aggressively.
    pub jadedness_throttle_scale: f64,
}

impl ConditionParams {
    pub fn sigmoid(&self, c: f64) -> f64 {
        1.0 / (1.0 + (-self.sigmoid_k * (c - self.sigmoid_c0)).exp())
    }

    /// J_throttle(J) ∈ [0, ~1): recovery multiplier suppression from
    /// accumulated jadedness.
    pub fn jadedness_throttle(&self, jadedness: f64) -> f64 {
        1.0 - (-jadedness / self.jadedness_throttle_scale).exp()
    }
}

impl Default for ConditionParams {
    fn default() -> Self {
        Self {
            sigmoid_k: 25.0,
            sigmoid_c0: 0.88,
            c_floor: 0.91,
            cup_final_floor_multiplier: 0.8,
            drain_rate: 0.12,
            recovery_rate: 0.09,
            jadedness_throttle_scale: 500.0,
        }
    }
}
