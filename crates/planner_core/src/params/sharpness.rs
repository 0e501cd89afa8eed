use serde::{Deserialize, Serialize};

/// Sharpness bounded sigmoid and decay piecewise function. Decay
/// breakpoints/rates are exposed as fields rather than literal constants
/// so a calibration pass can retune the decay cliff shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SharpnessParams {
    pub sigmoid_k: f64,
    pub sigmoid_s0: f64,
    pub bounded_scale: f64,
    pub bounded_offset: f64,
    /// Days of inactivity before decay starts (0% below this).
    pub grace_days: i64,
    /// Days of inactivity before the steep-decay cliff engages.
    pub cliff_days: i64,
    pub mild_decay_per_day: f64,
    pub cliff_decay_per_day: f64,
    /// Sharpness above which match-minute gain diminishes sharply.
    pub diminishing_returns_threshold: f64,
}

impl SharpnessParams {
    /// Ψ(s) = bounded_scale·σ(k(s−s0)) − bounded_offset.
    pub fn factor(&self, s: f64) -> f64 {
        let sigmoid = 1.0 / (1.0 + (-self.sigmoid_k * (s - self.sigmoid_s0)).exp());
        self.bounded_scale * sigmoid - self.bounded_offset
    }

    /// Sharpness lost to `days_idle` days without minutes.
    pub fn decay_for_gap(&self, days_idle: i64) -> f64 {
        if days_idle <= self.grace_days {
            0.0
        } else if days_idle < self.cliff_days {
            (days_idle - self.grace_days) as f64 * self.mild_decay_per_day
        } else {
            let mild_span = self.cliff_days - self.grace_days;
            let cliff_span = days_idle - self.cliff_days;
            mild_span as f64 * self.mild_decay_per_day + cliff_span as f64 * self.cliff_decay_per_day
        }
    }
}

impl Default for SharpnessParams {
    fn default() -> Self {
        Self {
            sigmoid_k: 15.0,
            sigmoid_s0: 0.75,
            bounded_scale: 1.02,
            bounded_offset: 0.02,
            grace_days: 3,
            cliff_days: 7,
            mild_decay_per_day: 0.015,
            cliff_decay_per_day: 0.065,
            diminishing_returns_threshold: 0.9,
        }
    }
}
