use serde::{Deserialize, Serialize};

/// Jadedness step function thresholds and the 14-day-window overload
/// multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct JadednessParams {
    pub fresh_threshold: f64,
    pub moderate_threshold: f64,
    pub heavy_threshold: f64,
    pub fresh_factor: f64,
    pub moderate_factor: f64,
    pub heavy_factor: f64,
    pub severe_factor: f64,
    /// Background recovery applied per rest day outside of a holiday.
    pub passive_recovery_per_day: f64,
}

impl JadednessParams {
    /// Step function over accumulated jadedness: Fresh
    /// ≤200→1.0, ≤400→0.9, ≤700→0.7, else→0.4.
    pub fn factor(&self, jadedness: f64) -> f64 {
        if jadedness <= self.fresh_threshold {
            self.fresh_factor
        } else if jadedness <= self.moderate_threshold {
            self.moderate_factor
        } else if jadedness <= self.heavy_threshold {
            self.heavy_factor
        } else {
            self.severe_factor
        }
    }
}

impl Default for JadednessParams {
    fn default() -> Self {
        Self {
            fresh_threshold: 200.0,
            moderate_threshold: 400.0,
            heavy_threshold: 700.0,
            fresh_factor: 1.0,
            moderate_factor: 0.9,
            heavy_factor: 0.7,
            severe_factor: 0.4,
            passive_recovery_per_day: 5.0,
        }
    }
}
