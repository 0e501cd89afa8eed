//! Parameter Store: single source of truth for every numeric
//! constant the rest of the crate reads. Read-only once constructed; the
//! orchestrator MUST build one per planning call and pass it by reference.

mod condition;
mod drag;
mod familiarity;
mod jadedness;
mod scenario_weights;
mod sharpness;
mod shadow;
mod stability;

pub use condition::ConditionParams;
pub use drag::{DragTable, RollingWindowParams};
pub use familiarity::FamiliarityParams;
pub use jadedness::JadednessParams;
pub use scenario_weights::{ImportanceWeights, ScalarizationWeights, ScenarioWeights};
pub use sharpness::SharpnessParams;
pub use shadow::ShadowPriceParams;
pub use stability::{BenchParams, BigMParams, StabilityParams};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// The complete, immutable numeric configuration for one `plan_horizon`
/// call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ParameterStore {
    pub condition: ConditionParams,
    pub sharpness: SharpnessParams,
    pub familiarity: FamiliarityParams,
    pub jadedness: JadednessParams,
    pub drag: DragTable,
    pub rolling_window: RollingWindowParams,
    pub shadow: ShadowPriceParams,
    pub scenario_weights: ScenarioWeights,
    pub importance: ImportanceWeights,
    pub stability: StabilityParams,
    pub big_m: BigMParams,
    pub bench: BenchParams,
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self {
            condition: ConditionParams::default(),
            sharpness: SharpnessParams::default(),
            familiarity: FamiliarityParams::default(),
            jadedness: JadednessParams::default(),
            drag: DragTable::default(),
            rolling_window: RollingWindowParams::default(),
            shadow: ShadowPriceParams::default(),
            scenario_weights: ScenarioWeights::default(),
            importance: ImportanceWeights::default(),
            stability: StabilityParams::default(),
            big_m: BigMParams::default(),
            bench: BenchParams::default(),
        }
    }
}

/// Process-wide default store, shared read-only by any caller that does
/// not supply overrides.
pub static DEFAULT_PARAMETERS: Lazy<ParameterStore> = Lazy::new(ParameterStore::default);

/// Sparse override DTO: every field optional, merged onto
/// `ParameterStore::default()` before use — any unspecified field
/// defaults to the store's documented constants.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema, Validate)]
pub struct ParameterOverrides {
    #[serde(default)]
    #[validate(range(min = 0.0, max = 1.0))]
    pub condition_floor: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 1.0, max = 10_000_000.0))]
    pub big_m: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 1, max = 60))]
    pub rolling_window_days: Option<i64>,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 1.0))]
    pub shadow_discount_gamma: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0, max = 20))]
    pub bench_size: Option<u32>,
}

impl ParameterOverrides {
    /// Validate then merge onto a base store, returning the effective
    /// `ParameterStore` for one planning call.
    pub fn apply(&self, base: &ParameterStore) -> Result<ParameterStore, validator::ValidationErrors> {
        self.validate()?;
        let mut store = base.clone();
        if let Some(floor) = self.condition_floor {
            store.condition.c_floor = floor;
        }
        if let Some(m) = self.big_m {
            store.big_m.m = m;
        }
        if let Some(days) = self.rolling_window_days {
            store.rolling_window.window_days = days;
        }
        if let Some(gamma) = self.shadow_discount_gamma {
            store.shadow.discount_gamma = gamma;
        }
        if let Some(size) = self.bench_size {
            store.bench.size = size as usize;
        }
        Ok(store)
    }
}

/// Read-only accessors for the offline calibration harness. Never
/// mutates the store; exists so an
/// external collaborator can inspect the constants a plan ran with
/// without reaching into every submodule.
pub mod calibration {
    use super::ParameterStore;
    use serde_json::Value;

    impl ParameterStore {
        pub fn as_calibration_snapshot(&self) -> Value {
            serde_json::to_value(self).expect("ParameterStore always serializes")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_store_matches_documented_constants() {
        let store = ParameterStore::default();
        assert_eq!(store.condition.sigmoid_k, 25.0);
        assert_eq!(store.condition.c_floor, 0.91);
        assert_eq!(store.big_m.m, 1_000_000.0);
        assert_eq!(store.rolling_window.window_days, 14);
        assert_eq!(store.rolling_window.minutes_threshold, 270);
        assert_eq!(store.bench.size, 7);
    }

    #[test]
    fn bench_size_override_merges_onto_default() {
        let overrides = ParameterOverrides { bench_size: Some(5), ..Default::default() };
        let store = overrides.apply(&ParameterStore::default()).unwrap();
        assert_eq!(store.bench.size, 5);
    }

    #[test]
    fn overrides_merge_onto_default() {
        let overrides = ParameterOverrides { condition_floor: Some(0.85), ..Default::default() };
        let store = overrides.apply(&ParameterStore::default()).unwrap();
        assert_eq!(store.condition.c_floor, 0.85);
        assert_eq!(store.condition.sigmoid_k, 25.0);
    }

    #[test]
    fn out_of_range_override_is_rejected() {
        let overrides = ParameterOverrides { condition_floor: Some(5.0), ..Default::default() };
        assert!(overrides.apply(&ParameterStore::default()).is_err());
    }
}
