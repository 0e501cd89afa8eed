//! Fixtures and their scenario tags.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::FixtureId;

/// Categorical tag driving importance weight, scalarisation weights, and
/// certain gates — e.g. the condition-floor softening in `CupFinal` and the
/// objective flip in `Sharpness`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    CupFinal,
    ContinentalKo,
    TitleRival,
    Standard,
    CupEarly,
    DeadRubber,
    Sharpness,
}

impl Scenario {
    /// Whether the condition floor (c >= 0.91) is a hard gate (true for
    /// every scenario but `CupFinal`, where it softens to a multiplier).
    pub fn hard_condition_floor(self) -> bool {
        !matches!(self, Scenario::CupFinal)
    }

    /// Whether the assignment objective is replaced by the sharpness-build
    /// override.
    pub fn is_sharpness_override(self) -> bool {
        matches!(self, Scenario::Sharpness)
    }
}

/// A single match in the planning horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Fixture {
    pub id: FixtureId,
    pub date: NaiveDate,
    /// Real in [0.1, 10.0].
    pub importance_weight: f64,
    pub scenario: Scenario,
    pub opponent_strength_ratio: Option<f64>,
}

impl Fixture {
    pub const MIN_IMPORTANCE: f64 = 0.1;
    pub const MAX_IMPORTANCE: f64 = 10.0;

    pub fn validate(&self) -> Result<(), String> {
        if !(Self::MIN_IMPORTANCE..=Self::MAX_IMPORTANCE).contains(&self.importance_weight) {
            return Err(format!(
                "fixture {}: importance_weight {} out of range [{}, {}]",
                self.id, self.importance_weight, Self::MIN_IMPORTANCE, Self::MAX_IMPORTANCE
            ));
        }
        Ok(())
    }
}
