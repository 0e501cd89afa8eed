use serde::{Deserialize, Serialize};

use crate::model::Scenario;

/// Multi-objective scalarisation weights (w_perf, w_dev, w_rest) per
/// scenario. `Sharpness` is not represented here — it uses its own
/// specialised two-phase objective and never reaches the ordinary
/// scalarisation path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ScalarizationWeights {
    pub w_perf: f64,
    pub w_dev: f64,
    pub w_rest: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ScenarioWeights {
    pub cup_final: ScalarizationWeights,
    pub continental_ko: ScalarizationWeights,
    pub title_rival: ScalarizationWeights,
    pub standard: ScalarizationWeights,
    pub cup_early: ScalarizationWeights,
    pub dead_rubber: ScalarizationWeights,
}

impl ScenarioWeights {
    /// Scalarisation weights for `scenario`. `Sharpness` falls back to the
    /// `standard` weighting for any caller that needs *a* weight triple
    /// before the solver's override phase replaces the objective outright.
    pub fn for_scenario(&self, scenario: Scenario) -> ScalarizationWeights {
        match scenario {
            Scenario::CupFinal => self.cup_final,
            Scenario::ContinentalKo => self.continental_ko,
            Scenario::TitleRival => self.title_rival,
            Scenario::Standard => self.standard,
            Scenario::CupEarly => self.cup_early,
            Scenario::DeadRubber => self.dead_rubber,
            Scenario::Sharpness => self.standard,
        }
    }
}

impl Default for ScenarioWeights {
    fn default() -> Self {
        Self {
            cup_final: ScalarizationWeights { w_perf: 1.0, w_dev: 0.0, w_rest: 0.0 },
            continental_ko: ScalarizationWeights { w_perf: 0.8, w_dev: 0.0, w_rest: 0.2 },
            title_rival: ScalarizationWeights { w_perf: 0.7, w_dev: 0.0, w_rest: 0.3 },
            standard: ScalarizationWeights { w_perf: 0.6, w_dev: 0.1, w_rest: 0.3 },
            cup_early: ScalarizationWeights { w_perf: 0.4, w_dev: 0.3, w_rest: 0.3 },
            dead_rubber: ScalarizationWeights { w_perf: 0.2, w_dev: 0.5, w_rest: 0.3 },
        }
    }
}

/// Importance weights I_k by scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ImportanceWeights {
    pub cup_final: f64,
    pub continental_ko: f64,
    pub title_rival: f64,
    pub standard: f64,
    pub cup_early: f64,
    pub dead_rubber: f64,
    pub sharpness: f64,
}

impl ImportanceWeights {
    pub fn for_scenario(&self, scenario: Scenario) -> f64 {
        match scenario {
            Scenario::CupFinal => self.cup_final,
            Scenario::ContinentalKo => self.continental_ko,
            Scenario::TitleRival => self.title_rival,
            Scenario::Standard => self.standard,
            Scenario::CupEarly => self.cup_early,
            Scenario::DeadRubber => self.dead_rubber,
            Scenario::Sharpness => self.sharpness,
        }
    }
}

impl Default for ImportanceWeights {
    fn default() -> Self {
        Self {
            cup_final: 10.0,
            continental_ko: 5.0,
            title_rival: 3.0,
            standard: 1.5,
            cup_early: 0.8,
            dead_rubber: 0.1,
            sharpness: 1.5,
        }
    }
}
