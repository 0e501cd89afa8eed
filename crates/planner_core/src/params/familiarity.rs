use serde::{Deserialize, Serialize};

/// Θ(f) = clamp(0.7 + 0.3·f, 0.7, 1.0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FamiliarityParams {
    pub base: f64,
    pub slope: f64,
}

impl FamiliarityParams {
    pub fn factor(&self, f: f64) -> f64 {
        (self.base + self.slope * f).clamp(self.base, self.base + self.slope)
    }
}

impl Default for FamiliarityParams {
    fn default() -> Self {
        Self { base: 0.7, slope: 0.3 }
    }
}
