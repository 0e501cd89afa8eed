use serde::{Deserialize, Serialize};

use crate::model::DragFamily;

/// Positional drag table R_pos: slot family → jadedness-per-minute
/// coefficient. A struct of named fields rather than a map
/// so every family must be accounted for at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DragTable {
    pub gk: f64,
    pub cb: f64,
    pub fullback_wingback: f64,
    pub dm: f64,
    pub cm: f64,
    pub am_central: f64,
    pub wide_attacker: f64,
    pub st: f64,
}

impl DragTable {
    pub fn coefficient(&self, family: DragFamily) -> f64 {
        match family {
            DragFamily::Gk => self.gk,
            DragFamily::Cb => self.cb,
            DragFamily::FullbackWingback => self.fullback_wingback,
            DragFamily::Dm => self.dm,
            DragFamily::Cm => self.cm,
            DragFamily::AmCentral => self.am_central,
            DragFamily::WideAttacker => self.wide_attacker,
            DragFamily::St => self.st,
        }
    }
}

impl Default for DragTable {
    fn default() -> Self {
        Self {
            gk: 0.20,
            cb: 0.95,
            fullback_wingback: 1.65,
            dm: 1.15,
            cm: 1.45,
            am_central: 1.35,
            wide_attacker: 1.40,
            st: 1.40,
        }
    }
}

/// 14-day rolling-load window parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct RollingWindowParams {
    pub window_days: i64,
    pub minutes_threshold: u32,
    pub overload_multiplier: f64,
}

impl Default for RollingWindowParams {
    fn default() -> Self {
        Self { window_days: 14, minutes_threshold: 270, overload_multiplier: 2.5 }
    }
}
