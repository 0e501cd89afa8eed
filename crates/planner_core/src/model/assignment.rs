//! Per-fixture assignments, user constraints, rationales, and the overall
//! horizon plan returned to the caller.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::ids::{FixtureId, PlayerId};
use super::player::PlayerState;
use super::slot::SlotKey;

/// User-supplied overrides layered on top of availability flags: locks
/// always honored if compatible, rejections never violated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Constraints {
    pub locks: HashMap<PlayerId, SlotKey>,
    pub rejections: HashSet<(PlayerId, SlotKey)>,
    pub unavailable: HashSet<PlayerId>,
}

impl Constraints {
    pub fn is_locked(&self, player: &PlayerId, slot: SlotKey) -> bool {
        self.locks.get(player) == Some(&slot)
    }

    pub fn is_rejected(&self, player: &PlayerId, slot: SlotKey) -> bool {
        self.rejections.contains(&(player.clone(), slot))
    }

    pub fn is_forced_unavailable(&self, player: &PlayerId) -> bool {
        self.unavailable.contains(player)
    }
}

/// Explanation category for a single (player, fixture) rationale entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RationaleCategory {
    SelectedPeak,
    SelectedSharpnessBuild,
    SelectedDespiteFatigue,
    SelectedHighImportance,
    BenchedFatigueRisk,
    BenchedConditionLow,
    BenchedShadowPreserved,
    BenchedRoleFitLow,
    BenchedRotation,
    Locked,
    Rejected,
    Unavailable,
}

/// One structured rationale entry for a single player within a fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Rationale {
    pub player_id: PlayerId,
    pub category: RationaleCategory,
    pub reason: String,
}

/// The XI, ordered bench, and allocated minutes for one fixture. Keyed
/// by the formation slot's `display_key`, not its rating
/// column — a formation routinely has several slots sharing a rating
/// column (two centre-backs both `D(C)`), so the rating column alone
/// cannot disambiguate which instance a player fills. `BTreeMap` so
/// iteration order, and hence any derived output order, is deterministic
/// without an explicit sort.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Assignment {
    pub xi: BTreeMap<String, PlayerId>,
    pub bench: Vec<PlayerId>,
    pub minutes: BTreeMap<PlayerId, u32>,
}

impl Assignment {
    pub fn is_selected(&self, player: &PlayerId) -> bool {
        self.xi.values().any(|p| p == player) || self.bench.contains(player)
    }
}

/// One fixture's worth of planning output: the assignment, every selected
/// player's projected post-match state, and the rationale list.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FixturePlan {
    pub fixture_id: FixtureId,
    pub assignment: Assignment,
    pub projected_states: BTreeMap<PlayerId, PlayerState>,
    pub rationales: Vec<Rationale>,
}

/// The complete ordered multi-fixture plan returned by `plan_horizon`.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct HorizonPlan {
    pub fixtures: Vec<FixturePlan>,
    /// Non-fatal warnings that do not change the plan.
    #[serde(default)]
    pub diagnostics: Vec<crate::diagnostics::Diagnostic>,
}

impl HorizonPlan {
    pub fn new() -> Self {
        Self { fixtures: Vec::new(), diagnostics: Vec::new() }
    }
}

impl Default for HorizonPlan {
    fn default() -> Self {
        Self::new()
    }
}
