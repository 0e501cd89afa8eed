//! Cost Matrix Builder: assembles per-match rectangular
//! cost matrices over {players} × {slots ∪ REST}, quantised and ready for
//! minimum-weight assignment.

use fxhash::FxHashMap;
use nalgebra::DMatrix;
use pathfinding::matrix::Matrix as SolveMatrix;

use crate::model::{Constraints, Fixture, Formation, Player, PlayerId, PlayerState, Slot, SlotKey};
use crate::params::ParameterStore;
use crate::scoring::{gss, quantize};

/// Named reason a (player, slot) cell was forced to the forbidden cost,
/// surfaced to diagnostics/infeasibility reporting rather than silently
/// folded into the numeric matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForbidReason {
    NoRating,
    ConditionCliff,
    InjuredOrSuspended,
    UserRejected,
    LockedElsewhere,
}

/// Dense float cost matrix plus the bookkeeping needed to interpret and
/// quantise it before handing rows/columns to the solver.
pub struct CostMatrix {
    pub costs: DMatrix<f64>,
    pub players: Vec<PlayerId>,
    /// Column labels: either a formation slot or `None` for a REST pad.
    pub columns: Vec<Option<Slot>>,
    pub big_m: f64,
}

impl CostMatrix {
    pub fn rows(&self) -> usize {
        self.players.len()
    }

    pub fn cols(&self) -> usize {
        self.columns.len()
    }

    /// Quantise every cell to two decimal places.
    pub fn quantize(&mut self) {
        for v in self.costs.iter_mut() {
            *v = quantize(*v);
        }
    }

    /// Convert to the integer matrix `pathfinding::kuhn_munkres_min` expects.
    /// `kuhn_munkres` requires rows <= columns, and here there are always at
    /// least as many candidates as slots, so the matrix is built
    /// *transposed* relative to `self` — rows are slots, columns are
    /// candidate players. Costs are scaled by 100 (quantisation already
    /// applied) and rounded to i64 so the assignment stays exact under
    /// minimisation. The returned assignment is `assignment[slot_idx] =
    /// candidate_idx`.
    pub fn to_solve_matrix(&self) -> SolveMatrix<i64> {
        let rows = (0..self.cols()).map(|c| (0..self.rows()).map(move |r| (self.costs[(r, c)] * 100.0).round() as i64));
        SolveMatrix::from_rows(rows).expect("matrix rows have equal length by construction")
    }
}

/// Condition-cliff discrete overlay applied on top of the continuous
/// sigmoid factor, a defense-in-depth check against sigmoid saturation
/// letting a badly unfit player sneak a usable score.
fn condition_cliff_multiplier(condition: f64) -> Option<f64> {
    if condition >= 0.95 {
        Some(1.00)
    } else if condition >= 0.90 {
        Some(0.95)
    } else if condition >= 0.80 {
        Some(0.80)
    } else if condition >= 0.75 {
        Some(0.50)
    } else {
        None
    }
}

/// Stability cost for keeping/switching `player` relative to their slot at
/// the previous fixture.
fn stability_cost(
    params: &ParameterStore,
    previous_slot: Option<SlotKey>,
    consecutive_starts: u32,
    slot: SlotKey,
) -> f64 {
    let mut cost = match previous_slot {
        Some(prev) if prev == slot => -params.stability.continuity_bonus,
        Some(_) => params.stability.base_switch_cost,
        None => 0.0,
    };
    if previous_slot == Some(slot) && consecutive_starts >= params.stability.anchor_threshold {
        cost *= params.stability.anchor_multiplier;
    }
    cost * params.stability.inertia_weight
}

/// Per-player stability ledger entries the orchestrator carries between
/// fixtures.
#[derive(Debug, Clone, Default)]
pub struct StabilityEntry {
    pub previous_slot: Option<SlotKey>,
    pub consecutive_starts: u32,
}

/// Cost of sending `player` to a REST pad (a `None` column) instead of a
/// formation slot. Cheaper (more attractive) the higher the player's
/// fatigue and the more the shadow price values keeping them fresh for a
/// future fixture; forbidden outright for a locked or unavailable player,
/// since resting them would silently drop the user's lock.
fn rest_cost(
    player: &Player,
    shadow_price: f64,
    constraints: &Constraints,
    jadedness: f64,
    condition: f64,
    weights: crate::params::ScalarizationWeights,
    big_m: f64,
) -> (f64, Option<ForbidReason>) {
    if !player.is_selectable() || constraints.is_forced_unavailable(&player.id) {
        return (big_m, Some(ForbidReason::InjuredOrSuspended));
    }
    if constraints.locks.contains_key(&player.id) {
        return (big_m, Some(ForbidReason::LockedElsewhere));
    }
    let fatigue = (1.0 - condition).max(0.0) + jadedness / 1000.0;
    (-weights.w_rest * shadow_price * fatigue.max(0.05), None)
}

/// Builds the GK (1 × N_gk) and outfield (10 × N_outfield) cost matrices
/// for one fixture, applying hard constraints last so they always win
/// over the scalarised soft cost.
pub fn build_matrices(
    params: &ParameterStore,
    squad: &[Player],
    states: &FxHashMap<PlayerId, PlayerState>,
    formation: &Formation,
    fixture: &Fixture,
    shadow_prices: &FxHashMap<PlayerId, f64>,
    constraints: &Constraints,
    ledger: &FxHashMap<PlayerId, StabilityEntry>,
) -> (CostMatrix, CostMatrix) {
    let big_m = params.big_m.m;
    let weights = params.scenario_weights.for_scenario(fixture.scenario);

    let gk_slot = formation.gk_slot().clone();
    let outfield_slots: Vec<Slot> = formation.outfield_slots().cloned().collect();

    let gk_candidates: Vec<&Player> = squad.iter().filter(|p| p.can_play_gk()).collect();
    let outfield_candidates: Vec<&Player> = squad.iter().filter(|p| !p.is_gk_only()).collect();

    let gk_matrix = build_single_slot_matrix(params, &gk_candidates, states, &gk_slot, fixture, shadow_prices, constraints, ledger, weights, big_m);
    let outfield_matrix = build_multi_slot_matrix(params, &outfield_candidates, states, &outfield_slots, fixture, shadow_prices, constraints, ledger, weights, big_m);

    (gk_matrix, outfield_matrix)
}

#[allow(clippy::too_many_arguments)]
fn cell_cost(
    params: &ParameterStore,
    player: &Player,
    slot: &Slot,
    state: &PlayerState,
    fixture: &Fixture,
    shadow_price: f64,
    constraints: &Constraints,
    ledger_entry: Option<&StabilityEntry>,
    weights: crate::params::ScalarizationWeights,
    big_m: f64,
) -> (f64, Option<ForbidReason>) {
    if constraints.is_rejected(&player.id, slot.rating_column) {
        return (big_m, Some(ForbidReason::UserRejected));
    }
    if !player.is_selectable() || constraints.is_forced_unavailable(&player.id) {
        return (big_m, Some(ForbidReason::InjuredOrSuspended));
    }
    if let Some(&locked_slot) = constraints.locks.get(&player.id) {
        if locked_slot != slot.rating_column {
            return (big_m, Some(ForbidReason::LockedElsewhere));
        }
        return (-big_m, None);
    }

    let Some(utility) = gss(params, player, slot.rating_column, state, fixture) else {
        return (big_m, Some(ForbidReason::NoRating));
    };
    let Some(cliff) = condition_cliff_multiplier(state.condition) else {
        return (big_m, Some(ForbidReason::ConditionCliff));
    };
    let adjusted_utility = utility * cliff;

    let dev_penalty = if weights.w_dev > 0.0 { (player.traits.age as f64 - 24.0).max(0.0) } else { 0.0 };
    let previous_slot = ledger_entry.and_then(|e| e.previous_slot);
    let consecutive = ledger_entry.map(|e| e.consecutive_starts).unwrap_or(0);
    let stability = stability_cost(params, previous_slot, consecutive, slot.rating_column);

    let cost = weights.w_perf * (-adjusted_utility) + weights.w_rest * shadow_price + weights.w_dev * dev_penalty + stability;
    (cost, None)
}

#[allow(clippy::too_many_arguments)]
fn build_single_slot_matrix(
    params: &ParameterStore,
    candidates: &[&Player],
    states: &FxHashMap<PlayerId, PlayerState>,
    slot: &Slot,
    fixture: &Fixture,
    shadow_prices: &FxHashMap<PlayerId, f64>,
    constraints: &Constraints,
    ledger: &FxHashMap<PlayerId, StabilityEntry>,
    weights: crate::params::ScalarizationWeights,
    big_m: f64,
) -> CostMatrix {
    let mut costs = DMatrix::zeros(candidates.len(), 1);
    let mut players = Vec::with_capacity(candidates.len());
    for (row, player) in candidates.iter().enumerate() {
        let state = states.get(&player.id).cloned().unwrap_or_else(PlayerState::fresh);
        let shadow = shadow_prices.get(&player.id).copied().unwrap_or(0.0);
        let ledger_entry = ledger.get(&player.id);
        let (cost, _) = cell_cost(params, player, slot, &state, fixture, shadow, constraints, ledger_entry, weights, big_m);
        costs[(row, 0)] = cost;
        players.push(player.id.clone());
    }
    let mut matrix = CostMatrix { costs, players, columns: vec![Some(slot.clone())], big_m };
    matrix.quantize();
    matrix
}

/// Builds the outfield cost matrix, padded with REST columns (`None`
/// entries in `columns`) so a candidate the solver has no good slot for
/// can be assigned to rest instead of being forced into one or silently
/// excluded. One REST pad is added per candidate beyond the slot count,
/// squaring the matrix up so every outfield candidate lands somewhere.
#[allow(clippy::too_many_arguments)]
fn build_multi_slot_matrix(
    params: &ParameterStore,
    candidates: &[&Player],
    states: &FxHashMap<PlayerId, PlayerState>,
    slots: &[Slot],
    fixture: &Fixture,
    shadow_prices: &FxHashMap<PlayerId, f64>,
    constraints: &Constraints,
    ledger: &FxHashMap<PlayerId, StabilityEntry>,
    weights: crate::params::ScalarizationWeights,
    big_m: f64,
) -> CostMatrix {
    let rest_pads = candidates.len().saturating_sub(slots.len());
    let total_cols = slots.len() + rest_pads;
    let mut costs = DMatrix::zeros(candidates.len(), total_cols);
    let mut players = Vec::with_capacity(candidates.len());
    for (row, player) in candidates.iter().enumerate() {
        let state = states.get(&player.id).cloned().unwrap_or_else(PlayerState::fresh);
        let shadow = shadow_prices.get(&player.id).copied().unwrap_or(0.0);
        let ledger_entry = ledger.get(&player.id);
        for (col, slot) in slots.iter().enumerate() {
            let (cost, _) = cell_cost(params, player, slot, &state, fixture, shadow, constraints, ledger_entry, weights, big_m);
            costs[(row, col)] = cost;
        }
        for pad in 0..rest_pads {
            let (cost, _) = rest_cost(player, shadow, constraints, state.jadedness, state.condition, weights, big_m);
            costs[(row, slots.len() + pad)] = cost;
        }
        players.push(player.id.clone());
    }
    let mut columns: Vec<Option<Slot>> = slots.iter().cloned().map(Some).collect();
    columns.extend(std::iter::repeat(None).take(rest_pads));
    let mut matrix = CostMatrix { costs, players, columns, big_m };
    matrix.quantize();
    matrix
}
