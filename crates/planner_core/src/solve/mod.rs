//! Assignment Solver: minimum-weight perfect matching over
//! the GK and outfield cost matrices, plus the coverage-utility bench
//! selection and the sharpness-scenario two-phase override.

use std::collections::BTreeMap;

use fxhash::FxHashMap;
use nalgebra::DMatrix;
use pathfinding::kuhn_munkres::kuhn_munkres_min;

use crate::error::{InfeasibleReason, PlannerError};
use crate::matrix::CostMatrix;
use crate::model::{Formation, Player, PlayerId, PlayerState, Scenario, Slot, SlotKey};
use crate::params::ParameterStore;
use crate::scoring::gss;

/// The solved starting eleven and the residual squad available for bench
/// selection. Keyed by each slot's `display_key`
/// (see `Assignment::xi`'s doc comment for why the rating column alone
/// cannot serve as the key).
pub struct SolvedXi {
    pub xi: BTreeMap<String, PlayerId>,
    pub residual: Vec<PlayerId>,
}

/// Solve one (slots × candidates) cost matrix, returning display_key →
/// candidate id and the total solved cost (scaled by 100, matching
/// `CostMatrix`'s quantisation). REST columns (`None` in `columns`) are
/// skipped when building the result, since a candidate routed there
/// isn't filling a slot.
fn solve_matrix(matrix: &CostMatrix) -> (BTreeMap<String, PlayerId>, i64) {
    let solve = matrix.to_solve_matrix();
    let (total, assignment) = kuhn_munkres_min(&solve);
    let mut result = BTreeMap::new();
    for (slot_idx, &candidate_idx) in assignment.iter().enumerate() {
        let Some(slot) = &matrix.columns[slot_idx] else { continue };
        result.insert(slot.display_key.clone(), matrix.players[candidate_idx].clone());
    }
    (result, total)
}

/// Returns a copy of `matrix` with `exclude`'s row dropped, for removing
/// the already-selected keeper from the outfield candidate pool before
/// it is solved — a hybrid GK/outfield player must never be picked
/// twice. `kuhn_munkres_min` requires `cols <= rows`; since the outfield
/// matrix is built square (one REST pad per surplus candidate), dropping
/// a candidate row without also dropping a column would break that
/// precondition, so this drops one REST (`None`) column alongside the
/// row whenever one is available. If none is — the squad has exactly as
/// many outfield candidates as slots — the row is dropped anyway and the
/// caller is responsible for checking `cols() <= rows()` before solving.
fn without_player(matrix: &CostMatrix, exclude: &PlayerId) -> CostMatrix {
    let keep_rows: Vec<usize> = matrix.players.iter().enumerate().filter(|(_, p)| *p != exclude).map(|(i, _)| i).collect();
    if keep_rows.len() == matrix.players.len() {
        return CostMatrix {
            costs: matrix.costs.clone(),
            players: matrix.players.clone(),
            columns: matrix.columns.clone(),
            big_m: matrix.big_m,
        };
    }
    let keep_cols: Vec<usize> = match matrix.columns.iter().position(|c| c.is_none()) {
        Some(rest_col) => (0..matrix.cols()).filter(|&c| c != rest_col).collect(),
        None => (0..matrix.cols()).collect(),
    };
    let costs = DMatrix::from_fn(keep_rows.len(), keep_cols.len(), |r, c| matrix.costs[(keep_rows[r], keep_cols[c])]);
    let players = keep_rows.iter().map(|&i| matrix.players[i].clone()).collect();
    let columns = keep_cols.iter().map(|&i| matrix.columns[i].clone()).collect();
    CostMatrix { costs, players, columns, big_m: matrix.big_m }
}

/// Stage 1: solve the GK submatrix, then the outfield submatrix excluding
/// the chosen keeper.
pub fn solve_xi(
    params: &ParameterStore,
    gk_matrix: &CostMatrix,
    outfield_matrix: &CostMatrix,
    match_index: usize,
) -> Result<SolvedXi, PlannerError> {
    let (gk_assignment, gk_cost) = solve_matrix(gk_matrix);
    if gk_cost as f64 / 100.0 >= params.big_m.m {
        return Err(PlannerError::InfeasibleSlot {
            match_index,
            slot_key: "GK".to_string(),
            reason: InfeasibleReason::AllInjuredOrSuspended,
        });
    }

    let gk_display_key = gk_matrix.columns.iter().flatten().next().map(|s| s.display_key.clone());
    let keeper = gk_display_key.as_ref().and_then(|key| gk_assignment.get(key)).cloned();

    // A hybrid player with both a GK and an outfield rating can still be a
    // row in `outfield_matrix` (only GK-exclusive players are filtered out
    // when it's built) — drop whoever the GK submatrix actually picked
    // before the outfield submatrix is solved, or they could be selected
    // twice.
    let filtered_outfield;
    let outfield_matrix = match &keeper {
        Some(keeper_id) => {
            filtered_outfield = without_player(outfield_matrix, keeper_id);
            &filtered_outfield
        }
        None => outfield_matrix,
    };

    // A tight squad (exactly as many outfield candidates as slots, no REST
    // pad to drop) leaves `without_player` unable to shed a column: once
    // the keeper's row is gone there are fewer candidates than slots and
    // the position is genuinely infeasible, not a solver bug.
    if outfield_matrix.cols() > outfield_matrix.rows() {
        return Err(PlannerError::InfeasibleSlot {
            match_index,
            slot_key: "outfield".to_string(),
            reason: InfeasibleReason::NoCandidates,
        });
    }

    let (outfield_assignment, outfield_cost) = solve_matrix(outfield_matrix);
    if outfield_cost as f64 / 100.0 >= params.big_m.m {
        let unfilled = outfield_matrix
            .columns
            .iter()
            .flatten()
            .find(|slot| !outfield_assignment.contains_key(&slot.display_key))
            .map(|slot| slot.rating_column.column_label().to_string())
            .unwrap_or_else(|| "unknown".to_string());
        return Err(PlannerError::InfeasibleSlot {
            match_index,
            slot_key: unfilled,
            reason: InfeasibleReason::NoCandidates,
        });
    }

    let mut xi = outfield_assignment;
    if let (Some(gk), Some(key)) = (keeper, gk_display_key) {
        xi.insert(key, gk);
    }

    let mut seen = std::collections::HashSet::with_capacity(xi.len());
    for player_id in xi.values() {
        if !seen.insert(player_id) {
            return Err(PlannerError::numerical_breach(
                match_index,
                format!("player {player_id} assigned to more than one slot in the solved XI"),
            ));
        }
    }
    let expected_slots = gk_matrix.columns.iter().flatten().count() + outfield_matrix.columns.iter().flatten().count();
    if xi.len() != expected_slots {
        return Err(PlannerError::numerical_breach(
            match_index,
            format!("solved XI filled {} of {expected_slots} slots", xi.len()),
        ));
    }

    let selected: std::collections::HashSet<&PlayerId> = xi.values().collect();
    let residual: Vec<PlayerId> = gk_matrix
        .players
        .iter()
        .chain(outfield_matrix.players.iter())
        .filter(|p| !selected.contains(p))
        .cloned()
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect();

    Ok(SolvedXi { xi, residual })
}

/// Coverage utility U_cover(p) = Σ_s U_{p,s}·P_injury(s).
/// `injury_weight` stands in for P_injury(s) — flat across slots absent a
/// per-slot injury-rate model, which is out of scope for this core.
fn coverage_utility(params: &ParameterStore, player: &Player, slots: &[Slot], state: &PlayerState, fixture: &crate::model::Fixture) -> f64 {
    let injury_weight = 1.0 / slots.len().max(1) as f64;
    slots
        .iter()
        .filter_map(|slot| gss(params, player, slot.rating_column, state, fixture))
        .map(|u| u * injury_weight)
        .sum()
}

/// Stage 2: select an ordered bench of size `bench_size` from the
/// residual squad by coverage utility, stable-sorted by player id on ties.
pub fn solve_bench(
    params: &ParameterStore,
    residual: &[&Player],
    states: &FxHashMap<PlayerId, PlayerState>,
    formation: &Formation,
    fixture: &crate::model::Fixture,
    bench_size: usize,
) -> Vec<PlayerId> {
    let slots: Vec<Slot> = formation.slots.clone();
    let mut scored: Vec<(PlayerId, f64)> = residual
        .iter()
        .filter(|p| p.is_selectable())
        .map(|p| {
            let state = states.get(&p.id).cloned().unwrap_or_else(PlayerState::fresh);
            let utility = coverage_utility(params, p, &slots, &state, fixture);
            (p.id.clone(), utility)
        })
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then_with(|| a.0.cmp(&b.0)));
    scored.into_iter().take(bench_size).map(|(id, _)| id).collect()
}

/// Sharpness-scenario two-phase override: within the
/// notional best-XI-plus-backups pool, boost low-sharpness players and
/// penalise near-full-sharpness players before the real solve runs. This
/// mutates the outfield matrix's costs in place for low/high-sharpness
/// candidates; callers solve the adjusted matrix normally afterward.
pub fn apply_sharpness_override(
    scenario: Scenario,
    matrix: &mut CostMatrix,
    states: &FxHashMap<PlayerId, PlayerState>,
) {
    if !scenario.is_sharpness_override() {
        return;
    }
    const LOW_SHARPNESS: f64 = 0.75;
    const HIGH_SHARPNESS: f64 = 0.99;
    const BOOST: f64 = 0.85;
    const PENALTY: f64 = 1.15;

    for (row, player_id) in matrix.players.iter().enumerate() {
        let Some(state) = states.get(player_id) else { continue };
        let multiplier = if state.sharpness < LOW_SHARPNESS {
            BOOST
        } else if state.sharpness >= HIGH_SHARPNESS {
            PENALTY
        } else {
            1.0
        };
        if multiplier != 1.0 {
            for col in 0..matrix.cols() {
                let cell = matrix.costs[(row, col)];
                if cell.abs() < matrix.big_m {
                    matrix.costs[(row, col)] = cell * multiplier;
                }
            }
        }
    }
    matrix.quantize();
}
