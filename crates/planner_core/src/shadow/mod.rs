//! Shadow Pricer: opportunity-cost penalty for using a
//! player now instead of resting them for a more important future match.
//!
//! Trajectory bifurcation per player is embarrassingly parallel —
//! computed with `rayon`, then stable-sorted by player id so parallel
//! scheduling never leaks into the result ordering.

use fxhash::FxHashMap;
use rayon::prelude::*;

use crate::model::{Fixture, Player, PlayerId, PlayerState, SlotKey};
use crate::params::ParameterStore;
use crate::propagate::{propagate, propagate_unused, MatchAction};
use crate::scoring::gss;

/// λ(p, t) for every player, computed against the remaining sub-horizon
/// `fixtures[t+1..]`. `current_states` holds each player's
/// projected state as of immediately before fixture `t`.
pub fn compute_shadow_prices(
    params: &ParameterStore,
    squad: &[Player],
    fixtures: &[Fixture],
    t: usize,
    as_of: chrono::NaiveDate,
    current_states: &FxHashMap<PlayerId, PlayerState>,
) -> FxHashMap<PlayerId, f64> {
    let remaining = &fixtures[t + 1..];
    if remaining.is_empty() {
        return squad.iter().map(|p| (p.id.clone(), 0.0)).collect();
    }

    let mut results: Vec<(PlayerId, f64)> = squad
        .par_iter()
        .map(|player| {
            let state = current_states.get(&player.id).cloned().unwrap_or_else(PlayerState::fresh);
            let lambda = shadow_price_for_player(params, squad, player, &state, fixtures, t, as_of, current_states);
            (player.id.clone(), lambda)
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results.into_iter().collect()
}

fn best_fit_slot(player: &Player) -> Option<SlotKey> {
    player.role_ratings.iter().max_by_key(|(_, rating)| **rating).map(|(slot, _)| *slot)
}

#[allow(clippy::too_many_arguments)]
fn shadow_price_for_player(
    params: &ParameterStore,
    squad: &[Player],
    player: &Player,
    state: &PlayerState,
    fixtures: &[Fixture],
    t: usize,
    as_of: chrono::NaiveDate,
    current_states: &FxHashMap<PlayerId, PlayerState>,
) -> f64 {
    let Some(slot) = best_fit_slot(player) else { return 0.0 };

    let mut play_state = state.clone();
    let mut rest_state = state.clone();
    let mut total = 0.0;

    let anchor_fixture = &fixtures[t];
    let gap_to_t = (anchor_fixture.date - as_of).num_days().max(0);
    let play_action = MatchAction {
        minutes: 90,
        drag_family: Some(slot.drag_family()),
        scenario: anchor_fixture.scenario,
        rest_days: gap_to_t,
        match_date: anchor_fixture.date,
    };
    play_state = propagate(params, player, &play_state, &play_action);
    rest_state = propagate_unused(params, player, &rest_state, gap_to_t, anchor_fixture.date);

    let scarcity = vorp_scarcity(params, squad, player, slot, state, anchor_fixture, current_states);

    let mut prev_date = anchor_fixture.date;
    for (offset, fixture) in fixtures[t + 1..].iter().enumerate() {
        let k = t + 1 + offset;
        let rest_days = (fixture.date - prev_date).num_days().max(0);
        prev_date = fixture.date;

        let play_rest_action = MatchAction {
            minutes: 0,
            drag_family: None,
            scenario: fixture.scenario,
            rest_days,
            match_date: fixture.date,
        };
        play_state = propagate(params, player, &play_state, &play_rest_action);
        rest_state = propagate(params, player, &rest_state, &play_rest_action);

        let gss_play = gss(params, player, slot, &play_state, fixture).unwrap_or(0.0);
        let gss_rest = gss(params, player, slot, &rest_state, fixture).unwrap_or(0.0);
        let delta = (gss_rest - gss_play).max(0.0);

        let discount = params.shadow.discount_gamma.powi((k - t) as i32);
        let importance = params.importance.for_scenario(fixture.scenario);
        total += discount * importance * delta;
    }

    (scarcity * params.shadow.shadow_weight * total).max(0.0)
}

/// α_p = 1 + λ_V · min(scarcity_cap, (GSS* − GSS_backup) / GSS*).
/// Amplifies λ for players with no comparable backup at their slot.
fn vorp_scarcity(
    params: &ParameterStore,
    squad: &[Player],
    player: &Player,
    slot: SlotKey,
    state: &PlayerState,
    fixture: &Fixture,
    current_states: &FxHashMap<PlayerId, PlayerState>,
) -> f64 {
    let star = gss(params, player, slot, state, fixture).unwrap_or(0.0);
    if star <= 0.0 {
        return 1.0;
    }
    let backup = squad
        .iter()
        .filter(|p| p.id != player.id)
        .filter_map(|p| {
            let backup_state = current_states.get(&p.id).cloned().unwrap_or_else(PlayerState::fresh);
            gss(params, p, slot, &backup_state, fixture)
        })
        .fold(0.0_f64, f64::max);

    let ratio = ((star - backup) / star).clamp(0.0, params.shadow.scarcity_cap);
    1.0 + params.shadow.scarcity_lambda_v * ratio
}
