//! State Propagator: advances a player's dynamic state
//! given minutes played and the rest gap to the next match. Pure — no
//! side effects on the caller's data, deterministic given identical
//! inputs.

use chrono::NaiveDate;

use crate::model::{DragFamily, Player, PlayerState, Scenario};
use crate::params::ParameterStore;

/// One propagation step's inputs, gathered so `propagate` itself stays a
/// pure function of (state, action, params).
#[derive(Debug, Clone, Copy)]
pub struct MatchAction {
    pub minutes: u32,
    pub drag_family: Option<DragFamily>,
    pub scenario: Scenario,
    /// Rest days until the *next* fixture (0 for back-to-back matches).
    pub rest_days: i64,
    pub match_date: NaiveDate,
}

/// Scenario-driven jadedness-intensity multiplier: ΔJ =
/// minutes · R_pos(slot) · intensity_factor(scenario).
fn intensity_factor(scenario: Scenario) -> f64 {
    match scenario {
        Scenario::CupFinal | Scenario::ContinentalKo | Scenario::TitleRival => 1.2,
        Scenario::Standard | Scenario::CupEarly => 1.0,
        Scenario::DeadRubber => 0.9,
        Scenario::Sharpness => 1.0,
    }
}

/// Advance `state` by one match action, returning the post-match,
/// post-rest-gap state. Never mutates `state` or `player` in place.
pub fn propagate(params: &ParameterStore, player: &Player, state: &PlayerState, action: &MatchAction) -> PlayerState {
    let minutes_fraction = action.minutes as f64 / 90.0;
    let stamina_relief = 1.0 - (player.traits.stamina as f64 / 200.0);

    let delta_match = minutes_fraction * params.condition.drain_rate * stamina_relief;
    let throttle = params.condition.jadedness_throttle(state.jadedness);
    let delta_recovery = action.rest_days as f64
        * params.condition.recovery_rate
        * (player.traits.natural_fitness as f64 / 100.0)
        * (1.0 - throttle);
    let condition = (state.condition - delta_match + delta_recovery).clamp(0.0, 1.0);

    let diminishing = if state.sharpness >= params.sharpness.diminishing_returns_threshold { 0.3 } else { 1.0 };
    let sharpness_gain = minutes_fraction * 0.08 * diminishing;
    let sharpness_decay = params.sharpness.decay_for_gap(action.rest_days);
    let sharpness = (state.sharpness + sharpness_gain - sharpness_decay).clamp(0.0, 1.0);

    let drag = action.drag_family.map(|f| params.drag.coefficient(f)).unwrap_or(0.0);
    let mut rolling_load = state.rolling_load.clone();
    rolling_load.record(
        action.match_date,
        action.minutes,
        action.drag_family,
        params.rolling_window.window_days,
    );
    let window_minutes = rolling_load.minutes_in_window(action.match_date, params.rolling_window.window_days);

    let mut delta_jadedness = action.minutes as f64 * drag * intensity_factor(action.scenario);
    if window_minutes > params.rolling_window.minutes_threshold {
        delta_jadedness *= params.rolling_window.overload_multiplier;
    }
    let passive_recovery = action.rest_days as f64 * params.jadedness.passive_recovery_per_day;
    let jadedness = (state.jadedness + delta_jadedness - passive_recovery).clamp(0.0, 1000.0);

    PlayerState { condition, sharpness, jadedness, rolling_load }
}

/// A player who did not feature: zero minutes, full rest gap.
pub fn propagate_unused(params: &ParameterStore, player: &Player, state: &PlayerState, rest_days: i64, as_of: NaiveDate) -> PlayerState {
    propagate(
        params,
        player,
        state,
        &MatchAction { minutes: 0, drag_family: None, scenario: Scenario::Standard, rest_days, match_date: as_of },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Availability, PlayerId, PlayerTraits};
    use fxhash::FxHashMap;

    fn sample_player() -> Player {
        Player {
            id: PlayerId::from("p1"),
            display_name: "Test".into(),
            traits: PlayerTraits { age: 25, natural_fitness: 14, stamina: 14, injury_proneness: 6 },
            role_ratings: FxHashMap::default(),
            familiarity: FxHashMap::default(),
            state: PlayerState::fresh(),
            availability: Availability::default(),
        }
    }

    #[test]
    fn playing_90_minutes_drains_condition() {
        let params = ParameterStore::default();
        let player = sample_player();
        let state = PlayerState::fresh();
        let action = MatchAction {
            minutes: 90,
            drag_family: Some(DragFamily::St),
            scenario: Scenario::Standard,
            rest_days: 0,
            match_date: chrono::NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
        };
        let next = propagate(&params, &player, &state, &action);
        assert!(next.condition < state.condition);
        assert!(next.in_declared_ranges());
    }

    #[test]
    fn resting_recovers_condition_and_decays_sharpness_past_grace() {
        let params = ParameterStore::default();
        let player = sample_player();
        let mut state = PlayerState::fresh();
        state.condition = 0.7;
        let action = MatchAction {
            minutes: 0,
            drag_family: None,
            scenario: Scenario::Standard,
            rest_days: 10,
            match_date: chrono::NaiveDate::from_ymd_opt(2026, 8, 11).unwrap(),
        };
        let next = propagate(&params, &player, &state, &action);
        assert!(next.condition > state.condition);
        assert!(next.sharpness < state.sharpness);
        assert!(next.in_declared_ranges());
    }

    #[test]
    fn determinism_repeated_propagation_is_identical() {
        let params = ParameterStore::default();
        let player = sample_player();
        let state = PlayerState::fresh();
        let action = MatchAction {
            minutes: 60,
            drag_family: Some(DragFamily::Cm),
            scenario: Scenario::Standard,
            rest_days: 3,
            match_date: chrono::NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
        };
        let a = propagate(&params, &player, &state, &action);
        let b = propagate(&params, &player, &state, &action);
        assert_eq!(a, b);
    }

    #[test]
    fn fourteen_day_window_overload_applies_multiplier() {
        let params = ParameterStore::default();
        let player = sample_player();
        let mut state = PlayerState::fresh();
        // Load up 200 minutes inside the window before this match.
        state.rolling_load.record(
            chrono::NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            200,
            Some(DragFamily::St),
            14,
        );
        let action = MatchAction {
            minutes: 90,
            drag_family: Some(DragFamily::St),
            scenario: Scenario::Standard,
            rest_days: 0,
            match_date: chrono::NaiveDate::from_ymd_opt(2026, 8, 3).unwrap(),
        };
        let next = propagate(&params, &player, &state, &action);
        assert!(next.jadedness > 0.0);
        assert!(next.in_declared_ranges());
    }
}
