//! Scoring Kernel: pure, total functions combining a
//! player, a slot, and a transient state into the Global Selection Score.

use crate::model::{Fixture, Player, PlayerState, Scenario, SlotKey};
use crate::params::ParameterStore;

/// Role rating for `slot`, or `None` when the player has no entry for that
/// rating column — a hard "cannot play this role", not a zero score.
pub fn base_score(player: &Player, slot: SlotKey) -> Option<f64> {
    player.rating_for(slot).map(|r| r as f64)
}

pub fn condition_factor(params: &ParameterStore, condition: f64) -> f64 {
    params.condition.sigmoid(condition.clamp(0.0, 1.0))
}

pub fn sharpness_factor(params: &ParameterStore, sharpness: f64) -> f64 {
    params.sharpness.factor(sharpness.clamp(0.0, 1.0))
}

pub fn familiarity_factor(params: &ParameterStore, familiarity: f64) -> f64 {
    params.familiarity.factor(familiarity.clamp(0.0, 1.0))
}

pub fn jadedness_factor(params: &ParameterStore, jadedness: f64) -> f64 {
    params.jadedness.factor(jadedness.clamp(0.0, 1000.0))
}

/// Quantise to two decimal places so ties resolve deterministically
/// before entering the cost matrix.
pub fn quantize(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Whether the hard condition-floor availability gate is breached, given
/// the scenario's softening rule.
fn condition_floor_breached(params: &ParameterStore, state: &PlayerState, scenario: Scenario) -> bool {
    scenario.hard_condition_floor() && state.condition < params.condition.c_floor
}

/// Global Selection Score: the product of the five component factors, or
/// `None` when the player cannot legally start at `slot` at all. The
/// `CupFinal` condition-floor softening is folded into the condition
/// factor itself, as a soft 0.8x multiplier, rather than the gate.
pub fn gss(
    params: &ParameterStore,
    player: &Player,
    slot: SlotKey,
    state: &PlayerState,
    fixture: &Fixture,
) -> Option<f64> {
    if !player.is_selectable() {
        return None;
    }
    let base = base_score(player, slot)?;

    if condition_floor_breached(params, state, fixture.scenario) {
        return None;
    }

    let mut cond = condition_factor(params, state.condition);
    if matches!(fixture.scenario, Scenario::CupFinal) && state.condition < params.condition.c_floor {
        cond *= params.condition.cup_final_floor_multiplier;
    }

    let sharp = sharpness_factor(params, state.sharpness);
    let familiarity = familiarity_factor(params, player.familiarity_for(slot));
    let jaded = jadedness_factor(params, state.jadedness);

    Some(quantize(base * cond * sharp * familiarity * jaded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Availability, Fixture, FixtureId, PlayerId, PlayerTraits};
    use fxhash::FxHashMap;

    fn sample_player(rating: u16) -> Player {
        let mut ratings = FxHashMap::default();
        ratings.insert(SlotKey::St, rating);
        Player {
            id: PlayerId::from("p1"),
            display_name: "Forward".into(),
            traits: PlayerTraits { age: 24, natural_fitness: 14, stamina: 14, injury_proneness: 6 },
            role_ratings: ratings,
            familiarity: FxHashMap::default(),
            state: PlayerState::fresh(),
            availability: Availability::default(),
        }
    }

    fn standard_fixture() -> Fixture {
        Fixture {
            id: FixtureId::from("f1"),
            date: chrono::NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            importance_weight: 1.5,
            scenario: Scenario::Standard,
            opponent_strength_ratio: None,
        }
    }

    #[test]
    fn missing_rating_returns_none() {
        let params = ParameterStore::default();
        let player = sample_player(150);
        let state = PlayerState::fresh();
        assert!(gss(&params, &player, SlotKey::Gk, &state, &standard_fixture()).is_none());
    }

    #[test]
    fn fresh_player_scores_near_base_rating() {
        let params = ParameterStore::default();
        let player = sample_player(150);
        let state = PlayerState::fresh();
        let score = gss(&params, &player, SlotKey::St, &state, &standard_fixture()).unwrap();
        // Fresh state factors are all near 1.0, so the score stays close to base.
        assert!(score > 140.0 && score <= 150.0);
    }

    #[test]
    fn condition_below_floor_is_gated_out_in_standard_scenario() {
        let params = ParameterStore::default();
        let player = sample_player(150);
        let mut state = PlayerState::fresh();
        state.condition = 0.5;
        assert!(gss(&params, &player, SlotKey::St, &state, &standard_fixture()).is_none());
    }

    #[test]
    fn condition_below_floor_softens_in_cup_final() {
        let params = ParameterStore::default();
        let player = sample_player(150);
        let mut state = PlayerState::fresh();
        state.condition = 0.85;
        let mut fixture = standard_fixture();
        fixture.scenario = Scenario::CupFinal;
        assert!(gss(&params, &player, SlotKey::St, &state, &fixture).is_some());
    }

    #[test]
    fn unavailable_player_never_scores() {
        let params = ParameterStore::default();
        let mut player = sample_player(150);
        player.availability.injured = true;
        let state = PlayerState::fresh();
        assert!(gss(&params, &player, SlotKey::St, &state, &standard_fixture()).is_none());
    }

    #[test]
    fn monotonic_in_condition() {
        let params = ParameterStore::default();
        let player = sample_player(150);
        let mut low = PlayerState::fresh();
        low.condition = 0.95;
        let mut high = PlayerState::fresh();
        high.condition = 1.0;
        let fixture = standard_fixture();
        let lo = gss(&params, &player, SlotKey::St, &low, &fixture).unwrap();
        let hi = gss(&params, &player, SlotKey::St, &high, &fixture).unwrap();
        assert!(hi >= lo);
    }
}
