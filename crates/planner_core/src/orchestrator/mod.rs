//! Horizon Orchestrator: sequences the per-fixture
//! pipeline — PrepareStates, ComputeShadow, BuildMatrix, Solve,
//! AllocateMinutes, Propagate, Explain, RecordHistory — and is the one
//! public entry point, `plan_horizon`.

use std::collections::{BTreeMap, HashMap};

use fxhash::FxHashMap;

use crate::diagnostics::DiagnosticsSink;
use crate::error::{PlannerError, PlannerResult};
use crate::explain::explain;
use crate::logging::fixture_span;
use crate::matrix::{build_matrices, StabilityEntry};
use crate::model::{Constraints, Fixture, Formation, HorizonPlan, Player, PlayerId, PlayerState, Assignment, FixturePlan};
use crate::params::ParameterStore;
use crate::propagate::{propagate, propagate_unused, MatchAction};
use crate::shadow::compute_shadow_prices;
use crate::solve::{apply_sharpness_override, solve_bench, solve_xi};

const STARTER_BASE_MINUTES: u32 = 90;
const SUBSTITUTION_TIMES: [u32; 3] = [60, 70, 80];
const ROTATION_MINUTES_CAP: u32 = 75;
const SHARPNESS_BUILD_MIN_MINUTES: u32 = 45;
const SHARPNESS_BUILD_THRESHOLD: f64 = 0.75;

/// Validate the input surface before any planning work starts: unique
/// player ids, calendar-ordered unique fixture dates, and a squad large
/// enough to fill a formation plus a goalkeeper.
fn validate_inputs(
    squad: &[Player],
    fixtures: &[Fixture],
    formation: &Formation,
    constraints: &Constraints,
) -> PlannerResult<()> {
    let mut seen_players = std::collections::HashSet::new();
    for player in squad {
        if !seen_players.insert(&player.id) {
            return Err(PlannerError::invalid_input(format!("duplicate player id {}", player.id)));
        }
    }

    check_lock_conflicts(squad, formation, constraints)?;

    let non_gk_only = squad.iter().filter(|p| !p.is_gk_only()).count();
    if non_gk_only < Formation::SIZE {
        return Err(PlannerError::invalid_input(format!(
            "squad has {non_gk_only} non-GK-only players, need at least {}",
            Formation::SIZE
        )));
    }
    if !squad.iter().any(|p| p.can_play_gk()) {
        return Err(PlannerError::invalid_input("squad has no player with a valid GK rating"));
    }

    formation.validate().map_err(PlannerError::invalid_input)?;

    let mut prev_date = None;
    for fixture in fixtures {
        fixture.validate().map_err(PlannerError::invalid_input)?;
        if let Some(prev) = prev_date {
            if fixture.date <= prev {
                return Err(PlannerError::invalid_input("fixtures are not strictly calendar-ordered"));
            }
        }
        prev_date = Some(fixture.date);
    }

    Ok(())
}

/// A lock is only satisfiable while the formation has at least as many
/// slot instances of that rating column as players locked to it: locking
/// two players to `AMC` when the formation carries a single `AMC` slot
/// can never be honored, and must be rejected
/// before planning rather than silently resolved by the solver. A lock
/// on a player who is injured, suspended, or otherwise forced unavailable
/// is equally unsatisfiable and must fail here too, rather than falling
/// through to the matrix builder, which would just forbid that one cell
/// and silently drop the user's lock.
fn check_lock_conflicts(squad: &[Player], formation: &Formation, constraints: &Constraints) -> PlannerResult<()> {
    use crate::model::SlotKey;

    for (player_id, slot_key) in &constraints.locks {
        let unavailable = constraints.is_forced_unavailable(player_id)
            || squad.iter().find(|p| &p.id == player_id).map(|p| !p.is_selectable()).unwrap_or(false);
        if unavailable {
            return Err(PlannerError::LockedPlayerUnavailable {
                slot_key: slot_key.column_label().to_string(),
                player: player_id.clone(),
            });
        }
    }

    let mut by_column: HashMap<SlotKey, Vec<&PlayerId>> = HashMap::new();
    for (player_id, slot_key) in &constraints.locks {
        by_column.entry(*slot_key).or_default().push(player_id);
    }
    for (slot_key, mut players) in by_column {
        let capacity = formation.slots.iter().filter(|s| s.rating_column == slot_key).count();
        if players.len() > capacity {
            players.sort();
            return Err(PlannerError::LockConflict {
                slot_key: slot_key.column_label().to_string(),
                player_a: players[0].clone(),
                player_b: players[1].clone(),
            });
        }
    }
    Ok(())
}

/// The full external entry point. Pure given identical
/// inputs: no aliasing with caller data, no persistence.
pub fn plan_horizon(
    params: &ParameterStore,
    squad: &[Player],
    fixtures: &[Fixture],
    formation: &Formation,
    constraints: &Constraints,
) -> PlannerResult<HorizonPlan> {
    validate_inputs(squad, fixtures, formation, constraints)?;

    let mut states: FxHashMap<PlayerId, PlayerState> =
        squad.iter().map(|p| (p.id.clone(), p.state.clone())).collect();
    let mut ledger: FxHashMap<PlayerId, StabilityEntry> = FxHashMap::default();
    let mut diagnostics = DiagnosticsSink::new();
    let mut plan = HorizonPlan::new();
    let slot_lookup: FxHashMap<String, crate::model::SlotKey> =
        formation.slots.iter().map(|s| (s.display_key.clone(), s.rating_column)).collect();

    let mut prev_date = fixtures.first().map(|f| f.date);

    for (t, fixture) in fixtures.iter().enumerate() {
        let _span = fixture_span(t, &fixture.id).entered();
        let as_of = prev_date.unwrap_or(fixture.date);

        // PrepareStates: project every player's state from post-match(t-1)
        // to pre-match(t) using the inter-match gap (zero minutes — the
        // actual match-day propagation happens after Solve/AllocateMinutes).
        let gap_days = (fixture.date - as_of).num_days().max(0);
        if gap_days > 0 {
            for player in squad {
                if let Some(state) = states.get(&player.id).cloned() {
                    let rested = propagate_unused(params, player, &state, gap_days, fixture.date);
                    states.insert(player.id.clone(), rested);
                }
            }
        }

        // ComputeShadow
        let shadow_prices = compute_shadow_prices(params, squad, fixtures, t, fixture.date, &states);

        // BuildMatrix
        let (gk_matrix, mut outfield_matrix) =
            build_matrices(params, squad, &states, formation, fixture, &shadow_prices, constraints, &ledger);
        apply_sharpness_override(fixture.scenario, &mut outfield_matrix, &states);

        // Solve
        let solved = solve_xi(params, &gk_matrix, &outfield_matrix, t)?;

        let residual: Vec<&Player> =
            squad.iter().filter(|p| solved.residual.contains(&p.id)).collect();
        let bench = solve_bench(params, &residual, &states, formation, fixture, params.bench.size);

        // AllocateMinutes
        let minutes = allocate_minutes(params, &solved.xi, &bench, &states, fixture);

        let mut assignment = Assignment { xi: solved.xi.clone(), bench: bench.clone(), minutes: minutes.clone() };

        // Propagate: selected players advance with allocated minutes,
        // everyone else advances with zero minutes (already handled above
        // for the inter-match gap; here we apply the match day itself).
        let mut projected_states = BTreeMap::new();
        for player in squad {
            let prior = states.get(&player.id).cloned().unwrap_or_else(PlayerState::fresh);
            let display_key = solved.xi.iter().find(|(_, pid)| *pid == &player.id).map(|(k, _)| k.clone());
            let slot_key = display_key.as_ref().and_then(|k| slot_lookup.get(k)).copied();
            let played_minutes = minutes.get(&player.id).copied().unwrap_or(0);
            let action = MatchAction {
                minutes: played_minutes,
                drag_family: slot_key.map(|s| s.drag_family()),
                scenario: fixture.scenario,
                rest_days: 0,
                match_date: fixture.date,
            };
            let next = propagate(params, player, &prior, &action);
            if next.jadedness > 700.0 {
                diagnostics.warn_jadedness_approaching_ceiling(player.id.clone(), fixture.id.clone(), next.jadedness);
            }
            states.insert(player.id.clone(), next.clone());
            projected_states.insert(player.id.clone(), next);
        }

        // Explain
        let rationales = explain(params, squad, &states, fixture, formation, &assignment, constraints, &shadow_prices);
        assignment.minutes = minutes;

        // RecordHistory
        for (display_key, player_id) in &solved.xi {
            let Some(&slot_key) = slot_lookup.get(display_key) else { continue };
            let entry = ledger.entry(player_id.clone()).or_default();
            if entry.previous_slot == Some(slot_key) {
                entry.consecutive_starts += 1;
            } else {
                entry.previous_slot = Some(slot_key);
                entry.consecutive_starts = 1;
            }
        }
        for player_id in ledger.keys().cloned().collect::<Vec<_>>() {
            if !solved.xi.values().any(|p| p == &player_id) {
                if let Some(entry) = ledger.get_mut(&player_id) {
                    entry.consecutive_starts = 0;
                }
            }
        }

        plan.fixtures.push(FixturePlan {
            fixture_id: fixture.id.clone(),
            assignment,
            projected_states,
            rationales,
        });

        prev_date = Some(fixture.date);
    }

    plan.diagnostics = diagnostics.into_entries();
    Ok(plan)
}

/// Deterministic two-stage minute allocation: starters get
/// a condition/fatigue-attenuated base of 90, capped at 75 in rotation
/// (`DeadRubber`/`CupEarly`) scenarios; three notional substitutions draw
/// from the bench in order at 60', 70', 80'; Sharpness scenario guarantees
/// at least 45' for low-sharpness starters.
fn allocate_minutes(
    params: &ParameterStore,
    xi: &BTreeMap<String, PlayerId>,
    bench: &[PlayerId],
    states: &FxHashMap<PlayerId, PlayerState>,
    fixture: &Fixture,
) -> BTreeMap<PlayerId, u32> {
    use crate::model::Scenario;

    let is_rotation = matches!(fixture.scenario, Scenario::DeadRubber | Scenario::CupEarly);
    let mut minutes: BTreeMap<PlayerId, u32> = BTreeMap::new();

    // `xi` is a `BTreeMap` keyed by display_key, so this is already
    // display_key order — the substitution loop below picks outgoing
    // players by position, so that order needs to be stable across
    // otherwise-identical runs.
    let starters: Vec<(&String, &PlayerId)> = xi.iter().collect();

    for (_, player_id) in &starters {
        let state = states.get(*player_id).cloned().unwrap_or_else(PlayerState::fresh);
        let mut base = STARTER_BASE_MINUTES as f64;
        if state.condition < params.condition.c_floor {
            base *= 0.8;
        }
        if state.jadedness > 400.0 {
            base *= 0.85;
        }
        let mut allocated = base.round() as u32;
        if is_rotation {
            allocated = allocated.min(ROTATION_MINUTES_CAP);
        }
        if fixture.scenario.is_sharpness_override() && state.sharpness < SHARPNESS_BUILD_THRESHOLD {
            allocated = allocated.max(SHARPNESS_BUILD_MIN_MINUTES);
        }
        minutes.insert((*player_id).clone(), allocated);
    }

    for (i, sub_time) in SUBSTITUTION_TIMES.iter().enumerate() {
        let Some(incoming) = bench.get(i) else { continue };
        let played = STARTER_BASE_MINUTES - sub_time;
        minutes.insert(incoming.clone(), played);
        if let Some((_, outgoing_slot_player)) = starters.get(i) {
            if let Some(existing) = minutes.get_mut(*outgoing_slot_player) {
                *existing = (*existing).min(*sub_time);
            }
        }
    }

    minutes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Availability, Fixture, FixtureId, PlayerTraits, Scenario, Slot, SlotKey};

    fn formation_4_3_3() -> Formation {
        Formation::new(vec![
            Slot::new("GK", SlotKey::Gk),
            Slot::new("DL", SlotKey::Dl),
            Slot::new("DC1", SlotKey::Dc),
            Slot::new("DC2", SlotKey::Dc),
            Slot::new("DR", SlotKey::Dr),
            Slot::new("DM1", SlotKey::Dm),
            Slot::new("MC1", SlotKey::Mc),
            Slot::new("MC2", SlotKey::Mc),
            Slot::new("AML", SlotKey::Aml),
            Slot::new("AMR", SlotKey::Amr),
            Slot::new("ST1", SlotKey::St),
        ])
        .unwrap()
    }

    fn squad_player(id: &str, slot: SlotKey, rating: u16) -> Player {
        let mut ratings = fxhash::FxHashMap::default();
        ratings.insert(slot, rating);
        Player {
            id: PlayerId::from(id),
            display_name: id.into(),
            traits: PlayerTraits { age: 25, natural_fitness: 14, stamina: 14, injury_proneness: 6 },
            role_ratings: ratings,
            familiarity: fxhash::FxHashMap::default(),
            state: PlayerState::fresh(),
            availability: Availability::default(),
        }
    }

    fn minimal_squad() -> Vec<Player> {
        vec![
            squad_player("gk", SlotKey::Gk, 140),
            squad_player("gk2", SlotKey::Gk, 110),
            squad_player("dl", SlotKey::Dl, 130),
            squad_player("dc1", SlotKey::Dc, 130),
            squad_player("dc2", SlotKey::Dc, 128),
            squad_player("dr", SlotKey::Dr, 130),
            squad_player("dm1", SlotKey::Dm, 125),
            squad_player("mc1", SlotKey::Mc, 130),
            squad_player("mc2", SlotKey::Mc, 128),
            squad_player("aml", SlotKey::Aml, 132),
            squad_player("amr", SlotKey::Amr, 132),
            squad_player("st1", SlotKey::St, 140),
            // bench depth
            squad_player("bench1", SlotKey::Mc, 100),
            squad_player("bench2", SlotKey::Dc, 100),
        ]
    }

    fn single_fixture(scenario: Scenario) -> Vec<Fixture> {
        vec![Fixture {
            id: FixtureId::from("f1"),
            date: chrono::NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            importance_weight: 1.0,
            scenario,
            opponent_strength_ratio: None,
        }]
    }

    #[test]
    fn plans_a_complete_xi_for_a_standard_fixture() {
        let params = ParameterStore::default();
        let squad = minimal_squad();
        let fixtures = single_fixture(Scenario::Standard);
        let formation = formation_4_3_3();
        let constraints = Constraints::default();

        let plan = plan_horizon(&params, &squad, &fixtures, &formation, &constraints).unwrap();
        assert_eq!(plan.fixtures.len(), 1);
        let fixture_plan = &plan.fixtures[0];
        assert_eq!(fixture_plan.assignment.xi.len(), Formation::SIZE);
        assert!(fixture_plan.assignment.xi.contains_key("GK"));
    }

    #[test]
    fn injured_squad_member_never_appears_in_xi_or_bench() {
        let params = ParameterStore::default();
        let mut squad = minimal_squad();
        squad[2].availability.injured = true;
        let injured_id = squad[2].id.clone();
        let fixtures = single_fixture(Scenario::Standard);
        let formation = formation_4_3_3();
        let constraints = Constraints::default();

        let plan = plan_horizon(&params, &squad, &fixtures, &formation, &constraints).unwrap();
        let fixture_plan = &plan.fixtures[0];
        assert!(!fixture_plan.assignment.xi.values().any(|p| p == &injured_id));
        assert!(!fixture_plan.assignment.bench.contains(&injured_id));
    }

    #[test]
    fn duplicate_player_ids_are_rejected_before_planning() {
        let params = ParameterStore::default();
        let mut squad = minimal_squad();
        let dup = squad[0].clone();
        squad.push(dup);
        let fixtures = single_fixture(Scenario::Standard);
        let formation = formation_4_3_3();
        let constraints = Constraints::default();

        let result = plan_horizon(&params, &squad, &fixtures, &formation, &constraints);
        assert!(matches!(result, Err(PlannerError::InvalidInput { .. })));
    }

    #[test]
    fn locked_player_is_honored_in_xi() {
        let params = ParameterStore::default();
        let squad = minimal_squad();
        let fixtures = single_fixture(Scenario::Standard);
        let formation = formation_4_3_3();
        let mut constraints = Constraints::default();
        constraints.locks.insert(PlayerId::from("bench1"), SlotKey::Mc);

        let plan = plan_horizon(&params, &squad, &fixtures, &formation, &constraints).unwrap();
        let fixture_plan = &plan.fixtures[0];
        // Lock is on the rating column, and this formation has two MC
        // slots, so either instance honoring the lock satisfies it.
        let bench1 = PlayerId::from("bench1");
        assert!(fixture_plan.assignment.xi.get("MC1") == Some(&bench1) || fixture_plan.assignment.xi.get("MC2") == Some(&bench1));
    }

    #[test]
    fn lock_on_an_injured_player_is_rejected_before_planning() {
        let params = ParameterStore::default();
        let mut squad = minimal_squad();
        squad[2].availability.injured = true;
        let injured_id = squad[2].id.clone();
        let fixtures = single_fixture(Scenario::Standard);
        let formation = formation_4_3_3();
        let mut constraints = Constraints::default();
        constraints.locks.insert(injured_id, SlotKey::Dl);

        let result = plan_horizon(&params, &squad, &fixtures, &formation, &constraints);
        assert!(matches!(result, Err(PlannerError::LockedPlayerUnavailable { .. })));
    }

    #[test]
    fn two_locks_on_a_single_instance_slot_is_a_lock_conflict() {
        let params = ParameterStore::default();
        let squad = minimal_squad();
        let fixtures = single_fixture(Scenario::Standard);
        let formation = formation_4_3_3();
        let mut constraints = Constraints::default();
        // formation_4_3_3 has exactly one DL slot; locking two different
        // players to it can never be satisfied.
        constraints.locks.insert(PlayerId::from("dl"), SlotKey::Dl);
        constraints.locks.insert(PlayerId::from("bench1"), SlotKey::Dl);

        let result = plan_horizon(&params, &squad, &fixtures, &formation, &constraints);
        assert!(matches!(result, Err(PlannerError::LockConflict { .. })));
    }
}
