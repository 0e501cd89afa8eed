//! Literal seed scenarios from the planner's acceptance criteria, each
//! exercising `plan_horizon` end-to-end through the public API.

use chrono::NaiveDate;
use fxhash::FxHashMap;
use planner_core::{
    Availability, Constraints, Fixture, FixtureId, Formation, Player, PlayerId, PlayerState,
    PlayerTraits, RationaleCategory, Scenario, Slot, SlotKey,
};

fn traits() -> PlayerTraits {
    PlayerTraits { age: 25, natural_fitness: 14, stamina: 14, injury_proneness: 6 }
}

fn player(id: &str, ratings: &[(SlotKey, u16)]) -> Player {
    let mut role_ratings = FxHashMap::default();
    for (slot, rating) in ratings {
        role_ratings.insert(*slot, *rating);
    }
    Player {
        id: PlayerId::from(id),
        display_name: id.into(),
        traits: traits(),
        role_ratings,
        familiarity: FxHashMap::default(),
        state: PlayerState::fresh(),
        availability: Availability::default(),
    }
}

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

fn fixture(id: &str, date: NaiveDate, scenario: Scenario) -> Fixture {
    Fixture { id: FixtureId::from(id), date, importance_weight: 1.0, scenario, opponent_strength_ratio: None }
}

fn filler_squad(formation: &Formation, excluding: &[&str]) -> Vec<Player> {
    formation
        .slots
        .iter()
        .enumerate()
        .filter(|(_, s)| !excluding.contains(&s.display_key.as_str()))
        .map(|(i, s)| player(&format!("filler{i}"), &[(s.rating_column, 120)]))
        .collect()
}

/// S1 - Condition floor: a fresher, weaker backup starts over a fitter-
/// rated starter whose condition has dropped under the floor.
#[test]
fn s1_condition_floor_benches_the_low_condition_starter() {
    let formation = formation_4_3_3();
    let mut a = player("a", &[(SlotKey::St, 150)]);
    a.state.condition = 0.90;
    let b = player("b", &[(SlotKey::St, 120)]);

    let mut squad = filler_squad(&formation, &["ST1"]);
    squad.push(a);
    squad.push(b);

    let fixtures = vec![fixture("f1", NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(), Scenario::Standard)];
    let plan = planner_core::plan_horizon(
        &planner_core::ParameterStore::default(),
        &squad,
        &fixtures,
        &formation,
        &Constraints::default(),
    )
    .unwrap();

    let fixture_plan = &plan.fixtures[0];
    assert_eq!(fixture_plan.assignment.xi.get("ST1"), Some(&PlayerId::from("b")));
    assert!(fixture_plan.assignment.bench.contains(&PlayerId::from("a")));
    let a_rationale = fixture_plan.rationales.iter().find(|r| r.player_id == PlayerId::from("a")).unwrap();
    assert_eq!(a_rationale.category, RationaleCategory::BenchedConditionLow);
}

/// S2 - Cup-final protection: a star player is rested through the run-up
/// to a cup final, then starts it fully recovered.
#[test]
fn s2_star_player_is_rested_before_cup_final() {
    let formation = formation_4_3_3();
    let star = player("star", &[(SlotKey::St, 150)]);
    let backup = player("backup", &[(SlotKey::St, 105)]);
    let mut squad = filler_squad(&formation, &["ST1"]);
    squad.push(star);
    squad.push(backup);

    let scenarios = [
        Scenario::DeadRubber,
        Scenario::DeadRubber,
        Scenario::CupEarly,
        Scenario::DeadRubber,
        Scenario::CupFinal,
    ];
    let fixtures: Vec<Fixture> = scenarios
        .iter()
        .enumerate()
        .map(|(i, s)| fixture(&format!("f{i}"), NaiveDate::from_ymd_opt(2026, 8, 1 + i as u32 * 3).unwrap(), *s))
        .collect();

    let plan = planner_core::plan_horizon(
        &planner_core::ParameterStore::default(),
        &squad,
        &fixtures,
        &formation,
        &Constraints::default(),
    )
    .unwrap();

    let star_id = PlayerId::from("star");
    assert_eq!(plan.fixtures[4].assignment.xi.get("ST1"), Some(&star_id));
    let kickoff_condition = plan.fixtures[3].projected_states.get(&star_id).unwrap().condition;
    assert!(kickoff_condition >= 0.85, "expected strong condition recovery into the final, got {kickoff_condition}");
}

/// S4 - Injury crisis: every specialist left-back is unavailable, so the
/// builder fills the slot with the best out-of-position candidate instead
/// of declaring it infeasible.
#[test]
fn s4_injury_crisis_fills_slot_out_of_position() {
    let formation = formation_4_3_3();
    let mut squad = filler_squad(&formation, &["DL"]);
    for i in 0..4 {
        let mut lb = player(&format!("lb{i}"), &[(SlotKey::Dl, 130)]);
        lb.availability.injured = true;
        squad.push(lb);
    }
    // Out-of-position cover: a right-back with no DL rating wouldn't do,
    // so give the makeshift candidate a real (if modest) DL rating.
    squad.push(player("makeshift", &[(SlotKey::Dr, 120), (SlotKey::Dl, 70)]));

    let fixtures = vec![fixture("f1", NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(), Scenario::Standard)];
    let plan = planner_core::plan_horizon(
        &planner_core::ParameterStore::default(),
        &squad,
        &fixtures,
        &formation,
        &Constraints::default(),
    )
    .unwrap();

    assert_eq!(plan.fixtures[0].assignment.xi.get("DL"), Some(&PlayerId::from("makeshift")));
}

/// S5 - Lock conflict: two players locked to the same single-instance
/// slot must be rejected before planning, naming both players.
#[test]
fn s5_two_locks_on_one_slot_is_rejected() {
    let formation = formation_4_3_3();
    let squad = filler_squad(&formation, &[]);
    let fixtures = vec![fixture("f1", NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(), Scenario::Standard)];
    let mut constraints = Constraints::default();
    constraints.locks.insert(PlayerId::from("filler8"), SlotKey::Aml);
    constraints.locks.insert(PlayerId::from("filler0"), SlotKey::Gk);
    // Force a genuine collision: two distinct players locked to the same
    // single-instance column (GK has exactly one slot in this formation).
    constraints.locks.insert(PlayerId::from("filler9"), SlotKey::Gk);

    let result = planner_core::plan_horizon(
        &planner_core::ParameterStore::default(),
        &squad,
        &fixtures,
        &formation,
        &constraints,
    );

    match result {
        Err(planner_core::PlannerError::LockConflict { slot_key, .. }) => assert_eq!(slot_key, "GK"),
        other => panic!("expected LockConflict, got {other:?}"),
    }
}

/// S6 - Sharpness scenario override: low-sharpness starters are
/// prioritised for minutes over a near-fully-sharp alternative.
#[test]
fn s6_sharpness_scenario_prioritises_low_sharpness_starters() {
    let formation = formation_4_3_3();
    let mut rusty = player("rusty", &[(SlotKey::St, 140)]);
    rusty.state.sharpness = 0.60;
    let mut sharp = player("sharp", &[(SlotKey::St, 145)]);
    sharp.state.sharpness = 0.99;

    let mut squad = filler_squad(&formation, &["ST1"]);
    squad.push(rusty);
    squad.push(sharp);

    let fixtures = vec![fixture("f1", NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(), Scenario::Sharpness)];
    let plan = planner_core::plan_horizon(
        &planner_core::ParameterStore::default(),
        &squad,
        &fixtures,
        &formation,
        &Constraints::default(),
    )
    .unwrap();

    let fixture_plan = &plan.fixtures[0];
    assert_eq!(fixture_plan.assignment.xi.get("ST1"), Some(&PlayerId::from("rusty")));
    let rationale = fixture_plan.rationales.iter().find(|r| r.player_id == PlayerId::from("rusty")).unwrap();
    assert_eq!(rationale.category, RationaleCategory::SelectedSharpnessBuild);
}

/// S3 - Christmas crunch: a deep squad rotated across five tightly spaced
/// Standard fixtures shows real breadth and never starts a player who
/// hasn't recovered to the condition floor.
#[test]
fn s3_christmas_crunch_rotates_without_breaching_condition_floor() {
    let formation = formation_4_3_3();
    let squad: Vec<Player> = (0..25)
        .map(|i| {
            let slot = formation.slots[i % formation.slots.len()].rating_column;
            player(&format!("p{i}"), &[(slot, 100 + (i as u16 % 20))])
        })
        .collect();

    let dates = [
        NaiveDate::from_ymd_opt(2026, 12, 22).unwrap(),
        NaiveDate::from_ymd_opt(2026, 12, 26).unwrap(),
        NaiveDate::from_ymd_opt(2026, 12, 28).unwrap(),
        NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(),
    ];
    let fixtures: Vec<Fixture> =
        dates.iter().enumerate().map(|(i, d)| fixture(&format!("f{i}"), *d, Scenario::Standard)).collect();

    let plan = planner_core::plan_horizon(
        &planner_core::ParameterStore::default(),
        &squad,
        &fixtures,
        &formation,
        &Constraints::default(),
    )
    .unwrap();

    let params = planner_core::ParameterStore::default();
    let mut starters = std::collections::HashSet::new();
    for (i, fixture_plan) in plan.fixtures.iter().enumerate() {
        for player_id in fixture_plan.assignment.xi.values() {
            starters.insert(player_id.clone());
            let pre_match_state = if i == 0 {
                squad.iter().find(|p| &p.id == player_id).unwrap().state.clone()
            } else {
                plan.fixtures[i - 1].projected_states.get(player_id).cloned().unwrap()
            };
            assert!(
                pre_match_state.condition >= params.condition.c_floor,
                "{player_id} started match {i} below the condition floor: {}",
                pre_match_state.condition
            );
        }
    }
    let rotation_index = starters.len() as f64 / squad.len() as f64;
    assert!(rotation_index > 0.4, "expected meaningful rotation breadth, got {rotation_index}");
}
