//! Explainer: turns a solved assignment into
//! structured per-player rationales, decomposing the GSS into its
//! dominant contributing factor rather than dumping the raw number.

use fxhash::FxHashMap;

use crate::model::{Assignment, Constraints, Fixture, Formation, Player, PlayerId, PlayerState, Rationale, RationaleCategory, Scenario, SlotKey};
use crate::params::ParameterStore;

/// Emit one rationale per player touched by this fixture: every XI slot,
/// every bench player, and every squad member excluded by a hard
/// constraint (locked-elsewhere, rejected, unavailable).
#[allow(clippy::too_many_arguments)]
pub fn explain(
    params: &ParameterStore,
    squad: &[Player],
    states: &FxHashMap<PlayerId, PlayerState>,
    fixture: &Fixture,
    formation: &Formation,
    assignment: &Assignment,
    constraints: &Constraints,
    shadow_prices: &FxHashMap<PlayerId, f64>,
) -> Vec<Rationale> {
    let mut rationales = Vec::new();

    for (display_key, player_id) in &assignment.xi {
        let Some(slot) = formation.slots.iter().find(|s| &s.display_key == display_key) else { continue };
        if let Some(player) = squad.iter().find(|p| &p.id == player_id) {
            let state = states.get(player_id).cloned().unwrap_or_else(PlayerState::fresh);
            rationales.push(starter_rationale(params, player, slot.rating_column, &state, fixture, constraints, shadow_prices));
        }
    }

    for player_id in &assignment.bench {
        if let Some(player) = squad.iter().find(|p| &p.id == player_id) {
            let state = states.get(player_id).cloned().unwrap_or_else(PlayerState::fresh);
            rationales.push(bench_rationale(player, &state, shadow_prices));
        }
    }

    for player in squad {
        if assignment.is_selected(&player.id) {
            continue;
        }
        if constraints.is_forced_unavailable(&player.id) || !player.is_selectable() {
            rationales.push(Rationale {
                player_id: player.id.clone(),
                category: RationaleCategory::Unavailable,
                reason: "injured, suspended, or marked unavailable for this fixture".to_string(),
            });
        } else if constraints.locks.contains_key(&player.id) {
            rationales.push(Rationale {
                player_id: player.id.clone(),
                category: RationaleCategory::BenchedRoleFitLow,
                reason: "locked to a slot not selected this fixture".to_string(),
            });
        } else if constraints.rejections.iter().any(|(pid, _)| pid == &player.id) {
            rationales.push(Rationale {
                player_id: player.id.clone(),
                category: RationaleCategory::Rejected,
                reason: "rejected by user override for a slot they were otherwise eligible for".to_string(),
            });
        }
    }

    rationales.sort_by(|a, b| a.player_id.cmp(&b.player_id));
    rationales
}

fn starter_rationale(
    params: &ParameterStore,
    player: &Player,
    slot: SlotKey,
    state: &PlayerState,
    fixture: &Fixture,
    constraints: &Constraints,
    shadow_prices: &FxHashMap<PlayerId, f64>,
) -> Rationale {
    if constraints.is_locked(&player.id, slot) {
        return Rationale {
            player_id: player.id.clone(),
            category: RationaleCategory::Locked,
            reason: format!("user-locked to {}", slot.column_label()),
        };
    }

    if fixture.scenario.is_sharpness_override() && state.sharpness < params.sharpness.diminishing_returns_threshold {
        return Rationale {
            player_id: player.id.clone(),
            category: RationaleCategory::SelectedSharpnessBuild,
            reason: format!("sharpness {:.2} below build threshold; prioritised for minutes", state.sharpness),
        };
    }

    let importance = params.importance.for_scenario(fixture.scenario);
    if importance >= params.importance.title_rival {
        return Rationale {
            player_id: player.id.clone(),
            category: RationaleCategory::SelectedHighImportance,
            reason: format!("fixture importance weight {importance:.1} favours strongest available XI"),
        };
    }

    let shadow = shadow_prices.get(&player.id).copied().unwrap_or(0.0);
    if state.condition < 0.95 && shadow > 0.0 {
        return Rationale {
            player_id: player.id.clone(),
            category: RationaleCategory::SelectedDespiteFatigue,
            reason: format!("condition {:.2}, shadow price {:.2}; selected on peak utility anyway", state.condition, shadow),
        };
    }

    Rationale {
        player_id: player.id.clone(),
        category: RationaleCategory::SelectedPeak,
        reason: format!("highest utility candidate for {}", slot.column_label()),
    }
}

fn bench_rationale(player: &Player, state: &PlayerState, shadow_prices: &FxHashMap<PlayerId, f64>) -> Rationale {
    let shadow = shadow_prices.get(&player.id).copied().unwrap_or(0.0);
    if state.condition < 0.80 {
        return Rationale {
            player_id: player.id.clone(),
            category: RationaleCategory::BenchedConditionLow,
            reason: format!("condition {:.2} below safe starting threshold", state.condition),
        };
    }
    if shadow > 0.0 {
        return Rationale {
            player_id: player.id.clone(),
            category: RationaleCategory::BenchedShadowPreserved,
            reason: format!("shadow price {shadow:.2}; preserved for a higher-importance future fixture"),
        };
    }
    if state.jadedness > 400.0 {
        return Rationale {
            player_id: player.id.clone(),
            category: RationaleCategory::BenchedFatigueRisk,
            reason: format!("jadedness {:.0} elevated; rotation recommended", state.jadedness),
        };
    }
    Rationale {
        player_id: player.id.clone(),
        category: RationaleCategory::BenchedRotation,
        reason: "squad rotation".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Availability, FixtureId, PlayerTraits, Slot};

    fn player(id: &str) -> Player {
        Player {
            id: PlayerId::from(id),
            display_name: id.into(),
            traits: PlayerTraits { age: 25, natural_fitness: 14, stamina: 14, injury_proneness: 6 },
            role_ratings: fxhash::FxHashMap::default(),
            familiarity: fxhash::FxHashMap::default(),
            state: PlayerState::fresh(),
            availability: Availability::default(),
        }
    }

    #[test]
    fn unavailable_player_gets_unavailable_category() {
        let params = ParameterStore::default();
        let mut p = player("a");
        p.availability.injured = true;
        let squad = vec![p];
        let states = FxHashMap::default();
        let fixture = Fixture {
            id: FixtureId::from("f1"),
            date: chrono::NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            importance_weight: 1.0,
            scenario: Scenario::Standard,
            opponent_strength_ratio: None,
        };
        let assignment = Assignment::default();
        let constraints = Constraints::default();
        let shadow = FxHashMap::default();
        let formation = Formation::new(vec![
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
        .unwrap();
        let result = explain(&params, &squad, &states, &fixture, &formation, &assignment, &constraints, &shadow);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].category, RationaleCategory::Unavailable);
    }

    #[test]
    fn rejected_player_gets_rejected_category() {
        let params = ParameterStore::default();
        let p = player("a");
        let squad = vec![p.clone()];
        let states = FxHashMap::default();
        let fixture = Fixture {
            id: FixtureId::from("f1"),
            date: chrono::NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            importance_weight: 1.0,
            scenario: Scenario::Standard,
            opponent_strength_ratio: None,
        };
        let assignment = Assignment::default();
        let mut constraints = Constraints::default();
        constraints.rejections.insert((p.id.clone(), SlotKey::St));
        let shadow = FxHashMap::default();
        let formation = Formation::new(vec![
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
        .unwrap();
        let result = explain(&params, &squad, &states, &fixture, &formation, &assignment, &constraints, &shadow);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].category, RationaleCategory::Rejected);
    }
}
