//! Player identity, static traits, and dynamic state.

use chrono::NaiveDate;
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::ids::PlayerId;
use super::rolling_load::RollingLoadBuffer;
use super::slot::SlotKey;

/// Derived tag, never stored directly — always recomputed from traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Workhorse,
    GlassCannon,
    Veteran,
    Youngster,
    Standard,
}

impl Archetype {
    /// Pure classification from static traits. Order of checks matters:
    /// a 35-year-old with low injury proneness reads as Veteran before
    /// Workhorse, since age is the more salient trait for team-talk text.
    pub fn derive(age: u8, natural_fitness: u8, stamina: u8, injury_proneness: u8) -> Archetype {
        if age <= 20 {
            Archetype::Youngster
        } else if age >= 32 {
            Archetype::Veteran
        } else if injury_proneness >= 14 {
            Archetype::GlassCannon
        } else if natural_fitness >= 15 && stamina >= 15 {
            Archetype::Workhorse
        } else {
            Archetype::Standard
        }
    }
}

/// Static, rarely-changing traits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PlayerTraits {
    pub age: u8,
    pub natural_fitness: u8,
    pub stamina: u8,
    pub injury_proneness: u8,
}

impl PlayerTraits {
    pub fn archetype(&self) -> Archetype {
        Archetype::derive(self.age, self.natural_fitness, self.stamina, self.injury_proneness)
    }
}

/// Mutable per-player state the propagator advances match over match.
/// Never mutated in place by the orchestrator against the caller's
/// copy — callers hand in a snapshot, the core works on its own
/// projected copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PlayerState {
    pub condition: f64,
    pub sharpness: f64,
    pub jadedness: f64,
    pub rolling_load: RollingLoadBuffer,
}

impl PlayerState {
    pub fn fresh() -> Self {
        Self { condition: 1.0, sharpness: 1.0, jadedness: 0.0, rolling_load: RollingLoadBuffer::new() }
    }

    /// True once every dynamic field sits in its declared range. Used
    /// defensively in tests and after propagation.
    pub fn in_declared_ranges(&self) -> bool {
        (0.0..=1.0).contains(&self.condition)
            && (0.0..=1.0).contains(&self.sharpness)
            && (0.0..=1000.0).contains(&self.jadedness)
    }
}

/// Availability flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Availability {
    pub injured: bool,
    pub injury_return_date: Option<NaiveDate>,
    pub suspended: bool,
    pub loaned_in: bool,
}

impl Availability {
    pub fn is_selectable(&self) -> bool {
        !self.injured && !self.suspended
    }
}

/// A full squad member record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    pub traits: PlayerTraits,
    /// Missing entries mean "cannot play this role" — never default to 0.
    pub role_ratings: FxHashMap<SlotKey, u16>,
    /// Missing = 0 familiarity, not "cannot play".
    #[serde(default)]
    pub familiarity: FxHashMap<SlotKey, f64>,
    pub state: PlayerState,
    #[serde(default)]
    pub availability: Availability,
}

impl Player {
    pub fn archetype(&self) -> Archetype {
        self.traits.archetype()
    }

    pub fn rating_for(&self, slot: SlotKey) -> Option<u16> {
        self.role_ratings.get(&slot).copied()
    }

    pub fn familiarity_for(&self, slot: SlotKey) -> f64 {
        self.familiarity.get(&slot).copied().unwrap_or(0.0)
    }

    pub fn can_play_gk(&self) -> bool {
        self.role_ratings.get(&SlotKey::Gk).is_some()
    }

    /// Whether this player's only non-null rating is GK — such a player
    /// must never receive an outfield slot.
    pub fn is_gk_only(&self) -> bool {
        self.can_play_gk() && self.role_ratings.iter().all(|(k, _)| *k == SlotKey::Gk)
    }

    pub fn is_selectable(&self) -> bool {
        self.availability.is_selectable()
    }
}
