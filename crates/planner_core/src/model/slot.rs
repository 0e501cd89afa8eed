//! Formation slots and the closed rating-column enumeration they
//! reference.

use serde::{Deserialize, Serialize};

/// A rating column a player's role ratings / familiarity map may be keyed
/// on. Closed set — no duck-typed column lookups.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    schemars::JsonSchema,
)]
pub enum SlotKey {
    Gk,
    Dl,
    Dc,
    Dr,
    Wbl,
    Wbr,
    Dml,
    Dmr,
    Dm,
    Ml,
    Mc,
    Mr,
    Aml,
    Amc,
    Amr,
    St,
}

/// The positional-drag family a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragFamily {
    Gk,
    Cb,
    FullbackWingback,
    Dm,
    Cm,
    AmCentral,
    WideAttacker,
    St,
}

impl SlotKey {
    /// FM-style display text, e.g. `D(C)`, `AM(L)`, `DM(L)`.
    pub fn column_label(self) -> &'static str {
        match self {
            SlotKey::Gk => "GK",
            SlotKey::Dl => "D(L)",
            SlotKey::Dc => "D(C)",
            SlotKey::Dr => "D(R)",
            SlotKey::Wbl => "WB(L)",
            SlotKey::Wbr => "WB(R)",
            SlotKey::Dml => "DM(L)",
            SlotKey::Dmr => "DM(R)",
            SlotKey::Dm => "DM(C)",
            SlotKey::Ml => "M(L)",
            SlotKey::Mc => "M(C)",
            SlotKey::Mr => "M(R)",
            SlotKey::Aml => "AM(L)",
            SlotKey::Amc => "AM(C)",
            SlotKey::Amr => "AM(R)",
            SlotKey::St => "ST",
        }
    }

    pub fn drag_family(self) -> DragFamily {
        match self {
            SlotKey::Gk => DragFamily::Gk,
            SlotKey::Dl | SlotKey::Dc | SlotKey::Dr => DragFamily::Cb,
            SlotKey::Wbl | SlotKey::Wbr => DragFamily::FullbackWingback,
            SlotKey::Dml | SlotKey::Dmr | SlotKey::Dm => DragFamily::Dm,
            SlotKey::Ml | SlotKey::Mc | SlotKey::Mr => DragFamily::Cm,
            SlotKey::Amc => DragFamily::AmCentral,
            SlotKey::Aml | SlotKey::Amr => DragFamily::WideAttacker,
            SlotKey::St => DragFamily::St,
        }
    }

    /// Whether this column can ever be the goalkeeper slot.
    pub fn is_gk(self) -> bool {
        matches!(self, SlotKey::Gk)
    }
}

/// A single formation position: a display key unique within the formation
/// (e.g. `"DM2"`) and the rating column it reads from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Slot {
    pub display_key: String,
    pub rating_column: SlotKey,
}

impl Slot {
    pub fn new(display_key: impl Into<String>, rating_column: SlotKey) -> Self {
        Self { display_key: display_key.into(), rating_column }
    }
}

/// An ordered list of exactly eleven slots. Validated on construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Formation {
    pub slots: Vec<Slot>,
}

impl Formation {
    pub const SIZE: usize = 11;

    pub fn new(slots: Vec<Slot>) -> Result<Self, String> {
        if slots.len() != Self::SIZE {
            return Err(format!("formation must have exactly {} slots, got {}", Self::SIZE, slots.len()));
        }
        let gk_count = slots.iter().filter(|s| s.rating_column.is_gk()).count();
        if gk_count != 1 {
            return Err(format!("formation must have exactly 1 GK slot, got {gk_count}"));
        }
        let mut seen = std::collections::HashSet::new();
        for slot in &slots {
            if !seen.insert(&slot.display_key) {
                return Err(format!("duplicate slot display_key {:?}", slot.display_key));
            }
        }
        Ok(Self { slots })
    }

    pub fn gk_slot(&self) -> &Slot {
        self.slots.iter().find(|s| s.rating_column.is_gk()).expect("validated on construction")
    }

    /// Re-check the invariants `new` enforces. Needed because a `Formation`
    /// can also arrive already-built, via `Deserialize`, bypassing `new`.
    pub fn validate(&self) -> Result<(), String> {
        Self::new(self.slots.clone()).map(|_| ())
    }

    pub fn outfield_slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|s| !s.rating_column.is_gk())
    }
}
