//! The data model: identifiers, slots, players, fixtures, and
//! the assignment/plan types the rest of the crate operates on.

mod assignment;
mod fixture;
mod ids;
mod player;
mod rolling_load;
mod slot;

pub use assignment::{Assignment, Constraints, FixturePlan, HorizonPlan, Rationale, RationaleCategory};
pub use fixture::{Fixture, Scenario};
pub use ids::{FixtureId, PlayerId};
pub use player::{Archetype, Availability, Player, PlayerState, PlayerTraits};
pub use rolling_load::{LoadEntry, RollingLoadBuffer};
pub use slot::{DragFamily, Formation, Slot, SlotKey};
