//! Deterministic multi-match lineup planner.
//!
//! Given a squad, an ordered fixture list, a formation, and a set of
//! user constraints, [`plan_horizon`] produces a per-fixture starting
//! XI, bench, and minute allocation that scalarizes immediate match
//! performance against a player-development horizon of future
//! fixtures, accounting for condition, sharpness, and jadedness.
//!
//! The crate is organised around one pipeline run per fixture, in
//! order:
//!
//! 1. [`propagate`] projects rest-day recovery onto every player's state.
//! 2. [`shadow`] prices the opportunity cost of starting a player now
//!    against the discounted value of future fixtures.
//! 3. [`matrix`] builds the GK and outfield cost matrices.
//! 4. [`solve`] runs the assignment solve and bench selection.
//! 5. The orchestrator allocates minutes and propagates match-day load.
//! 6. [`explain`] attaches a human-readable rationale to every player.
//!
//! Nothing in this crate touches the filesystem, the clock, or a
//! random number generator: `plan_horizon` is a pure function of its
//! arguments, and identical inputs always produce an identical plan.
//! No global tracing subscriber is installed here; callers (the CLI)
//! own that decision.

pub mod diagnostics;
pub mod error;
pub mod explain;
pub mod logging;
pub mod matrix;
pub mod model;
pub mod orchestrator;
pub mod params;
pub mod propagate;
pub mod scoring;
pub mod shadow;
pub mod solve;

pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticsSink};
pub use error::{InfeasibleReason, PlannerError, PlannerResult};
pub use model::{
    Archetype, Assignment, Availability, Constraints, DragFamily, Fixture, FixtureId, FixturePlan,
    Formation, HorizonPlan, LoadEntry, Player, PlayerId, PlayerState, PlayerTraits, Rationale,
    RationaleCategory, RollingLoadBuffer, Scenario, Slot, SlotKey,
};
pub use orchestrator::plan_horizon;
pub use params::{ParameterOverrides, ParameterStore, DEFAULT_PARAMETERS};
