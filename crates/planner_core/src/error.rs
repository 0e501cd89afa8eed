//! Error taxonomy for the horizon planner.
//!
//! All recoverable conditions are returned as values from `plan_horizon`;
//! `NumericalBreach` is the one fatal/assertion-class variant and is always
//! logged loudly via `tracing::error!` at the point it is constructed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::PlayerId;

/// Why a slot could not be filled for a given match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InfeasibleReason {
    NoCandidates,
    AllForbiddenByConstraints,
    AllInjuredOrSuspended,
}

/// The planner's complete error taxonomy.
#[derive(Debug, Error, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlannerError {
    #[error("match {match_index}: no legal player for slot {slot_key} ({reason:?})")]
    InfeasibleSlot { match_index: usize, slot_key: String, reason: InfeasibleReason },

    #[error("lock conflict on slot {slot_key}: both {player_a} and {player_b} are locked to it")]
    LockConflict { slot_key: String, player_a: PlayerId, player_b: PlayerId },

    #[error("lock on slot {slot_key} cannot be honored: {player} is unavailable")]
    LockedPlayerUnavailable { slot_key: String, player: PlayerId },

    #[error("invalid input: {detail}")]
    InvalidInput { detail: String },

    #[error("match {match_index}: numerical breach — {detail}")]
    NumericalBreach { match_index: usize, detail: String },
}

impl PlannerError {
    pub fn invalid_input(detail: impl Into<String>) -> Self {
        PlannerError::InvalidInput { detail: detail.into() }
    }

    /// Construct a `NumericalBreach` and emit the loud log side-effect that
    /// distinguishes it from the other, purely-recoverable variants.
    pub fn numerical_breach(match_index: usize, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        tracing::error!(match_index, %detail, "numerical breach: solved cost exceeded Big-M");
        PlannerError::NumericalBreach { match_index, detail }
    }
}

pub type PlannerResult<T> = Result<T, PlannerError>;
