//! Non-fatal diagnostics channel: warnings attached to a
//! `HorizonPlan` that inform downstream advisors without altering the
//! plan itself.

use serde::{Deserialize, Serialize};

use crate::model::{FixtureId, PlayerId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    HolidayRecommended,
    ClampedInput,
    ApproachingJadednessCeiling,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub player_id: Option<PlayerId>,
    pub fixture_id: Option<FixtureId>,
    pub message: String,
}

/// Accumulates diagnostics across a `plan_horizon` call. Owned by the
/// orchestrator for the duration of one call, never a global.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticsSink {
    entries: Vec<Diagnostic>,
}

impl DiagnosticsSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(kind = ?diagnostic.kind, message = %diagnostic.message, "planner diagnostic");
        self.entries.push(diagnostic);
    }

    pub fn warn_jadedness_approaching_ceiling(&mut self, player_id: PlayerId, fixture_id: FixtureId, jadedness: f64) {
        self.push(Diagnostic {
            kind: DiagnosticKind::ApproachingJadednessCeiling,
            player_id: Some(player_id.clone()),
            fixture_id: Some(fixture_id),
            message: format!("{player_id} projected jadedness {jadedness:.0}; holiday recommended"),
        });
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}
