//! Thin `tracing` span helpers shared by `plan_horizon` and by
//! `planner_cli`. This module never installs a
//! subscriber — only the binary does that, from `RUST_LOG` — it only
//! standardises the span-per-unit-of-work shape so every fixture and every
//! solver stage carries the same structured fields regardless of which
//! subscriber ends up consuming them.

use tracing::Span;

use crate::model::FixtureId;

/// One span per fixture in the horizon, carrying its index and id so log
/// lines from every pipeline stage (PrepareStates..RecordHistory) can be
/// correlated back to a single match without string-matching messages.
pub fn fixture_span(match_index: usize, fixture_id: &FixtureId) -> Span {
    tracing::info_span!("plan_fixture", match_index, fixture_id = %fixture_id)
}

/// One span per named solver stage within a fixture span.
pub fn stage_span(stage: &'static str) -> Span {
    tracing::debug_span!("stage", name = stage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_span_carries_the_expected_name() {
        let id = FixtureId::from("f1");
        let span = fixture_span(0, &id);
        let meta = span.metadata().expect("span always has metadata outside a no-op subscriber config");
        assert_eq!(meta.name(), "plan_fixture");
    }
}
