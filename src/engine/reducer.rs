//! # engine::reducer
//!
//! The single place where [`DeskState`] changes.  The store actor feeds every
//! [`Action`] through [`reduce`] in arrival order, whether it came from a
//! button on the page or from a simulation timer.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::engine::drift::{drift_indicator, drift_mark, drift_sentiment, synthesize_spike};
use crate::engine::panel::{self, StopNudge, TargetNudge};
use crate::models::{DeskState, Position};

// ─── Action ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Position panel ────────────────────────────────────────────────────────
    AdjustStop { id: String, percent: f64 },
    AdjustTarget { id: String, percent: f64 },
    NudgeStop { id: String, nudge: StopNudge },
    NudgeTarget { id: String, nudge: TargetNudge },
    Close { id: String, ratio: f64 },
    Flip { id: String },
    // ── Simulation ────────────────────────────────────────────────────────────
    DriftMarks,
    DriftIndicators,
    DriftSentiment,
    SpawnLiquidation { at: DateTime<Utc> },
}

impl Action {
    /// Short name for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::AdjustStop { .. } => "adjust_stop",
            Action::AdjustTarget { .. } => "adjust_target",
            Action::NudgeStop { .. } => "nudge_stop",
            Action::NudgeTarget { .. } => "nudge_target",
            Action::Close { .. } => "close",
            Action::Flip { .. } => "flip",
            Action::DriftMarks => "drift_marks",
            Action::DriftIndicators => "drift_indicators",
            Action::DriftSentiment => "drift_sentiment",
            Action::SpawnLiquidation { .. } => "spawn_liquidation",
        }
    }
}

/// Which part of the deck a committed action touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Slice {
    Positions,
    Indicators,
    Sentiment,
    Liquidations,
}

// ─── Reduce ───────────────────────────────────────────────────────────────────

/// Applies `action` to `state`.  Returns the slice that changed, or `None`
/// when nothing matched (e.g. an unknown position id).  Does not touch
/// `revision`; the store bumps it on commit.
pub fn reduce<R: Rng + ?Sized>(state: &mut DeskState, action: Action, rng: &mut R) -> Option<Slice> {
    match action {
        Action::AdjustStop { id, percent } => {
            replace_position(state, &id, |p| panel::adjust_stop(p, percent))
        }
        Action::AdjustTarget { id, percent } => {
            replace_position(state, &id, |p| panel::adjust_target(p, percent))
        }
        Action::NudgeStop { id, nudge } => {
            replace_position(state, &id, |p| panel::nudge_stop(p, nudge))
        }
        Action::NudgeTarget { id, nudge } => {
            replace_position(state, &id, |p| panel::nudge_target(p, nudge))
        }
        Action::Close { id, ratio } => replace_position(state, &id, |p| panel::close(p, ratio)),
        Action::Flip { id } => replace_position(state, &id, panel::flip),

        Action::DriftMarks => {
            state.positions = state.positions.iter().map(|p| drift_mark(p, rng)).collect();
            Some(Slice::Positions)
        }
        Action::DriftIndicators => {
            state.indicators = state.indicators.iter().map(|i| drift_indicator(i, rng)).collect();
            Some(Slice::Indicators)
        }
        Action::DriftSentiment => {
            state.sentiment = drift_sentiment(state.sentiment, rng);
            Some(Slice::Sentiment)
        }
        Action::SpawnLiquidation { at } => {
            state.liquidations.push(synthesize_spike(rng, at));
            Some(Slice::Liquidations)
        }
    }
}

/// Swaps the position with `id` for `f(position)`; all others untouched.
fn replace_position(
    state: &mut DeskState,
    id: &str,
    f: impl FnOnce(&Position) -> Position,
) -> Option<Slice> {
    match state.positions.iter_mut().find(|p| p.id == id) {
        Some(slot) => {
            *slot = f(slot);
            Some(Slice::Positions)
        }
        None => {
            debug!(id, "No position with this id, action ignored");
            None
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
