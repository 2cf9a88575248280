//! # engine::panel
//!
//! Position-panel operations.  Each takes the current record and returns its
//! replacement; the reducer swaps it into the list by id.
//!
//! ```text
//! adjust_stop    clamp [0.4, 12]   → round 2dp
//! adjust_target  clamp [1.2, 28]   → round 2dp
//! close          ratio ≥ 1 → flat + Rebuilding, else shrink by ratio
//! flip           invert direction, re-enter at mark, tighten stop, stretch target
//! ```

use serde::{Deserialize, Serialize};

use crate::engine::metrics::{bounded, round_to};
use crate::models::{Conviction, Position};

pub const STOP_RANGE: (f64, f64) = (0.4, 12.0);
pub const TARGET_RANGE: (f64, f64) = (1.2, 28.0);
pub const CONFIDENCE_RANGE: (f64, f64) = (0.55, 0.98);

const FLIP_STOP_FACTOR: f64 = 0.8;
const FLIP_TARGET_FACTOR: f64 = 1.1;
const FLIP_CONFIDENCE_DECAY: f64 = 0.97;

// ─── Nudges ───────────────────────────────────────────────────────────────────

/// One-click stop adjustments, resolved against the stop at apply time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopNudge {
    Tighten,
    Widen,
}

impl StopNudge {
    pub fn factor(self) -> f64 {
        match self {
            StopNudge::Tighten => 0.85,
            StopNudge::Widen => 1.15,
        }
    }
}

/// One-click take-profit adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetNudge {
    BankSooner,
    Stretch,
}

impl TargetNudge {
    pub fn factor(self) -> f64 {
        match self {
            TargetNudge::BankSooner => 0.9,
            TargetNudge::Stretch => 1.2,
        }
    }
}

// ─── Operations ───────────────────────────────────────────────────────────────

pub fn adjust_stop(position: &Position, percent: f64) -> Position {
    Position {
        stop_percent: round_to(bounded(percent, STOP_RANGE.0, STOP_RANGE.1), 2),
        ..position.clone()
    }
}

pub fn adjust_target(position: &Position, percent: f64) -> Position {
    Position {
        tp_percent: round_to(bounded(percent, TARGET_RANGE.0, TARGET_RANGE.1), 2),
        ..position.clone()
    }
}

pub fn nudge_stop(position: &Position, nudge: StopNudge) -> Position {
    adjust_stop(position, position.stop_percent * nudge.factor())
}

pub fn nudge_target(position: &Position, nudge: TargetNudge) -> Position {
    adjust_target(position, position.tp_percent * nudge.factor())
}

/// Closes `ratio` of the position.  A full close flattens it and marks the
/// conviction as rebuilding; a partial close keeps the conviction.
pub fn close(position: &Position, ratio: f64) -> Position {
    if ratio >= 1.0 {
        return Position {
            size: 0.0,
            conviction: Conviction::Rebuilding,
            ..position.clone()
        };
    }

    let remaining = (position.size * (1.0 - ratio)).max(0.0);
    Position {
        size: round_to(remaining, position.size_precision()),
        ..position.clone()
    }
}

/// Reverses the bias: re-enter at the current mark with a tighter stop, a
/// stretched target and slightly decayed confidence.
pub fn flip(position: &Position) -> Position {
    Position {
        direction: position.direction.flipped(),
        entry: round_to(position.mark, 2),
        stop_percent: round_to(position.stop_percent * FLIP_STOP_FACTOR, 2),
        tp_percent: round_to(position.tp_percent * FLIP_TARGET_FACTOR, 2),
        confidence: bounded(
            position.confidence * FLIP_CONFIDENCE_DECAY,
            CONFIDENCE_RANGE.0,
            CONFIDENCE_RANGE.1,
        ),
        conviction: Conviction::Medium,
        ..position.clone()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
