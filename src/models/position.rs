//! # models::position
//!
//! Defines [`Position`], one simulated holding on the deck.
//!
//! A position is never removed from the deck.  Closing it drives `size` to
//! zero ("flat") and the record stays on screen so it can be flipped or
//! rebuilt later.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

// ─── Enums ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetClass {
    Crypto,
    Metals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Direction::Long => Direction::Short,
            Direction::Short => Direction::Long,
        }
    }

    #[inline]
    pub fn is_long(self) -> bool {
        self == Direction::Long
    }
}

/// Qualitative label shown next to the numeric confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Conviction {
    High,
    Medium,
    Rebuilding,
}

// ─── Size Precision Policy ────────────────────────────────────────────────────

/// Decimal places used when rounding or displaying a position size.
/// Assets not listed fall back to [`DEFAULT_SIZE_PRECISION`].
const SIZE_PRECISION: &[(&str, u32)] = &[("ETHUSDT", 1)];

pub const DEFAULT_SIZE_PRECISION: u32 = 2;

pub fn size_precision(asset: &str) -> u32 {
    SIZE_PRECISION
        .iter()
        .find(|(symbol, _)| *symbol == asset)
        .map(|(_, places)| *places)
        .unwrap_or(DEFAULT_SIZE_PRECISION)
}

// ─── Position ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: String,
    pub asset: String,
    pub asset_class: AssetClass,
    pub direction: Direction,
    /// Quantity held.  Zero means flat.
    pub size: f64,
    pub entry: f64,
    pub mark: f64,
    /// Stop distance from entry, in percent.
    pub stop_percent: f64,
    /// Take-profit distance from entry, in percent.
    pub tp_percent: f64,
    /// 0.0 – 1.0
    pub confidence: f64,
    pub conviction: Conviction,
    /// Recent marks, oldest first.  The length is fixed at seed time.
    pub history: VecDeque<f64>,
}

impl Position {
    pub fn size_precision(&self) -> u32 {
        size_precision(&self.asset)
    }

    pub fn is_flat(&self) -> bool {
        self.size == 0.0
    }

    /// Slides the history window by one: oldest mark out, `mark` in.
    pub fn push_history(&mut self, mark: f64) {
        if self.history.pop_front().is_some() {
            self.history.push_back(mark);
        }
    }
}
