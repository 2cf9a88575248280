//! # engine::metrics
//!
//! Pure derived values recomputed from a snapshot on every read: stop and
//! target prices, P&L, portfolio aggregates, the sentiment label and the
//! relative-time strings used by the calendar and liquidation feed.
//!
//! Nothing here touches the store.  Views call these on the `Arc<DeskState>`
//! they pulled, so a reading is always consistent with one revision.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{AssetClass, Direction, Position};

const MS_PER_MINUTE: f64 = 60_000.0;
const MS_PER_HOUR: f64 = 3_600_000.0;

// ─── Numeric Helpers ──────────────────────────────────────────────────────────

/// Rounds half away from zero to `decimals` places.
#[inline]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// `min(max(value, lo), hi)`. Never panics, even when `lo > hi`.
#[inline]
pub fn bounded(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

// ─── Per-Position Metrics ─────────────────────────────────────────────────────

pub fn stop_price(position: &Position) -> f64 {
    let offset = position.stop_percent / 100.0;
    let raw = match position.direction {
        Direction::Long => position.entry * (1.0 - offset),
        Direction::Short => position.entry * (1.0 + offset),
    };
    round_to(raw, 2)
}

pub fn target_price(position: &Position) -> f64 {
    let offset = position.tp_percent / 100.0;
    let raw = match position.direction {
        Direction::Long => position.entry * (1.0 + offset),
        Direction::Short => position.entry * (1.0 - offset),
    };
    round_to(raw, 2)
}

/// Favourable price move per unit: positive when the position is winning.
#[inline]
fn price_diff(position: &Position) -> f64 {
    match position.direction {
        Direction::Long => position.mark - position.entry,
        Direction::Short => position.entry - position.mark,
    }
}

pub fn pnl(position: &Position) -> f64 {
    price_diff(position) * position.size
}

/// Unrealised move relative to entry, in percent.  `0.0` when the entry is
/// not a positive price.
pub fn pnl_percent(position: &Position) -> f64 {
    if position.entry <= 0.0 {
        return 0.0;
    }
    price_diff(position) / position.entry * 100.0
}

// ─── Portfolio ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PortfolioStats {
    pub pnl: f64,
    /// Mean of per-position P&L percent.
    pub pnl_percent: f64,
    pub crypto_size: f64,
    pub metals_size: f64,
}

impl PortfolioStats {
    pub fn from_positions(positions: &[Position]) -> Self {
        let pnl_total = positions.iter().map(pnl).sum();
        let pnl_percent = if positions.is_empty() {
            0.0
        } else {
            positions.iter().map(pnl_percent).sum::<f64>() / positions.len() as f64
        };
        let size_of = |class: AssetClass| {
            positions
                .iter()
                .filter(|p| p.asset_class == class)
                .map(|p| p.size)
                .sum()
        };

        Self {
            pnl: pnl_total,
            pnl_percent,
            crypto_size: size_of(AssetClass::Crypto),
            metals_size: size_of(AssetClass::Metals),
        }
    }
}

// ─── Sentiment ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SentimentLabel {
    Euphoria,
    Greed,
    Balanced,
    Fear,
    Capitulation,
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            SentimentLabel::Euphoria => "Euphoria",
            SentimentLabel::Greed => "Greed",
            SentimentLabel::Balanced => "Balanced",
            SentimentLabel::Fear => "Fear",
            SentimentLabel::Capitulation => "Capitulation",
        };
        f.write_str(text)
    }
}

pub fn sentiment_label(score: i32) -> SentimentLabel {
    match score {
        s if s >= 75 => SentimentLabel::Euphoria,
        s if s >= 55 => SentimentLabel::Greed,
        s if s >= 45 => SentimentLabel::Balanced,
        s if s >= 25 => SentimentLabel::Fear,
        _ => SentimentLabel::Capitulation,
    }
}

// ─── Relative Time ────────────────────────────────────────────────────────────

/// Hours floored, leftover minutes rounded.
fn split_hours_minutes(diff_ms: f64) -> (i64, i64) {
    let hours = (diff_ms / MS_PER_HOUR).floor();
    let minutes = ((diff_ms - hours * MS_PER_HOUR) / MS_PER_MINUTE).round();
    (hours as i64, minutes as i64)
}

/// Countdown to a calendar event: `"18h 0m"`, or `"Live"` once it has started.
pub fn time_until(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = (target - now).num_milliseconds() as f64;
    if diff_ms <= 0.0 {
        return "Live".to_string();
    }
    let (hours, minutes) = split_hours_minutes(diff_ms);
    format!("{hours}h {minutes}m")
}

/// Age of a past event: `"1h 35m"`, `"22m"`, or `"Now"` for future stamps.
pub fn time_since(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = (now - target).num_milliseconds() as f64;
    if diff_ms <= 0.0 {
        return "Now".to_string();
    }
    let (hours, minutes) = split_hours_minutes(diff_ms);
    if hours > 0 {
        return format!("{hours}h {}m", minutes.max(1));
    }
    let mins = ((diff_ms / MS_PER_MINUTE).round() as i64).max(1);
    format!("{mins}m")
}

// ─── Tests ────────────────────────────────────────────────────────────────────
