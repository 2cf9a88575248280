//! # models::market
//!
//! Liquidation events and the capped, newest-first feed that holds them.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of spikes kept on the radar.
pub const FEED_CAPACITY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Longs,
    Shorts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intensity {
    Extreme,
    Elevated,
    Moderate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidationSpike {
    pub id: String,
    pub symbol: String,
    pub exchange: String,
    /// USD notional cleared.
    pub notional: f64,
    pub side: Side,
    pub intensity: Intensity,
    pub timestamp: DateTime<Utc>,
    pub reaction: String,
}

// ─── LiquidationFeed ──────────────────────────────────────────────────────────

/// Newest spike at index 0, never more than [`FEED_CAPACITY`] entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LiquidationFeed {
    entries: VecDeque<LiquidationSpike>,
}

impl LiquidationFeed {
    /// Builds a feed from spikes already ordered newest-first.
    pub fn from_newest_first(spikes: impl IntoIterator<Item = LiquidationSpike>) -> Self {
        let mut entries: VecDeque<_> = spikes.into_iter().collect();
        entries.truncate(FEED_CAPACITY);
        Self { entries }
    }

    /// Prepends `spike`, evicting the oldest entries beyond capacity.
    pub fn push(&mut self, spike: LiquidationSpike) {
        self.entries.push_front(spike);
        self.entries.truncate(FEED_CAPACITY);
    }

    pub fn iter(&self) -> impl Iterator<Item = &LiquidationSpike> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn newest(&self) -> Option<&LiquidationSpike> {
        self.entries.front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spike(id: &str) -> LiquidationSpike {
        LiquidationSpike {
            id: id.to_string(),
            symbol: "BTCUSDT".into(),
            exchange: "OKX".into(),
            notional: 20_000_000.0,
            side: Side::Longs,
            intensity: Intensity::Moderate,
            timestamp: Utc::now(),
            reaction: "Fade flush & reload with trend.".into(),
        }
    }

    #[test]
    fn test_push_prepends_and_caps() {
        let mut feed = LiquidationFeed::default();
        for i in 0..8 {
            feed.push(spike(&format!("liq-{i}")));
        }
        assert_eq!(feed.len(), FEED_CAPACITY);
        assert_eq!(feed.newest().map(|s| s.id.as_str()), Some("liq-7"));
        let ids: Vec<_> = feed.iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, vec!["liq-7", "liq-6", "liq-5", "liq-4", "liq-3"]);
    }

    #[test]
    fn test_from_newest_first_truncates() {
        let feed = LiquidationFeed::from_newest_first((0..7).map(|i| spike(&i.to_string())));
        assert_eq!(feed.len(), FEED_CAPACITY);
        assert_eq!(feed.newest().map(|s| s.id.as_str()), Some("0"));
    }
}
