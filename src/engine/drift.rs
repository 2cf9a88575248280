//! # engine::drift
//!
//! Bounded random walks that make the deck look alive.  Every function takes
//! the current record plus an RNG and returns the replacement, so the store
//! actor can apply them against the latest committed value and tests can
//! drive them with a seeded `StdRng`.

use chrono::{DateTime, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::engine::metrics::{bounded, round_to};
use crate::models::{
    AssetClass, Indicator, IndicatorFormat, Intensity, LiquidationSpike, Position, Side,
};

pub const SENTIMENT_RANGE: (i32, i32) = (12, 92);
pub const INDEX_RANGE: (f64, f64) = (5.0, 85.0);
pub const PERCENT_RANGE: (f64, f64) = (-3.0, 6.0);
pub const CHANGE_RANGE: (f64, f64) = (-8.0, 8.0);
/// Price indicators move within this band of their current value per tick.
pub const PRICE_BAND: (f64, f64) = (0.94, 1.08);
/// Marks stay within this band of the entry price.
pub const MARK_BAND: (f64, f64) = (0.92, 1.12);

// ─── Marks ────────────────────────────────────────────────────────────────────

/// One random-walk step for a position mark.  Metals step by a flat amount,
/// crypto by a fraction of entry; the walk leans slightly upward.
pub fn drift_mark<R: Rng + ?Sized>(position: &Position, rng: &mut R) -> Position {
    let scale = match position.asset_class {
        AssetClass::Metals => 1.4,
        AssetClass::Crypto => position.entry * 0.0009,
    };
    let step = (rng.gen::<f64>() - 0.45) * scale;
    let next = round_to(
        bounded(
            position.mark + step,
            position.entry * MARK_BAND.0,
            position.entry * MARK_BAND.1,
        ),
        2,
    );

    let mut moved = position.clone();
    moved.mark = next;
    moved.push_history(next);
    moved
}

// ─── Indicators ───────────────────────────────────────────────────────────────

pub fn drift_indicator<R: Rng + ?Sized>(indicator: &Indicator, rng: &mut R) -> Indicator {
    let amplitude = match indicator.format {
        IndicatorFormat::Price => 150.0,
        IndicatorFormat::Percent | IndicatorFormat::Index => 1.5,
    };
    let noise = (rng.gen::<f64>() - 0.5 + indicator.bias.weight() * 0.15) * amplitude;

    let value = match indicator.format {
        IndicatorFormat::Index => bounded(indicator.value + noise, INDEX_RANGE.0, INDEX_RANGE.1),
        IndicatorFormat::Price => bounded(
            indicator.value + noise,
            indicator.value * PRICE_BAND.0,
            indicator.value * PRICE_BAND.1,
        ),
        IndicatorFormat::Percent => {
            bounded(indicator.value + noise * 0.4, PERCENT_RANGE.0, PERCENT_RANGE.1)
        }
    };
    let change = bounded(indicator.change + noise * 0.2, CHANGE_RANGE.0, CHANGE_RANGE.1);

    Indicator {
        value: round_to(value, 2),
        change: round_to(change, 2),
        ..indicator.clone()
    }
}

// ─── Sentiment ────────────────────────────────────────────────────────────────

pub fn drift_sentiment<R: Rng + ?Sized>(score: i32, rng: &mut R) -> i32 {
    let step = (rng.gen::<f64>() - 0.5) * 6.0;
    bounded(
        f64::from(score) + step,
        f64::from(SENTIMENT_RANGE.0),
        f64::from(SENTIMENT_RANGE.1),
    )
    .round() as i32
}

// ─── Liquidations ─────────────────────────────────────────────────────────────

const REACTIONS: [&str; 2] = [
    "Fade flush & reload with trend.",
    "Crowd trapped; watch consensus before acting.",
];

fn coin<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.gen::<f64>() > 0.5
}

/// Fabricates one liquidation print stamped at `at`.
pub fn synthesize_spike<R: Rng + ?Sized>(rng: &mut R, at: DateTime<Utc>) -> LiquidationSpike {
    let symbol = if coin(rng) { "BTCUSDT" } else { "ETHUSDT" };
    let exchange = if coin(rng) { "OKX" } else { "Deribit" };
    let notional = (15_000_000.0 + rng.gen::<f64>() * 70_000_000.0).round();
    let side = if coin(rng) { Side::Longs } else { Side::Shorts };
    let intensity = if rng.gen::<f64>() > 0.6 {
        Intensity::Extreme
    } else if coin(rng) {
        Intensity::Elevated
    } else {
        Intensity::Moderate
    };
    let reaction = if coin(rng) { REACTIONS[0] } else { REACTIONS[1] };

    LiquidationSpike {
        id: format!("liq-{}", Uuid::new_v4().simple()),
        symbol: symbol.to_string(),
        exchange: exchange.to_string(),
        notional,
        side,
        intensity,
        timestamp: at,
        reaction: reaction.to_string(),
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{indicator_seeds, initial_positions};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_mark_stays_in_band_and_history_keeps_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for seed in initial_positions() {
            let len = seed.history.len();
            let mut p = seed.clone();
            for _ in 0..2_000 {
                p = drift_mark(&p, &mut rng);
                assert!(p.mark >= round_to(p.entry * MARK_BAND.0, 2));
                assert!(p.mark <= round_to(p.entry * MARK_BAND.1, 2));
                assert_eq!(p.history.len(), len);
                assert_eq!(p.history.back().copied(), Some(p.mark));
            }
        }
    }

    #[test]
    fn test_indicators_respect_format_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut indicators = indicator_seeds();
        for _ in 0..5_000 {
            let before = indicators.clone();
            indicators = indicators.iter().map(|i| drift_indicator(i, &mut rng)).collect();
            for (prev, next) in before.iter().zip(&indicators) {
                assert_eq!(prev.bias, next.bias);
                assert!(next.change >= CHANGE_RANGE.0 && next.change <= CHANGE_RANGE.1);
                match next.format {
                    IndicatorFormat::Index => {
                        assert!(next.value >= INDEX_RANGE.0 && next.value <= INDEX_RANGE.1)
                    }
                    IndicatorFormat::Percent => {
                        assert!(next.value >= PERCENT_RANGE.0 && next.value <= PERCENT_RANGE.1)
                    }
                    IndicatorFormat::Price => {
                        assert!(next.value >= round_to(prev.value * PRICE_BAND.0, 2));
                        assert!(next.value <= round_to(prev.value * PRICE_BAND.1, 2));
                    }
                }
            }
        }
    }

    #[test]
    fn test_sentiment_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut score = 72;
        for _ in 0..10_000 {
            score = drift_sentiment(score, &mut rng);
            assert!((SENTIMENT_RANGE.0..=SENTIMENT_RANGE.1).contains(&score));
        }
    }

    #[test]
    fn test_sentiment_pulled_back_into_range() {
        let mut rng = StdRng::seed_from_u64(11);
        assert!(drift_sentiment(100, &mut rng) <= SENTIMENT_RANGE.1);
        assert!(drift_sentiment(0, &mut rng) >= SENTIMENT_RANGE.0);
    }

    #[test]
    fn test_synthesized_spike_fields() {
        let mut rng = StdRng::seed_from_u64(99);
        let at = Utc::now();
        for _ in 0..200 {
            let spike = synthesize_spike(&mut rng, at);
            assert!(spike.id.starts_with("liq-"));
            assert!(["BTCUSDT", "ETHUSDT"].contains(&spike.symbol.as_str()));
            assert!(["OKX", "Deribit"].contains(&spike.exchange.as_str()));
            assert!(spike.notional >= 15_000_000.0 && spike.notional <= 85_000_000.0);
            assert_eq!(spike.notional.fract(), 0.0);
            assert!(REACTIONS.contains(&spike.reaction.as_str()));
            assert_eq!(spike.timestamp, at);
        }
    }
}
