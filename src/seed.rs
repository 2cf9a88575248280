//! # seed
//!
//! Opening book for the deck: three positions, six indicator cards, the
//! catalyst calendar, three historical liquidations and the marketing copy.
//! Calendar and liquidation times are relative to `now` so the page always
//! opens with upcoming catalysts and recent flushes.

use chrono::{DateTime, Duration, Utc};

use crate::models::{
    AssetClass, Bias, CalendarEvent, Catalog, Conviction, DeskState, Direction, Impact, Indicator,
    IndicatorFormat, Intensity, LiquidationFeed, LiquidationSpike, OutboundLink, Position, Side,
    StrategyPillar,
};

pub const INITIAL_SENTIMENT: i32 = 72;

/// Fresh deck state at revision 0.
pub fn initial_desk(now: DateTime<Utc>) -> DeskState {
    DeskState {
        revision: 0,
        positions: initial_positions(),
        indicators: indicator_seeds(),
        sentiment: INITIAL_SENTIMENT,
        liquidations: LiquidationFeed::from_newest_first(liquidation_seeds(now)),
    }
}

pub fn catalog(now: DateTime<Utc>) -> Catalog {
    Catalog {
        calendar: market_calendar(now),
        pillars: strategy_pillars(),
        launch: OutboundLink {
            label: "Launch instantly on Puter".into(),
            href: "https://puter.com".into(),
            external: true,
        },
        deployment: OutboundLink {
            label: "View live deployment".into(),
            href: "https://agentic-72565415.vercel.app".into(),
            external: false,
        },
    }
}

// ─── Positions ────────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn position(
    id: &str,
    asset: &str,
    asset_class: AssetClass,
    direction: Direction,
    size: f64,
    entry: f64,
    mark: f64,
    stop_percent: f64,
    tp_percent: f64,
    confidence: f64,
    conviction: Conviction,
    history: &[f64],
) -> Position {
    Position {
        id: id.into(),
        asset: asset.into(),
        asset_class,
        direction,
        size,
        entry,
        mark,
        stop_percent,
        tp_percent,
        confidence,
        conviction,
        history: history.iter().copied().collect(),
    }
}

pub fn initial_positions() -> Vec<Position> {
    vec![
        position(
            "btc-core", "BTCUSDT", AssetClass::Crypto, Direction::Long,
            2.4, 48250.0, 49580.0, 2.1, 8.5, 0.92, Conviction::High,
            &[
                46800.0, 47040.0, 47250.0, 47410.0, 47680.0, 47900.0, 48250.0, 48420.0,
                48700.0, 48980.0, 49110.0, 49250.0, 49300.0, 49420.0, 49510.0, 49580.0,
            ],
        ),
        position(
            "eth-satellite", "ETHUSDT", AssetClass::Crypto, Direction::Long,
            120.0, 2720.0, 2816.0, 1.8, 6.2, 0.88, Conviction::High,
            &[
                2580.0, 2598.0, 2625.0, 2644.0, 2660.0, 2688.0, 2705.0, 2720.0, 2735.0,
                2764.0, 2782.0, 2795.0, 2805.0, 2812.0, 2816.0,
            ],
        ),
        position(
            "gold-hedge", "GOLDUSD", AssetClass::Metals, Direction::Short,
            820.0, 2422.0, 2389.0, 1.2, 3.1, 0.74, Conviction::Medium,
            &[
                2468.0, 2462.0, 2455.0, 2451.0, 2444.0, 2438.0, 2432.0, 2428.0, 2422.0,
                2416.0, 2410.0, 2404.0, 2398.0, 2392.0, 2389.0,
            ],
        ),
    ]
}

// ─── Indicators ───────────────────────────────────────────────────────────────

fn indicator(
    name: &str,
    shorthand: &str,
    value: f64,
    format: IndicatorFormat,
    change: f64,
    bias: Bias,
    description: &str,
) -> Indicator {
    Indicator {
        name: name.into(),
        shorthand: shorthand.into(),
        value,
        format,
        change,
        bias,
        description: description.into(),
    }
}

pub fn indicator_seeds() -> Vec<Indicator> {
    use IndicatorFormat::{Index, Percent, Price};

    vec![
        indicator("Exponential Moving Average", "EMA(50/200)", 1.14, Percent, 0.24, Bias::Bullish,
            "Golden ratio spread signaling sustained trend strength."),
        indicator("Average Directional Index", "ADX 37", 37.0, Index, 4.2, Bias::Bullish,
            "Directional energy accelerating with price expansion."),
        indicator("Average True Range", "ATR 14", 4.8, Percent, -0.6, Bias::Neutral,
            "Volatility compressing; supports pyramiding trend adds."),
        indicator("Relative Strength Index", "RSI 63", 63.0, Index, 3.1, Bias::Bullish,
            "Momentum uptrend intact with moderated overbought risk."),
        indicator("Funding & Crowd Flow", "Funding +4.2bps", 0.042, Percent, -0.8, Bias::Neutral,
            "Crowd greed cooling; ideal for trend continuation entries."),
        indicator("Volume Weighted Average Price", "VWAP", 48790.0, Price, 240.0, Bias::Bullish,
            "Price holding premium above VWAP with rising participation."),
    ]
}

// ─── Calendar ─────────────────────────────────────────────────────────────────

pub fn market_calendar(now: DateTime<Utc>) -> Vec<CalendarEvent> {
    let event = |id: &str, title: &str, market: &str, impact: Impact, hours_ahead: i64, play: &str| {
        CalendarEvent {
            id: id.into(),
            title: title.into(),
            market: market.into(),
            impact,
            datetime: now + Duration::hours(hours_ahead),
            play: play.into(),
        }
    };

    vec![
        event("cpi", "US CPI Release", "Macro", Impact::High, 18,
            "Fade first spike; rejoin trend on confirmation volume."),
        event("ecb", "ECB Rate Decision", "EUR Rates", Impact::Medium, 40,
            "Monitor GOLDUSD; tighten stops during statement."),
        event("eth-upgrade", "ETH Shanghai +120 Day", "Ethereum", Impact::High, 60,
            "Deploy trend adds if staking unlock flows stay muted."),
        event("btc-etf", "BTC ETF Inflows Update", "Bitcoin", Impact::Medium, 28,
            "Use consensus alignment: indicators + sentiment must agree."),
    ]
}

// ─── Liquidations ─────────────────────────────────────────────────────────────

/// Newest first.
pub fn liquidation_seeds(now: DateTime<Utc>) -> Vec<LiquidationSpike> {
    let spike = |id: &str, symbol: &str, exchange: &str, notional: f64, side: Side, intensity: Intensity,
                 minutes_ago: i64, reaction: &str| LiquidationSpike {
        id: id.into(),
        symbol: symbol.into(),
        exchange: exchange.into(),
        notional,
        side,
        intensity,
        timestamp: now - Duration::minutes(minutes_ago),
        reaction: reaction.into(),
    };

    vec![
        spike("btc-n1", "BTCUSDT", "Binance", 86_400_000.0, Side::Longs, Intensity::Extreme, 22,
            "Price snapped +1.8% in 12m; reloaded trend adds."),
        spike("eth-n1", "ETHUSDT", "Bybit", 24_900_000.0, Side::Shorts, Intensity::Elevated, 58,
            "News confirmation + crowd momentum triggered consensus entry."),
        spike("xau-n1", "XAUUSD", "CME", 11_200_000.0, Side::Longs, Intensity::Moderate, 95,
            "Held short bias; rolled stop 0.4% to lock-in gains."),
    ]
}

// ─── Strategy Pillars ─────────────────────────────────────────────────────────

pub fn strategy_pillars() -> Vec<StrategyPillar> {
    let pillar = |tag: &str, title: &str, description: &str, highlights: [&str; 3]| StrategyPillar {
        tag: tag.into(),
        title: title.into(),
        description: description.into(),
        highlights: highlights.iter().map(|h| h.to_string()).collect(),
    };

    vec![
        pillar(
            "{Trend Trading}",
            "Ride dominant flow, ignore the chop.",
            "Let the market do the heavy lifting: we pyramid with trend confirmations, cut fast \
             when momentum fractures, and refuse to donate during indecisive news chop.",
            [
                "Multi-timeframe structure to confirm direction",
                "Dynamic ATR matrix to size adds and trim risk",
                "Momentum cooling instantly triggers stop trail",
            ],
        ),
        pillar(
            "{News Trading}",
            "Exploit catalyst aftermath, never the initial chaos.",
            "We allow the first spike to exhaust, verify with volume + candle structure, then \
             capture the reaction wave. Funding imbalances are auto-hedged to avoid stuck positioning.",
            [
                "Event filters auto-pause high-risk assets",
                "Candle + volume confirmation unlocks entries",
                "Puter zero-key automations deploy hedge hedges instantly",
            ],
        ),
        pillar(
            "{Consensus Trading}",
            "Only trade when the crowd, the chart, and the news agree.",
            "Signals must stack: technical momentum, macro narrative, and crowd behavior. When two \
             schools align we deploy; otherwise we stay white-glove patient.",
            [
                "Sentiment gauge drives leverage throttle",
                "Cross-desk news + social scanner syncs bias",
                "Crowd flush + indicator surge triggers greenlight",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_desk_shape() {
        let desk = initial_desk(Utc::now());
        assert_eq!(desk.revision, 0);
        assert_eq!(desk.positions.len(), 3);
        assert_eq!(desk.indicators.len(), 6);
        assert_eq!(desk.sentiment, INITIAL_SENTIMENT);
        assert_eq!(desk.liquidations.len(), 3);
        assert_eq!(desk.liquidations.newest().map(|s| s.id.as_str()), Some("btc-n1"));
    }

    #[test]
    fn test_calendar_is_in_the_future() {
        let now = Utc::now();
        assert!(market_calendar(now).iter().all(|e| e.datetime > now));
    }

    #[test]
    fn test_position_ids_are_unique() {
        let positions = initial_positions();
        let mut ids: Vec<_> = positions.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), positions.len());
    }
}
