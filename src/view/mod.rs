//! # view
//!
//! Read-side of the deck.  A [`DeckView`] is built from one committed
//! `DeskState` snapshot plus the wall clock, and carries every derived value
//! the page and the JSON API show.  Views never mutate anything; after each
//! commit they are simply rebuilt.

pub mod format;
pub mod gauge;
pub mod page;
pub mod sparkline;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::engine::metrics::{self, PortfolioStats};
use crate::models::{
    CalendarEvent, Catalog, DeskState, Indicator, IndicatorFormat, LiquidationSpike, OutboundLink,
    Position, StrategyPillar,
};
use format::{format_currency, format_delta, format_number, format_percent};
use gauge::{gauge, Gauge};
use sparkline::{sparkline, Sparkline};

// ─── Tone ─────────────────────────────────────────────────────────────────────

/// Colour bucket for a signed figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Negative,
    Flat,
}

impl Tone {
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            Tone::Positive
        } else if value < 0.0 {
            Tone::Negative
        } else {
            Tone::Flat
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Tone::Positive => "tone-up",
            Tone::Negative => "tone-down",
            Tone::Flat => "tone-flat",
        }
    }
}

// ─── Positions ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct PositionView {
    #[serde(flatten)]
    pub position: Position,
    pub stop_price: f64,
    pub target_price: f64,
    pub pnl: f64,
    pub pnl_percent: f64,
    pub tone: Tone,
    pub flat: bool,
    pub size_display: String,
    pub sparkline: Option<Sparkline>,
}

impl PositionView {
    pub fn build(position: &Position) -> Self {
        let pnl = metrics::pnl(position);
        Self {
            stop_price: metrics::stop_price(position),
            target_price: metrics::target_price(position),
            pnl,
            pnl_percent: metrics::pnl_percent(position),
            tone: Tone::of(pnl),
            flat: position.is_flat(),
            size_display: format_number(position.size, position.size_precision() as usize),
            sparkline: sparkline(position.history.iter().copied()),
            position: position.clone(),
        }
    }
}

/// Header card: "Portfolio Pulse".
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioView {
    #[serde(flatten)]
    pub stats: PortfolioStats,
    pub pnl_display: String,
    pub pnl_percent_display: String,
    pub crypto_display: String,
    pub metals_display: String,
}

impl PortfolioView {
    pub fn build(positions: &[Position]) -> Self {
        let stats = PortfolioStats::from_positions(positions);
        Self {
            pnl_display: format_currency(stats.pnl),
            pnl_percent_display: format_percent(stats.pnl_percent, 1),
            crypto_display: format!("{} units", format_number(stats.crypto_size, 2)),
            metals_display: format!("{} oz", format_number(stats.metals_size, 0)),
            stats,
        }
    }
}

// ─── Indicators ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct IndicatorView {
    #[serde(flatten)]
    pub indicator: Indicator,
    pub value_display: String,
    pub change_display: String,
}

impl IndicatorView {
    pub fn build(indicator: &Indicator) -> Self {
        let value_display = match indicator.format {
            IndicatorFormat::Percent => format_percent(indicator.value, 2),
            IndicatorFormat::Price => format_currency(indicator.value),
            IndicatorFormat::Index => format!("{:.0}", indicator.value),
        };
        Self {
            value_display,
            change_display: format_delta(indicator.change),
            indicator: indicator.clone(),
        }
    }
}

// ─── Liquidations ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct LiquidationView {
    #[serde(flatten)]
    pub spike: LiquidationSpike,
    pub notional_display: String,
    /// `"22m"`, `"1h 35m"`, `"Now"`
    pub since: String,
}

impl LiquidationView {
    pub fn build(spike: &LiquidationSpike, now: DateTime<Utc>) -> Self {
        Self {
            notional_display: format_currency(spike.notional),
            since: metrics::time_since(spike.timestamp, now),
            spike: spike.clone(),
        }
    }
}

// ─── Calendar ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct CalendarView {
    #[serde(flatten)]
    pub event: CalendarEvent,
    /// `"18h 0m"` or `"Live"`
    pub until: String,
    pub when_display: String,
}

impl CalendarView {
    pub fn build(event: &CalendarEvent, now: DateTime<Utc>) -> Self {
        Self {
            until: metrics::time_until(event.datetime, now),
            when_display: event.datetime.format("%a %d %b %H:%M UTC").to_string(),
            event: event.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub calendar: Vec<CalendarView>,
    pub pillars: Vec<StrategyPillar>,
    pub launch: OutboundLink,
    pub deployment: OutboundLink,
}

impl CatalogView {
    pub fn build(catalog: &Catalog, now: DateTime<Utc>) -> Self {
        Self {
            calendar: catalog.calendar.iter().map(|e| CalendarView::build(e, now)).collect(),
            pillars: catalog.pillars.clone(),
            launch: catalog.launch.clone(),
            deployment: catalog.deployment.clone(),
        }
    }
}

// ─── Deck ─────────────────────────────────────────────────────────────────────

/// Everything mutable on the page, derived from one revision.
#[derive(Debug, Clone, Serialize)]
pub struct DeckView {
    pub revision: u64,
    pub generated_at: DateTime<Utc>,
    pub portfolio: PortfolioView,
    pub positions: Vec<PositionView>,
    pub indicators: Vec<IndicatorView>,
    pub sentiment: Gauge,
    pub liquidations: Vec<LiquidationView>,
}

impl DeckView {
    pub fn build(state: &DeskState, now: DateTime<Utc>) -> Self {
        Self {
            revision: state.revision,
            generated_at: now,
            portfolio: PortfolioView::build(&state.positions),
            positions: positions_view(state),
            indicators: indicators_view(state),
            sentiment: gauge(state.sentiment),
            liquidations: liquidations_view(state, now),
        }
    }
}

pub fn positions_view(state: &DeskState) -> Vec<PositionView> {
    state.positions.iter().map(PositionView::build).collect()
}

pub fn indicators_view(state: &DeskState) -> Vec<IndicatorView> {
    state.indicators.iter().map(IndicatorView::build).collect()
}

pub fn liquidations_view(state: &DeskState, now: DateTime<Utc>) -> Vec<LiquidationView> {
    state.liquidations.iter().map(|s| LiquidationView::build(s, now)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::initial_desk;

    #[test]
    fn test_deck_view_from_seed() {
        let now = Utc::now();
        let view = DeckView::build(&initial_desk(now), now);

        assert_eq!(view.positions.len(), 3);
        let btc = &view.positions[0];
        assert_eq!(btc.tone, Tone::Positive);
        assert_eq!(btc.size_display, "2.4");
        assert!(btc.sparkline.is_some());

        assert_eq!(view.portfolio.crypto_display, "122.4 units");
        assert_eq!(view.portfolio.metals_display, "820 oz");
        assert_eq!(view.sentiment.value, 72);

        assert_eq!(view.liquidations[0].since, "22m");
        assert_eq!(view.liquidations[0].notional_display, "$86.4M");
    }

    #[test]
    fn test_indicator_display_per_format() {
        let now = Utc::now();
        let view = DeckView::build(&initial_desk(now), now);
        let by_short = |s: &str| {
            view.indicators
                .iter()
                .find(|i| i.indicator.shorthand == s)
                .map(|i| i.value_display.clone())
        };
        assert_eq!(by_short("EMA(50/200)").as_deref(), Some("+1.14%"));
        assert_eq!(by_short("ADX 37").as_deref(), Some("37"));
        assert_eq!(by_short("VWAP").as_deref(), Some("$48.8K"));
    }

    #[test]
    fn test_flat_position_tone() {
        let now = Utc::now();
        let mut desk = initial_desk(now);
        desk.positions[0].size = 0.0;
        let view = PositionView::build(&desk.positions[0]);
        assert_eq!(view.tone, Tone::Flat);
        assert!(view.flat);
    }

    #[test]
    fn test_position_view_serializes_flat() {
        let now = Utc::now();
        let desk = initial_desk(now);
        let json = serde_json::to_value(PositionView::build(&desk.positions[0]))
            .expect("serializable");
        assert_eq!(json["id"], "btc-core");
        assert_eq!(json["direction"], "Long");
        assert!(json["stop_price"].is_number());
    }
}
