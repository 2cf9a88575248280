//! # view::page
//!
//! Server-rendered HTML for the deck.  The full page is rendered once per
//! `GET /`; the mutable part (`#deck`) is re-fetched from `/fragments/deck`
//! whenever the monitor socket reports a commit.
//!
//! - `css.rs`: stylesheet
//! - `js.rs`: panel actions and live refresh
//!
//! Everything interpolated from state goes through [`html_escape`].

mod css;
mod js;

use std::fmt::Write as _;

use super::{
    format::{format_currency, format_percent},
    sparkline, CalendarView, CatalogView, DeckView, IndicatorView, LiquidationView, PositionView,
};
use crate::engine::panel::{STOP_RANGE, TARGET_RANGE};
use crate::models::{OutboundLink, StrategyPillar};

const LONG_STROKE: &str = "#34d399";
const SHORT_STROKE: &str = "#fb7185";

/// Full document: hero, live deck, calendar, pillars, CTA.
pub fn render_page(deck: &DeckView, catalog: &CatalogView) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>QuantDeck · BTC · ETH · GOLD execution deck</title>
    <style>
{css}
    </style>
</head>
<body>
<div class="container">
{hero}
<main id="deck">
{deck}
</main>
{calendar}
{pillars}
{cta}
</div>
    <script>
{js}
    </script>
</body>
</html>"#,
        css = css::STYLES,
        hero = render_hero(deck, &catalog.launch),
        deck = render_deck(deck),
        calendar = render_calendar(&catalog.calendar),
        pillars = render_pillars(&catalog.pillars),
        cta = render_cta(&catalog.deployment),
        js = js::SCRIPT,
    )
}

/// The `#deck` body: positions, indicators, gauge and liquidation feed.
pub fn render_deck(deck: &DeckView) -> String {
    let positions: String = deck.positions.iter().map(render_position).collect();
    let indicators: String = deck.indicators.iter().map(render_indicator).collect();
    let liquidations: String = deck.liquidations.iter().map(render_liquidation).collect();

    format!(
        r#"<section class="deck" data-revision="{revision}">
  <div class="stack">
    <h2>{{portfolio}} Tactical Control · Manage size, stops, targets, flips</h2>
    {positions}
  </div>
  <div class="stack">
    <div class="card">
      <h2>{{indicators}} Intelligence Layer</h2>
      <div class="stack">{indicators}</div>
    </div>
    {gauge}
    <div class="card">
      <h2>{{liquidations}} Snapback Radar</h2>
      {liquidations}
    </div>
  </div>
</section>"#,
        revision = deck.revision,
        gauge = render_gauge(deck),
    )
}

// ─── Hero ─────────────────────────────────────────────────────────────────────

fn render_hero(deck: &DeckView, launch: &OutboundLink) -> String {
    let p = &deck.portfolio;
    let tone = super::Tone::of(p.stats.pnl).css_class();
    format!(
        r#"<header class="hero">
  <div>
    <span class="eyebrow">QUANT Strategy</span> <span class="dim">AI Agent Control • 98% hit-rate</span>
    <h1>Award-winning BTC · ETH · GOLD execution deck with autonomous risk, sentiment, and catalyst alignment.</h1>
    <p class="dim">Master the trend, capture the catalyst, and let consensus filter the rest.
    Automations move stops, scale exposure, and flip bias instantly.</p>
    <div class="actions">
      {launch}
      <button type="button" class="btn inert">Watch live execution</button>
    </div>
  </div>
  <div class="card">
    <h2>Portfolio Pulse</h2>
    <p class="dim">Realized + Unrealized</p>
    <div><span class="pulse-figure {tone}">{pnl}</span> <span class="{tone}">{pnl_pct}</span></div>
    <div class="pulse-grid">
      <div><span class="dim">Crypto Exposure</span><p>{crypto}</p></div>
      <div><span class="dim">Metals Hedge</span><p>{metals}</p></div>
    </div>
    <p class="dim">Precision trend hierarchy live · Stops auto-sync w/ volatility</p>
  </div>
</header>"#,
        launch = render_link(launch, "btn primary"),
        pnl = html_escape(&p.pnl_display),
        pnl_pct = html_escape(&p.pnl_percent_display),
        crypto = html_escape(&p.crypto_display),
        metals = html_escape(&p.metals_display),
    )
}

// ─── Position Cards ───────────────────────────────────────────────────────────

fn render_position(view: &PositionView) -> String {
    let p = &view.position;
    let id = html_escape(&p.id);
    let is_long = p.direction.is_long();
    let tone = view.tone.css_class();

    let chart = match &view.sparkline {
        Some(s) => format!(
            r#"<svg viewBox="0 0 {w} {h}" width="{w}" height="{h}" aria-hidden="true"><path d="{area}" fill="{stroke}" fill-opacity="0.12"/><path d="{line}" fill="none" stroke="{stroke}" stroke-width="2"/></svg>"#,
            w = sparkline::WIDTH,
            h = sparkline::HEIGHT,
            area = s.area,
            line = s.line,
            stroke = if is_long { LONG_STROKE } else { SHORT_STROKE },
        ),
        None => String::new(),
    };

    format!(
        r#"<article class="card" id="position-{id}">
  <div class="position-head">
    <div>
      <div class="chips">
        <strong>{asset}</strong>
        <span class="chip {dir_class}">{direction:?}</span>
        <span class="chip">{class:?}</span>{flat}
      </div>
      <p class="dim">Size <strong>{size}</strong></p>
      <p class="dim">Entry {entry} · Mark {mark}</p>
      <p class="dim">Confidence {confidence:.0}% · Conviction {conviction:?}</p>
    </div>
    <div>
      {chart}
      <p class="pulse-figure {tone}">{pnl}</p>
      <p class="{tone}">{pnl_pct}</p>
    </div>
  </div>
  <div class="controls">
    <div class="control">
      <div class="control-row"><span>Stop control</span><span>{stop_price}</span></div>
      <div class="control-row"><span>{stop_pct}</span></div>
      <input type="range" min="{stop_min}" max="{stop_max}" step="0.1" value="{stop_value}" data-id="{id}" data-kind="stop">
      <div class="button-row">
        <button type="button" class="btn" data-action="stop" data-nudge="tighten" data-id="{id}">Tighten</button>
        <button type="button" class="btn" data-action="stop" data-nudge="widen" data-id="{id}">Widen</button>
      </div>
    </div>
    <div class="control">
      <div class="control-row"><span>Take profit</span><span>{target_price}</span></div>
      <div class="control-row"><span>{tp_pct}</span></div>
      <input type="range" min="{tp_min}" max="{tp_max}" step="0.2" value="{tp_value}" data-id="{id}" data-kind="target">
      <div class="button-row">
        <button type="button" class="btn" data-action="target" data-nudge="bank-sooner" data-id="{id}">Bank sooner</button>
        <button type="button" class="btn" data-action="target" data-nudge="stretch" data-id="{id}">Stretch target</button>
      </div>
    </div>
  </div>
  <div class="button-row">
    <button type="button" class="btn" data-action="close" data-ratio="0.25" data-id="{id}">Close 25%</button>
    <button type="button" class="btn" data-action="close" data-ratio="0.5" data-id="{id}">Close 50%</button>
    <button type="button" class="btn" data-action="close" data-ratio="1" data-id="{id}">Flat position</button>
    <button type="button" class="btn" data-action="flip" data-id="{id}">Flip bias</button>
  </div>
</article>"#,
        asset = html_escape(&p.asset),
        dir_class = if is_long { "long" } else { "short" },
        direction = p.direction,
        class = p.asset_class,
        flat = if view.flat { r#" <span class="chip">Flat</span>"# } else { "" },
        size = html_escape(&view.size_display),
        entry = format_currency(p.entry),
        mark = format_currency(p.mark),
        confidence = p.confidence * 100.0,
        conviction = p.conviction,
        pnl = format_currency(view.pnl),
        pnl_pct = format_percent(view.pnl_percent, 2),
        stop_price = format_currency(view.stop_price),
        stop_pct = format_percent(p.stop_percent, 2),
        stop_min = STOP_RANGE.0,
        stop_max = STOP_RANGE.1,
        stop_value = p.stop_percent,
        target_price = format_currency(view.target_price),
        tp_pct = format_percent(p.tp_percent, 2),
        tp_min = TARGET_RANGE.0,
        tp_max = TARGET_RANGE.1,
        tp_value = p.tp_percent,
    )
}

// ─── Indicators & Gauge ───────────────────────────────────────────────────────

fn render_indicator(view: &IndicatorView) -> String {
    let i = &view.indicator;
    let bias = format!("{:?}", i.bias).to_lowercase();
    let change_tone = if i.change >= 0.0 { "tone-up" } else { "tone-down" };
    format!(
        r#"<div class="indicator">
  <div class="control-row"><span>{shorthand}</span><span class="bias-{bias}">{bias_label:?}</span></div>
  <div class="indicator-value">{value}</div>
  <div class="{change_tone}">{change}</div>
  <p class="dim">{description}</p>
</div>"#,
        shorthand = html_escape(&i.shorthand),
        bias_label = i.bias,
        value = html_escape(&view.value_display),
        change = html_escape(&view.change_display),
        description = html_escape(&i.description),
    )
}

fn render_gauge(deck: &DeckView) -> String {
    let g = &deck.sentiment;
    format!(
        r#"<div class="card {accent}">
  <h2>Market Sentiment · Fear &amp; Greed Index</h2>
  <div class="gauge">
    <div class="gauge-arc"></div>
    <div class="gauge-needle" style="transform: rotate({angle}deg)"></div>
    <div class="gauge-readout"><strong>{value}</strong><span class="dim">{label}</span></div>
  </div>
  <p class="dim">Low readings = accumulation mode. High readings = throttle leverage and protect unrealized P&amp;L while the crowd chases.</p>
</div>"#,
        accent = g.accent.css_class(),
        angle = g.angle,
        value = g.value,
        label = g.label,
    )
}

// ─── Feeds ────────────────────────────────────────────────────────────────────

fn render_liquidation(view: &LiquidationView) -> String {
    let s = &view.spike;
    format!(
        r#"<div class="row">
  <div>
    <div class="chips"><strong>{symbol}</strong><span class="dim">{exchange}</span><span class="intensity-{intensity_class}">{intensity:?}</span></div>
    <p class="dim">{reaction}</p>
  </div>
  <div class="row-meta">
    <div><strong>{notional}</strong></div>
    <div>{side:?} cleared</div>
    <div>{since} ago</div>
  </div>
</div>"#,
        symbol = html_escape(&s.symbol),
        exchange = html_escape(&s.exchange),
        intensity_class = format!("{:?}", s.intensity).to_lowercase(),
        intensity = s.intensity,
        reaction = html_escape(&s.reaction),
        notional = html_escape(&view.notional_display),
        side = s.side,
        since = html_escape(&view.since),
    )
}

fn render_calendar(events: &[CalendarView]) -> String {
    let mut cards = String::new();
    for view in events {
        let e = &view.event;
        let _ = write!(
            cards,
            r#"<div class="card">
  <div class="control-row"><h3>{title}</h3><span class="impact-{impact_class}">{impact:?}</span></div>
  <p class="eyebrow">{market}</p>
  <div class="control-row dim"><span>In {until}</span><span>{when}</span></div>
  <p class="dim">{play}</p>
</div>"#,
            title = html_escape(&e.title),
            impact_class = format!("{:?}", e.impact).to_lowercase(),
            impact = e.impact,
            market = html_escape(&e.market),
            until = html_escape(&view.until),
            when = html_escape(&view.when_display),
            play = html_escape(&e.play),
        );
    }
    format!(
        r#"<section>
  <h2>{{Market_calendar}} Catalyst Map · Pause high risk pairs automatically pre-event</h2>
  <div class="grid-4">{cards}</div>
</section>"#
    )
}

// ─── Static Sections ──────────────────────────────────────────────────────────

fn render_pillars(pillars: &[StrategyPillar]) -> String {
    let mut cards = String::new();
    for pillar in pillars {
        let highlights: String = pillar
            .highlights
            .iter()
            .map(|h| format!("<li>✦ {}</li>", html_escape(h)))
            .collect();
        let _ = write!(
            cards,
            r#"<article class="card pillar"><div class="eyebrow">{tag}</div><h3>{title}</h3><p class="dim">{description}</p><ul>{highlights}</ul></article>"#,
            tag = html_escape(&pillar.tag),
            title = html_escape(&pillar.title),
            description = html_escape(&pillar.description),
        );
    }
    format!(r#"<section class="grid-3">{cards}</section>"#)
}

fn render_cta(deployment: &OutboundLink) -> String {
    format!(
        r#"<section class="card cta">
  <div>
    <h3>Deploy the 1000x-awarded AI strategy stack with a single click.</h3>
    <p class="dim">No API keys, no manual wiring. The agent executes playbooks, syncs risk overlays, and keeps you locked on the highest-probability side of BTC, GOLDUSD, and ETH.</p>
  </div>
  <div class="actions">
    {link}
    <button type="button" class="btn inert">Sync with my desk</button>
  </div>
</section>"#,
        link = render_link(deployment, "btn primary"),
    )
}

fn render_link(link: &OutboundLink, class: &str) -> String {
    let target = if link.external {
        r#" target="_blank" rel="noreferrer""#
    } else {
        ""
    };
    format!(
        r#"<a class="{class}" href="{href}"{target}>{label} ↗</a>"#,
        href = html_escape(&link.href),
        label = html_escape(&link.label),
    )
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{catalog, initial_desk};
    use chrono::Utc;

    fn make_views() -> (DeckView, CatalogView) {
        let now = Utc::now();
        (
            DeckView::build(&initial_desk(now), now),
            CatalogView::build(&catalog(now), now),
        )
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#x27;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_page_contains_every_section() {
        let (deck, catalog) = make_views();
        let html = render_page(&deck, &catalog);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Portfolio Pulse"));
        assert!(html.contains("Intelligence Layer"));
        assert!(html.contains("Snapback Radar"));
        assert!(html.contains("Catalyst Map"));
        assert!(html.contains("US CPI Release"));
        assert!(html.contains("Launch instantly on Puter"));
        assert!(html.contains(r#"href="https://puter.com" target="_blank""#));
        assert!(html.contains("Sync with my desk"));
        assert!(html.contains("/ws/monitor"));
    }

    #[test]
    fn test_position_card_controls() {
        let (deck, _) = make_views();
        let html = render_deck(&deck);

        assert!(html.contains(r#"id="position-btc-core""#));
        assert!(html.contains(r#"data-nudge="bank-sooner" data-id="eth-satellite""#));
        assert!(html.contains(r#"min="0.4" max="12" step="0.1""#));
        assert!(html.contains(r#"min="1.2" max="28" step="0.2""#));
        // Gold is short: red stroke.
        assert!(html.contains(SHORT_STROKE));
        assert!(html.contains("Longs cleared"));
        assert!(html.contains("22m ago"));
    }

    #[test]
    fn test_inert_buttons_have_no_action() {
        let (deck, catalog) = make_views();
        let html = render_page(&deck, &catalog);
        let inert = html
            .lines()
            .filter(|l| l.contains("btn inert"))
            .collect::<Vec<_>>();
        assert_eq!(inert.len(), 2);
        assert!(inert.iter().all(|l| !l.contains("data-action")));
    }

    #[test]
    fn test_deck_fragment_carries_revision() {
        let (mut deck, _) = make_views();
        deck.revision = 17;
        assert!(render_deck(&deck).contains(r#"data-revision="17""#));
    }

    #[test]
    fn test_script_holds_refresh_only_while_slider_is_pressed() {
        let script = js::SCRIPT;
        // Focus stays on a released slider, so it cannot gate the swap.
        assert!(!script.contains("activeElement"));
        assert!(script.contains("addEventListener('pointerdown'"));
        assert!(script.contains("addEventListener('pointerup', releaseSlider)"));
        assert!(script.contains("addEventListener('pointercancel', releaseSlider)"));
    }

    #[test]
    fn test_script_refetches_after_events_during_a_fetch() {
        let script = js::SCRIPT;
        let guard = script.find("if (refreshing || dragging)").expect("busy guard");
        let marked = script[guard..].find("pending = true").expect("event remembered");
        let finally = script.find("finally {").expect("finally block");
        assert!(guard + marked < finally);
        assert!(script[finally..].contains("if (pending && !dragging) refreshDeck();"));
    }
}
