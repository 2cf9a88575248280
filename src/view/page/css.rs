//! Deck stylesheet.  Dark glass theme driven by CSS custom properties.

pub const STYLES: &str = r"
* { box-sizing: border-box; margin: 0; padding: 0; }

:root {
    --bg: #05070d;
    --card: rgba(255, 255, 255, 0.04);
    --border: rgba(255, 255, 255, 0.08);
    --text: #e5e7eb;
    --text-dim: rgba(255, 255, 255, 0.5);
    --green: #34d399;
    --red: #fb7185;
    --amber: #fbbf24;
    --sky: #38bdf8;
    --violet: #a78bfa;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: radial-gradient(circle at top, #0f172a, var(--bg) 60%);
    color: var(--text);
    padding: 32px 20px;
    min-height: 100vh;
}

.container { max-width: 1240px; margin: 0 auto; display: grid; gap: 40px; }

.card {
    background: var(--card);
    border: 1px solid var(--border);
    border-radius: 24px;
    padding: 24px;
}

h1 { font-size: 2.6rem; line-height: 1.15; color: #fff; margin: 16px 0; }
h2 { font-size: 0.8rem; text-transform: uppercase; letter-spacing: 0.35rem; color: var(--text-dim); margin-bottom: 16px; }
h3 { color: #fff; font-size: 1.1rem; }
.dim { color: var(--text-dim); font-size: 0.85rem; }
.eyebrow { font-size: 0.75rem; text-transform: uppercase; letter-spacing: 0.3rem; color: var(--sky); }

/* Hero */
.hero { display: grid; grid-template-columns: 3fr 2fr; gap: 32px; align-items: start; }
.actions { display: flex; gap: 12px; flex-wrap: wrap; margin-top: 24px; }
.btn {
    display: inline-flex; align-items: center; gap: 8px;
    border-radius: 999px; border: 1px solid var(--border);
    background: rgba(255, 255, 255, 0.06); color: var(--text);
    padding: 8px 16px; font-size: 0.85rem; cursor: pointer; text-decoration: none;
}
.btn:hover { background: rgba(255, 255, 255, 0.12); }
.btn.primary { background: #fff; color: #05070d; font-weight: 600; }
.btn.inert { cursor: default; opacity: 0.7; }

.pulse-figure { font-size: 2.2rem; font-weight: 600; color: #fff; }
.pulse-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 12px; margin-top: 16px; }

/* Deck */
.deck { display: grid; grid-template-columns: 3fr 2fr; gap: 32px; }
.stack { display: grid; gap: 16px; }

.position-head { display: flex; justify-content: space-between; gap: 16px; }
.chips { display: flex; gap: 8px; align-items: center; }
.chip { border-radius: 999px; padding: 2px 10px; font-size: 0.75rem; background: rgba(255, 255, 255, 0.08); }
.chip.long { color: var(--green); }
.chip.short { color: var(--red); }
.controls { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; margin-top: 16px; }
.control { background: rgba(0, 0, 0, 0.25); border-radius: 16px; padding: 14px; }
.control-row { display: flex; justify-content: space-between; font-size: 0.8rem; }
.control input[type=range] { width: 100%; margin: 10px 0; }
.button-row { display: flex; gap: 8px; flex-wrap: wrap; margin-top: 12px; }

.tone-up { color: var(--green); }
.tone-down { color: var(--red); }
.tone-flat { color: var(--text-dim); }
.bias-bullish { color: var(--green); }
.bias-bearish { color: var(--red); }
.bias-neutral { color: var(--text-dim); }

.indicator { display: grid; gap: 6px; }
.indicator-value { font-size: 1.4rem; color: #fff; font-weight: 600; }

/* Gauge */
.gauge { position: relative; width: 220px; height: 120px; margin: 16px auto; overflow: hidden; }
.gauge-arc {
    position: absolute; inset: 0 0 -100px 0; border-radius: 50%;
    border: 14px solid rgba(255, 255, 255, 0.08);
}
.gauge-needle {
    position: absolute; left: 50%; bottom: 0; width: 2px; height: 100px;
    background: #fff; transform-origin: bottom center;
}
.gauge-readout { position: absolute; left: 0; right: 0; bottom: 0; text-align: center; }
.gauge-readout strong { font-size: 2rem; color: #fff; display: block; }
.accent-bull .gauge-arc { border-color: rgba(52, 211, 153, 0.35); }
.accent-bear .gauge-arc { border-color: rgba(251, 113, 133, 0.35); }
.accent-neutral .gauge-arc { border-color: rgba(167, 139, 250, 0.35); }

/* Feeds */
.row { display: flex; justify-content: space-between; gap: 12px; padding: 12px 0; border-bottom: 1px solid var(--border); }
.row:last-child { border-bottom: none; }
.row-meta { text-align: right; font-size: 0.8rem; color: var(--text-dim); }
.intensity-extreme { color: var(--red); }
.intensity-elevated { color: var(--amber); }
.intensity-moderate { color: var(--sky); }
.impact-high { color: var(--red); }
.impact-medium { color: var(--amber); }
.impact-low { color: var(--green); }

.grid-4 { display: grid; grid-template-columns: repeat(4, 1fr); gap: 16px; }
.grid-3 { display: grid; grid-template-columns: repeat(3, 1fr); gap: 16px; }
.pillar ul { list-style: none; margin-top: 12px; display: grid; gap: 6px; font-size: 0.85rem; }

.cta { display: flex; justify-content: space-between; align-items: center; gap: 24px; }

@media (max-width: 900px) {
    .hero, .deck, .cta { grid-template-columns: 1fr; display: grid; }
    .grid-4, .grid-3, .controls { grid-template-columns: 1fr; }
}
";
