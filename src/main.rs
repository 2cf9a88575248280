//! # QuantDeck: Simulated Trading Execution Deck
//!
//! ## Architecture Overview
//!
//! ```text
//!  ┌──────────────┐  POST /api/positions/:id/*   ┌──────────────────────────┐
//!  │  Deck page   │ ───────────────────────────▶ │ DeskStore (actor)        │
//!  │  (browser)   │                              │ ├─ mpsc  Action queue    │
//!  └──────────────┘                              │ ├─ reduce → revision+1   │
//!         ▲                                      │ ├─ watch Arc<DeskState>  │
//!         │  GET /fragments/deck                 │ └─ broadcast WsEvent ──┐ │
//!         │                                      └────────────────────────┼─┘
//!  ┌──────┴───────┐  ws://host/ws/monitor  ◀──────────────────────────────┘
//!  │  Monitor     │
//!  └──────────────┘       ▲ DriftMarks / DriftIndicators / DriftSentiment /
//!                         │ SpawnLiquidation
//!                  ┌──────┴───────┐
//!                  │  Simulation  │  tokio interval jobs
//!                  └──────────────┘
//! ```
//!
//! ## Environment Variables
//!
//! | Variable                       | Default          | Description                   |
//! |--------------------------------|------------------|-------------------------------|
//! | `BIND_ADDR`                    | `0.0.0.0:3000`   | Address Axum listens on       |
//! | `DESK_MARK_INTERVAL_MS`        | `4800`           | Mark drift period             |
//! | `DESK_INDICATOR_INTERVAL_MS`   | `6200`           | Indicator drift period        |
//! | `DESK_SENTIMENT_INTERVAL_MS`   | `8800`           | Sentiment drift period        |
//! | `DESK_LIQUIDATION_INTERVAL_MS` | `15000`          | Synthetic liquidation period  |
//! | `DESK_SIMULATION`              | `true`           | `false`/`0`/`no`/`off` freezes |
//! | `DESK_RNG_SEED`                | unset            | Reproducible drift noise      |
//! | `DESK_QUEUE_DEPTH`             | `256`            | Store action queue bound      |
//! | `RUST_LOG`                     | `quantdeck=debug`| Tracing filter                |

use std::net::SocketAddr;

use anyhow::Context;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod engine;
mod error;
mod events;
mod models;
mod routes;
mod seed;
mod state;
mod view;

use config::DeskConfig;
use engine::simulation::SimulationHandle;
use state::build_state;

// ─── Entry Point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Load .env ──────────────────────────────────────────────────────────
    dotenvy::dotenv().ok();

    // ── 2. Structured logging ─────────────────────────────────────────────────
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("quantdeck=debug".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    info!(r#"

  ╔═══════════════════════════════════════════════════════╗
  ║           QUANTDECK — Execution Deck                  ║
  ║  Positions · Indicators · Sentiment · Liquidations    ║
  ╚═══════════════════════════════════════════════════════╝"#);

    // ── 3. Config & shared state ──────────────────────────────────────────────
    let config = DeskConfig::from_env().context("invalid desk configuration")?;
    info!(?config, "Desk configuration loaded");
    let simulate = config.simulation;
    let state = build_state(config);

    // ── 4. Simulation jobs ────────────────────────────────────────────────────
    let simulation = if simulate {
        let handle = SimulationHandle::start(&state.store, &state.config);
        info!(jobs = ?handle.job_names(), "Market simulation running");
        Some(handle)
    } else {
        info!("Simulation disabled, market frozen at seed values");
        None
    };

    // ── 5. CORS ───────────────────────────────────────────────────────────────
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // ── 6. Router ─────────────────────────────────────────────────────────────
    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // ── 7. Bind & Serve ───────────────────────────────────────────────────────
    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()
        .context("BIND_ADDR must be a socket address")?;

    info!(?addr, "🚀 QuantDeck server starting");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // ── 8. Teardown ───────────────────────────────────────────────────────────
    if let Some(simulation) = simulation {
        simulation.shutdown();
    }
    info!("👋 QuantDeck stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
