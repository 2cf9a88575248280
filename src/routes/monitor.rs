//! # routes::monitor
//!
//! Read side of the deck: the live WebSocket and the JSON snapshots.
//!
//! ## Endpoints
//!
//! | Method   | Path                | Description                                |
//! |----------|---------------------|--------------------------------------------|
//! | GET (WS) | `/ws/monitor`       | Snapshot on connect, then one event/commit |
//! | GET      | `/health`           | Liveness, revision, feed depth             |
//! | GET      | `/api/deck`         | Everything, with derived metrics           |
//! | GET      | `/api/positions`    | Positions + portfolio pulse                |
//! | GET      | `/api/indicators`   | Indicator cards                            |
//! | GET      | `/api/sentiment`    | Score, label, needle angle                 |
//! | GET      | `/api/liquidations` | Feed with "since" strings                  |
//! | GET      | `/api/calendar`     | Calendar, pillars and outbound links       |

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info};

use crate::{
    events::WsEvent,
    state::SharedState,
    view::{self, gauge::gauge, CatalogView, DeckView, PortfolioView},
};

// ─── WebSocket Handler ────────────────────────────────────────────────────────

/// Upgrade HTTP → WebSocket and stream desk events as JSON text frames.
pub async fn ws_monitor(
    ws: WebSocketUpgrade,
    State(state): State<SharedState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: SharedState) {
    // Subscribe before reading the snapshot so no commit falls in between.
    let mut rx = state.store.subscribe();
    let (mut sender, mut receiver) = socket.split();

    info!("🔌 Monitor client connected");

    let snapshot = WsEvent::Snapshot {
        desk: Box::new((*state.store.snapshot()).clone()),
    }
    .to_json();

    if sender.send(Message::Text(snapshot)).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(json_str) => {
                        if sender.send(Message::Text(json_str)).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        debug!("Monitor client lagged, skipped {n} events");
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            result = receiver.next() => {
                match result {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sender.send(Message::Pong(data)).await;
                    }
                    _ => {}
                }
            }
        }
    }

    info!("🔌 Monitor client disconnected");
}

// ─── REST Snapshots ───────────────────────────────────────────────────────────

/// GET /health
pub async fn health(State(state): State<SharedState>) -> impl IntoResponse {
    let snapshot = state.store.snapshot();
    let feed = &snapshot.liquidations;
    Json(json!({
        "ok":           true,
        "revision":     snapshot.revision,
        "simulation":   state.config.simulation,
        "liquidations": feed.len(),
        "latest_spike": feed.newest().map(|spike| spike.id.as_str()),
    }))
}

/// GET /api/deck
pub async fn get_deck(State(state): State<SharedState>) -> impl IntoResponse {
    let now = Utc::now();
    let deck = DeckView::build(&state.store.snapshot(), now);
    Json(json!({
        "ok":      true,
        "deck":    deck,
        "catalog": CatalogView::build(&state.catalog, now),
    }))
}

/// GET /api/positions
pub async fn get_positions(State(state): State<SharedState>) -> impl IntoResponse {
    let snapshot = state.store.snapshot();
    Json(json!({
        "ok":        true,
        "revision":  snapshot.revision,
        "portfolio": PortfolioView::build(&snapshot.positions),
        "positions": view::positions_view(&snapshot),
    }))
}

/// GET /api/indicators
pub async fn get_indicators(State(state): State<SharedState>) -> impl IntoResponse {
    let snapshot = state.store.snapshot();
    Json(json!({
        "ok":         true,
        "revision":   snapshot.revision,
        "indicators": view::indicators_view(&snapshot),
    }))
}

/// GET /api/sentiment
pub async fn get_sentiment(State(state): State<SharedState>) -> impl IntoResponse {
    let snapshot = state.store.snapshot();
    Json(json!({
        "ok":        true,
        "revision":  snapshot.revision,
        "sentiment": gauge(snapshot.sentiment),
    }))
}

/// GET /api/liquidations
pub async fn get_liquidations(State(state): State<SharedState>) -> impl IntoResponse {
    let snapshot = state.store.snapshot();
    Json(json!({
        "ok":           true,
        "revision":     snapshot.revision,
        "liquidations": view::liquidations_view(&snapshot, Utc::now()),
    }))
}

/// GET /api/calendar
pub async fn get_calendar(State(state): State<SharedState>) -> impl IntoResponse {
    Json(json!({
        "ok":      true,
        "catalog": CatalogView::build(&state.catalog, Utc::now()),
    }))
}
