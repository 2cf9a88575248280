//! HTTP surface of the deck.

pub mod desk;
pub mod monitor;
pub mod page;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::SharedState;
use desk::{adjust_stop, adjust_target, close_position, flip_position, nudge_stop, nudge_target};
use monitor::{
    get_calendar, get_deck, get_indicators, get_liquidations, get_positions, get_sentiment,
    health, ws_monitor,
};
use page::{deck_fragment, index};

/// All routes, state attached.  Middleware is layered on in `main`.
pub fn router(state: SharedState) -> Router {
    Router::new()
        // ── Page ──────────────────────────────────────────────────────────────
        .route("/",                                 get(index))
        .route("/fragments/deck",                   get(deck_fragment))
        // ── Monitor ───────────────────────────────────────────────────────────
        .route("/health",                           get(health))
        .route("/ws/monitor",                       get(ws_monitor))
        .route("/api/deck",                         get(get_deck))
        .route("/api/positions",                    get(get_positions))
        .route("/api/indicators",                   get(get_indicators))
        .route("/api/sentiment",                    get(get_sentiment))
        .route("/api/liquidations",                 get(get_liquidations))
        .route("/api/calendar",                     get(get_calendar))
        // ── Position Panel ────────────────────────────────────────────────────
        .route("/api/positions/:id/stop",           post(adjust_stop))
        .route("/api/positions/:id/stop/:nudge",    post(nudge_stop))
        .route("/api/positions/:id/target",         post(adjust_target))
        .route("/api/positions/:id/target/:nudge",  post(nudge_target))
        .route("/api/positions/:id/close",          post(close_position))
        .route("/api/positions/:id/flip",           post(flip_position))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeskConfig;
    use crate::state::build_state;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use crate::engine::reducer::Action;
    use crate::state::SharedState;
    use futures_util::StreamExt;
    use serde_json::Value;
    use std::time::Duration;
    use tokio::net::TcpStream;
    use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
    use tower::ServiceExt;

    type Monitor = WebSocketStream<MaybeTlsStream<TcpStream>>;

    fn make_state() -> SharedState {
        let config = DeskConfig {
            rng_seed: Some(7),
            ..DeskConfig::default()
        };
        build_state(config)
    }

    fn make_app() -> Router {
        router(make_state())
    }

    async fn next_event(socket: &mut Monitor) -> Value {
        let frame = tokio::time::timeout(Duration::from_secs(5), socket.next())
            .await
            .expect("frame within 5s")
            .expect("socket open")
            .expect("valid frame");
        serde_json::from_str(frame.to_text().expect("text frame")).expect("json frame")
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.expect("infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn post_empty(uri: &str) -> Request<Body> {
        Request::post(uri).body(Body::empty()).expect("request")
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).expect("request")
    }

    #[tokio::test]
    async fn test_health_reports_revision() {
        let app = make_app();
        let (status, body) = send(&app, get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["revision"], 0);
        assert_eq!(body["liquidations"], 3);
        assert_eq!(body["latest_spike"], "btc-n1");
    }

    #[tokio::test]
    async fn test_adjust_stop_clamps_and_commits() {
        let app = make_app();
        let (status, body) =
            send(&app, post_json("/api/positions/eth-satellite/stop", r#"{"percent":50}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["revision"], 1);
        assert_eq!(body["position"]["stop_percent"], 12.0);

        let (_, health) = send(&app, get_req("/health")).await;
        assert_eq!(health["revision"], 1);
    }

    #[tokio::test]
    async fn test_unknown_position_is_404() {
        let app = make_app();
        let (status, body) = send(&app, post_empty("/api/positions/doge/flip")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["ok"], false);

        let (_, health) = send(&app, get_req("/health")).await;
        assert_eq!(health["revision"], 0);
    }

    #[tokio::test]
    async fn test_close_ratio_validation() {
        let app = make_app();
        for bad in [r#"{"ratio":0}"#, r#"{"ratio":1.5}"#, r#"{"ratio":-0.25}"#, r#"{}"#] {
            let (status, body) =
                send(&app, post_json("/api/positions/btc-core/close", bad)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body {bad}");
            assert_eq!(body["ok"], false);
        }

        let (status, body) =
            send(&app, post_json("/api/positions/btc-core/close", r#"{"ratio":1}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["position"]["size"], 0.0);
        assert_eq!(body["position"]["conviction"], "Rebuilding");
    }

    #[tokio::test]
    async fn test_nudges() {
        let app = make_app();
        let (status, body) = send(&app, post_empty("/api/positions/btc-core/stop/tighten")).await;
        assert_eq!(status, StatusCode::OK);
        let stop = body["position"]["stop_percent"].as_f64().unwrap_or_default();
        assert!(stop > 1.7 && stop < 1.8, "tightened stop {stop}");

        let (status, _) = send(&app, post_empty("/api/positions/btc-core/target/bank-sooner")).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, post_empty("/api/positions/btc-core/stop/yolo")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_flip_reverses_direction() {
        let app = make_app();
        let (status, body) = send(&app, post_empty("/api/positions/gold-hedge/flip")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["position"]["direction"], "Long");
        assert_eq!(body["position"]["entry"], 2389.0);
    }

    #[tokio::test]
    async fn test_read_endpoints() {
        let app = make_app();

        let (_, positions) = send(&app, get_req("/api/positions")).await;
        assert_eq!(positions["positions"].as_array().map(Vec::len), Some(3));
        assert_eq!(positions["portfolio"]["metals_display"], "820 oz");

        let (_, indicators) = send(&app, get_req("/api/indicators")).await;
        assert_eq!(indicators["indicators"].as_array().map(Vec::len), Some(6));

        let (_, sentiment) = send(&app, get_req("/api/sentiment")).await;
        assert_eq!(sentiment["sentiment"]["value"], 72);
        assert_eq!(sentiment["sentiment"]["label"], "Greed");

        let (_, liquidations) = send(&app, get_req("/api/liquidations")).await;
        assert_eq!(liquidations["liquidations"][0]["id"], "btc-n1");

        let (_, calendar) = send(&app, get_req("/api/calendar")).await;
        assert_eq!(calendar["catalog"]["calendar"].as_array().map(Vec::len), Some(4));
        assert_eq!(calendar["catalog"]["launch"]["href"], "https://puter.com");

        let (status, deck) = send(&app, get_req("/api/deck")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deck["deck"]["revision"], 0);
    }

    #[tokio::test]
    async fn test_page_and_fragment_are_html() {
        let app = make_app();
        for uri in ["/", "/fragments/deck"] {
            let response = app.clone().oneshot(get_req(uri)).await.expect("infallible");
            assert_eq!(response.status(), StatusCode::OK);
            let content_type = response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            assert!(content_type.starts_with("text/html"), "{uri}: {content_type}");
            let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
            let html = String::from_utf8_lossy(&bytes);
            assert!(html.contains("position-btc-core"));
        }
    }

    #[tokio::test]
    async fn test_monitor_socket_sends_snapshot_then_commits() {
        let state = make_state();
        let app = router(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move { axum::serve(listener, app).await });

        let (mut socket, _) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws/monitor"))
            .await
            .expect("upgrade");

        let snapshot = next_event(&mut socket).await;
        assert_eq!(snapshot["event"], "SNAPSHOT");
        assert_eq!(snapshot["desk"]["revision"], 0);
        assert_eq!(snapshot["desk"]["positions"].as_array().map(Vec::len), Some(3));

        state
            .store
            .dispatch(Action::Flip { id: "btc-core".into() })
            .await
            .expect("store running");

        let update = next_event(&mut socket).await;
        assert_eq!(update["event"], "POSITIONS_UPDATED");
        assert_eq!(update["revision"], 1);
        assert_eq!(update["action"], "flip");
    }
}
