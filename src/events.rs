//! # events
//!
//! Defines [`WsEvent`], every message the deck pushes to `/ws/monitor`
//! subscribers.
//!
//! Events travel over a `tokio::sync::broadcast::Sender<String>` already
//! serialized, so receivers never need `WsEvent: Clone` and a slow socket
//! only costs one string per event.

use serde::Serialize;

use crate::engine::reducer::Slice;
use crate::models::{DeskState, Indicator, LiquidationFeed, Position};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WsEvent {
    /// Sent once, right after a client connects.
    Snapshot {
        desk: Box<DeskState>,
    },

    /// A panel action or mark drift committed.
    PositionsUpdated {
        revision: u64,
        action: &'static str,
        positions: Vec<Position>,
    },

    IndicatorsUpdated {
        revision: u64,
        indicators: Vec<Indicator>,
    },

    SentimentUpdated {
        revision: u64,
        score: i32,
    },

    /// Newest spike first, at most five.
    LiquidationsUpdated {
        revision: u64,
        liquidations: LiquidationFeed,
    },
}

impl WsEvent {
    /// Event describing the `slice` that `action` just changed in `state`.
    pub fn committed(state: &DeskState, slice: Slice, action: &'static str) -> Self {
        let revision = state.revision;
        match slice {
            Slice::Positions => WsEvent::PositionsUpdated {
                revision,
                action,
                positions: state.positions.clone(),
            },
            Slice::Indicators => WsEvent::IndicatorsUpdated {
                revision,
                indicators: state.indicators.clone(),
            },
            Slice::Sentiment => WsEvent::SentimentUpdated {
                revision,
                score: state.sentiment,
            },
            Slice::Liquidations => WsEvent::LiquidationsUpdated {
                revision,
                liquidations: state.liquidations.clone(),
            },
        }
    }

    /// JSON text frame for the socket.
    #[inline]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"event":"SERIALIZATION_ERROR"}"#.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::initial_desk;
    use chrono::Utc;

    #[test]
    fn test_event_tag_and_revision() {
        let mut desk = initial_desk(Utc::now());
        desk.revision = 4;
        let json = WsEvent::committed(&desk, Slice::Sentiment, "drift_sentiment").to_json();
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["event"], "SENTIMENT_UPDATED");
        assert_eq!(value["revision"], 4);
        assert_eq!(value["score"], 72);
    }

    #[test]
    fn test_positions_event_names_action() {
        let desk = initial_desk(Utc::now());
        let json = WsEvent::committed(&desk, Slice::Positions, "flip").to_json();
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["event"], "POSITIONS_UPDATED");
        assert_eq!(value["action"], "flip");
        assert_eq!(value["positions"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn test_snapshot_carries_whole_desk() {
        let desk = initial_desk(Utc::now());
        let json = WsEvent::Snapshot { desk: Box::new(desk) }.to_json();
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["event"], "SNAPSHOT");
        assert_eq!(value["desk"]["liquidations"].as_array().map(Vec::len), Some(3));
    }
}
