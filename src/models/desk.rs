//! # models::desk
//!
//! [`DeskState`]: the four mutable slices of the deck.  Owned exclusively by
//! the store actor; everyone else sees an `Arc<DeskState>` snapshot.

use serde::Serialize;

use crate::models::{Indicator, LiquidationFeed, Position};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeskState {
    /// Bumped once per committed action.
    pub revision: u64,
    pub positions: Vec<Position>,
    pub indicators: Vec<Indicator>,
    /// Fear & greed score, kept inside [12, 92] by the drift job.
    pub sentiment: i32,
    pub liquidations: LiquidationFeed,
}

impl DeskState {
    pub fn position(&self, id: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.id == id)
    }
}
