//! # models::indicator
//!
//! Technical-indicator cards.  The `bias` of a card is seeded once and never
//! derived from its value; the drift job only reads it to lean the noise.

use serde::{Deserialize, Serialize};

/// How the card value is displayed and which bounds the drift job enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorFormat {
    Price,
    Percent,
    Index,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

impl Bias {
    /// +1 / −1 / 0 lean applied to indicator noise.
    #[inline]
    pub fn weight(self) -> f64 {
        match self {
            Bias::Bullish => 1.0,
            Bias::Bearish => -1.0,
            Bias::Neutral => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub name: String,
    pub shorthand: String,
    pub value: f64,
    pub format: IndicatorFormat,
    /// Change delta shown under the value.
    pub change: f64,
    pub bias: Bias,
    pub description: String,
}
