//! # view::gauge
//!
//! Fear & greed gauge: the needle sweeps −90° (0) to +90° (100).

use serde::Serialize;

use crate::engine::metrics::{sentiment_label, SentimentLabel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Accent {
    Bullish,
    Bearish,
    Neutral,
}

impl Accent {
    pub fn css_class(self) -> &'static str {
        match self {
            Accent::Bullish => "accent-bull",
            Accent::Bearish => "accent-bear",
            Accent::Neutral => "accent-neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Gauge {
    /// Score clamped to [0, 100].
    pub value: i32,
    /// Needle rotation in degrees.
    pub angle: f64,
    pub label: SentimentLabel,
    pub accent: Accent,
}

pub fn gauge(score: i32) -> Gauge {
    let value = score.clamp(0, 100);
    let accent = if value >= 55 {
        Accent::Bullish
    } else if value <= 30 {
        Accent::Bearish
    } else {
        Accent::Neutral
    };

    Gauge {
        value,
        angle: f64::from(value) / 100.0 * 180.0 - 90.0,
        label: sentiment_label(value),
        accent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needle_angle() {
        assert_eq!(gauge(0).angle, -90.0);
        assert_eq!(gauge(50).angle, 0.0);
        assert_eq!(gauge(100).angle, 90.0);
    }

    #[test]
    fn test_display_clamp() {
        assert_eq!(gauge(140).value, 100);
        assert_eq!(gauge(-3).value, 0);
    }

    #[test]
    fn test_accent_and_label() {
        let g = gauge(72);
        assert_eq!(g.accent, Accent::Bullish);
        assert_eq!(g.label, SentimentLabel::Greed);
        assert_eq!(gauge(30).accent, Accent::Bearish);
        assert_eq!(gauge(45).accent, Accent::Neutral);
    }
}
