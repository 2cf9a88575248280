//! # view::sparkline
//!
//! Turns a mark history into SVG path data for a 140×56 viewbox.  Values are
//! min/max normalised; a flat series draws along the bottom edge.

use serde::Serialize;

pub const WIDTH: f64 = 140.0;
pub const HEIGHT: f64 = 56.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sparkline {
    /// Stroke path: `M x,y L x,y …`
    pub line: String,
    /// `line` closed down to the bottom corners, for the gradient fill.
    pub area: String,
}

/// `None` for an empty series.
pub fn sparkline(data: impl IntoIterator<Item = f64>) -> Option<Sparkline> {
    let data: Vec<f64> = data.into_iter().collect();
    if data.is_empty() {
        return None;
    }

    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = if max - min == 0.0 { 1.0 } else { max - min };
    let last = (data.len() - 1).max(1) as f64;

    let line = data
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let x = i as f64 / last * WIDTH;
            let y = HEIGHT - (value - min) / range * HEIGHT;
            let cmd = if i == 0 { 'M' } else { 'L' };
            format!("{cmd}{x:.2},{y:.2}")
        })
        .collect::<Vec<_>>()
        .join(" ");
    let area = format!("{line} L{WIDTH},{HEIGHT} L0,{HEIGHT} Z");

    Some(Sparkline { line, area })
}
