//! # models::catalog
//!
//! Static page content: market calendar, strategy pillars and the outbound
//! links.  Built once at start-up and never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub market: String,
    pub impact: Impact,
    pub datetime: DateTime<Utc>,
    /// Playbook line shown under the event.
    pub play: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyPillar {
    pub tag: String,
    pub title: String,
    pub description: String,
    pub highlights: Vec<String>,
}

/// Navigational link to a third-party page.  Rendered, never called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundLink {
    pub label: String,
    pub href: String,
    /// Open in a new tab.
    pub external: bool,
}

/// Everything on the page that does not move.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub calendar: Vec<CalendarEvent>,
    pub pillars: Vec<StrategyPillar>,
    pub launch: OutboundLink,
    pub deployment: OutboundLink,
}
