//! Domain models shared across the entire QuantDeck service.

pub mod catalog;
pub mod desk;
pub mod indicator;
pub mod market;
pub mod position;

pub use catalog::{CalendarEvent, Catalog, Impact, OutboundLink, StrategyPillar};
pub use desk::DeskState;
pub use indicator::{Bias, Indicator, IndicatorFormat};
pub use market::{Intensity, LiquidationFeed, LiquidationSpike, Side};
pub use position::{AssetClass, Conviction, Direction, Position};
