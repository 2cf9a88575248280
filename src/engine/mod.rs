//! Desk engine: pure metrics and panel maths, the drift noise, the reducer,
//! the store actor that serialises every change, and the simulation timers.

pub mod drift;
pub mod metrics;
pub mod panel;
pub mod reducer;
pub mod simulation;
pub mod store;
