//! # state
//!
//! Shared application state injected into every Axum handler.
//!
//! * `store` is the only path to the mutable deck.  Handlers dispatch actions
//!   into it and read `Arc<DeskState>` snapshots back out.
//! * `catalog` is immutable after start-up (calendar, pillars, links).

use std::sync::Arc;

use chrono::Utc;
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

use crate::config::DeskConfig;
use crate::engine::store::DeskStore;
use crate::models::Catalog;
use crate::seed;

// ─── AppState ─────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct AppState {
    pub store: DeskStore,
    pub catalog: Arc<Catalog>,
    pub config: Arc<DeskConfig>,
}

pub type SharedState = Arc<AppState>;

/// Seeds the deck, spawns the store actor and wraps everything in an `Arc`
/// ready for the router.  Must run inside a tokio runtime.
pub fn build_state(config: DeskConfig) -> SharedState {
    let now = Utc::now();
    let rng = match config.rng_seed {
        Some(seed) => {
            info!(seed, "Drift RNG seeded");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    Arc::new(AppState {
        store: DeskStore::spawn(seed::initial_desk(now), rng, config.queue_depth),
        catalog: Arc::new(seed::catalog(now)),
        config: Arc::new(config),
    })
}
