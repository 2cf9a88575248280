//! # engine::simulation
//!
//! Periodic market jobs.  Each job is a tokio interval task that dispatches
//! one action into the desk store, so timer-driven changes go through the
//! same queue (and the same ordering) as button presses.
//!
//! | Job          | Action              | Default period |
//! |--------------|---------------------|----------------|
//! | marks        | `DriftMarks`        | 4.8 s          |
//! | indicators   | `DriftIndicators`   | 6.2 s          |
//! | sentiment    | `DriftSentiment`    | 8.8 s          |
//! | liquidations | `SpawnLiquidation`  | 15 s           |

use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::config::DeskConfig;
use crate::engine::reducer::Action;
use crate::engine::store::DeskStore;

/// Owns the running jobs.  Dropping the handle does not stop them; call
/// [`shutdown`](Self::shutdown).
pub struct SimulationHandle {
    jobs: Vec<(&'static str, JoinHandle<()>)>,
}

impl SimulationHandle {
    /// Starts every job.  The first tick of each fires one full period after
    /// start, never immediately.
    pub fn start(store: &DeskStore, config: &DeskConfig) -> Self {
        let jobs = vec![
            ("marks", spawn_job(store.clone(), config.mark_interval, || Action::DriftMarks)),
            (
                "indicators",
                spawn_job(store.clone(), config.indicator_interval, || Action::DriftIndicators),
            ),
            (
                "sentiment",
                spawn_job(store.clone(), config.sentiment_interval, || Action::DriftSentiment),
            ),
            (
                "liquidations",
                spawn_job(store.clone(), config.liquidation_interval, || {
                    Action::SpawnLiquidation { at: Utc::now() }
                }),
            ),
        ];

        info!(jobs = jobs.len(), "Simulation started");
        Self { jobs }
    }

    pub fn job_names(&self) -> Vec<&'static str> {
        self.jobs.iter().map(|(name, _)| *name).collect()
    }

    /// Aborts every job.  Actions already queued still commit.
    pub fn shutdown(self) {
        for (name, job) in self.jobs {
            job.abort();
            info!(job = name, "Simulation job stopped");
        }
    }
}

fn spawn_job<F>(store: DeskStore, period: Duration, make_action: F) -> JoinHandle<()>
where
    F: Fn() -> Action + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if store.send(make_action()).await.is_err() {
                warn!("Desk store closed, simulation job exiting");
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::initial_desk;
    use rand::{rngs::StdRng, SeedableRng};

    fn make_config(ms: u64) -> DeskConfig {
        DeskConfig {
            mark_interval: Duration::from_millis(ms),
            indicator_interval: Duration::from_millis(ms),
            sentiment_interval: Duration::from_millis(ms),
            liquidation_interval: Duration::from_millis(ms),
            ..DeskConfig::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_jobs_commit_on_schedule() {
        let store = DeskStore::spawn(initial_desk(Utc::now()), StdRng::seed_from_u64(3), 32);
        let sim = SimulationHandle::start(&store, &make_config(1_000));
        assert_eq!(sim.job_names(), vec!["marks", "indicators", "sentiment", "liquidations"]);

        // Nothing fires before the first full period.
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(store.snapshot().revision, 0);

        let mut watch = store.watch();
        tokio::time::sleep(Duration::from_millis(600)).await;
        while watch.borrow_and_update().revision < 4 {
            watch.changed().await.expect("store alive");
        }
        let snap = store.snapshot();
        assert_eq!(snap.revision, 4);
        assert_eq!(snap.liquidations.len(), 4);

        sim.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_further_commits() {
        let store = DeskStore::spawn(initial_desk(Utc::now()), StdRng::seed_from_u64(3), 32);
        let sim = SimulationHandle::start(&store, &make_config(1_000));
        sim.shutdown();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(store.snapshot().revision, 0);
    }
}
