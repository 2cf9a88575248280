//! # engine::store
//!
//! The desk store actor.  One task owns the [`DeskState`] and applies
//! [`Action`]s strictly in arrival order from a bounded queue.  After every
//! committed change it
//!
//! 1. bumps `revision`,
//! 2. publishes an immutable `Arc<DeskState>` on a `watch` channel (pull), and
//! 3. broadcasts one serialized [`WsEvent`] (push).
//!
//! HTTP handlers and simulation jobs only ever hold a cloneable [`DeskStore`]
//! handle.  When the last handle is dropped the queue closes and the actor
//! exits.

use std::sync::Arc;

use rand::rngs::StdRng;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::{debug, info};

use crate::engine::reducer::{reduce, Action, Slice};
use crate::events::WsEvent;
use crate::models::DeskState;

/// Events buffered per monitor subscriber before it starts lagging.
const EVENT_BUFFER: usize = 256;

/// The actor task is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("desk store is closed")]
pub struct StoreClosed;

/// Result of one dispatched action.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// `snapshot` is exactly the state this action committed, even if later
    /// commits have already replaced it on the watch channel.
    Applied { slice: Slice, snapshot: Arc<DeskState> },
    /// Nothing matched (unknown position id).  State and revision untouched.
    Unchanged { revision: u64 },
}

impl Outcome {
    pub fn revision(&self) -> u64 {
        match self {
            Outcome::Applied { snapshot, .. } => snapshot.revision,
            Outcome::Unchanged { revision } => *revision,
        }
    }
}

struct Command {
    action: Action,
    ack: Option<oneshot::Sender<Outcome>>,
}

// ─── Handle ───────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DeskStore {
    tx: mpsc::Sender<Command>,
    snapshot_rx: watch::Receiver<Arc<DeskState>>,
    events_tx: broadcast::Sender<String>,
}

impl DeskStore {
    /// Starts the actor on the current tokio runtime.
    pub fn spawn(initial: DeskState, rng: StdRng, queue_depth: usize) -> Self {
        let (tx, rx) = mpsc::channel(queue_depth.max(1));
        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(initial.clone()));
        let (events_tx, _) = broadcast::channel(EVENT_BUFFER);

        tokio::spawn(run(rx, initial, rng, snapshot_tx, events_tx.clone()));

        Self {
            tx,
            snapshot_rx,
            events_tx,
        }
    }

    /// Queues `action` and waits until the actor has applied it.
    pub async fn dispatch(&self, action: Action) -> Result<Outcome, StoreClosed> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.tx
            .send(Command { action, ack: Some(ack_tx) })
            .await
            .map_err(|_| StoreClosed)?;
        ack_rx.await.map_err(|_| StoreClosed)
    }

    /// Queues `action` without waiting for it to be applied.
    pub async fn send(&self, action: Action) -> Result<(), StoreClosed> {
        self.tx
            .send(Command { action, ack: None })
            .await
            .map_err(|_| StoreClosed)
    }

    /// Latest committed state.
    pub fn snapshot(&self) -> Arc<DeskState> {
        self.snapshot_rx.borrow().clone()
    }

    /// Serialized [`WsEvent`]s, one per commit from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.events_tx.subscribe()
    }

    /// Change notifications for the committed state.
    #[cfg(test)]
    pub fn watch(&self) -> watch::Receiver<Arc<DeskState>> {
        self.snapshot_rx.clone()
    }
}

// ─── Actor ────────────────────────────────────────────────────────────────────

async fn run(
    mut rx: mpsc::Receiver<Command>,
    mut state: DeskState,
    mut rng: StdRng,
    snapshot_tx: watch::Sender<Arc<DeskState>>,
    events_tx: broadcast::Sender<String>,
) {
    info!(revision = state.revision, "Desk store started");

    while let Some(Command { action, ack }) = rx.recv().await {
        let kind = action.kind();
        let outcome = match reduce(&mut state, action, &mut rng) {
            Some(slice) => {
                state.revision += 1;
                let committed = Arc::new(state.clone());
                snapshot_tx.send_replace(Arc::clone(&committed));
                // Err only means nobody is listening.
                let _ = events_tx.send(WsEvent::committed(&state, slice, kind).to_json());
                debug!(action = kind, revision = state.revision, ?slice, "Committed");
                Outcome::Applied {
                    slice,
                    snapshot: committed,
                }
            }
            None => Outcome::Unchanged {
                revision: state.revision,
            },
        };

        if let Some(ack) = ack {
            let _ = ack.send(outcome);
        }
    }

    info!(revision = state.revision, "Desk store stopped");
}

// ─── Tests ────────────────────────────────────────────────────────────────────
