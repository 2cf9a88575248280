//! # routes::desk
//!
//! Position panel actions.  Each handler validates its input, dispatches one
//! [`Action`] into the store and answers with the updated position.
//!
//! | Method | Path                               | Body / segment              |
//! |--------|------------------------------------|-----------------------------|
//! | POST   | `/api/positions/:id/stop`          | `{ "percent": f64 }`        |
//! | POST   | `/api/positions/:id/stop/:nudge`   | `tighten` \| `widen`        |
//! | POST   | `/api/positions/:id/target`        | `{ "percent": f64 }`        |
//! | POST   | `/api/positions/:id/target/:nudge` | `bank-sooner` \| `stretch`  |
//! | POST   | `/api/positions/:id/close`         | `{ "ratio": f64 }`, (0, 1]  |
//! | POST   | `/api/positions/:id/flip`          | none                        |

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::engine::panel::{StopNudge, TargetNudge};
use crate::engine::reducer::Action;
use crate::engine::store::Outcome;
use crate::error::AppError;
use crate::state::SharedState;
use crate::view::PositionView;

// ─── Request Bodies ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PercentBody {
    pub percent: f64,
}

#[derive(Debug, Deserialize)]
pub struct CloseBody {
    pub ratio: f64,
}

// ─── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/positions/:id/stop
pub async fn adjust_stop(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Result<Json<PercentBody>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let percent = finite_percent(body)?;
    info!(id = %id, percent, "Adjust stop");
    commit(&state, id, |id| Action::AdjustStop { id, percent }).await
}

/// POST /api/positions/:id/stop/:nudge
pub async fn nudge_stop(
    State(state): State<SharedState>,
    Path((id, nudge)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let nudge = match nudge.as_str() {
        "tighten" => StopNudge::Tighten,
        "widen" => StopNudge::Widen,
        other => {
            return Err(AppError::BadRequest(format!(
                "unknown stop nudge '{other}', use 'tighten' or 'widen'"
            )))
        }
    };
    info!(id = %id, ?nudge, "Nudge stop");
    commit(&state, id, |id| Action::NudgeStop { id, nudge }).await
}

/// POST /api/positions/:id/target
pub async fn adjust_target(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Result<Json<PercentBody>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let percent = finite_percent(body)?;
    info!(id = %id, percent, "Adjust target");
    commit(&state, id, |id| Action::AdjustTarget { id, percent }).await
}

/// POST /api/positions/:id/target/:nudge
pub async fn nudge_target(
    State(state): State<SharedState>,
    Path((id, nudge)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let nudge = match nudge.as_str() {
        "bank-sooner" => TargetNudge::BankSooner,
        "stretch" => TargetNudge::Stretch,
        other => {
            return Err(AppError::BadRequest(format!(
                "unknown target nudge '{other}', use 'bank-sooner' or 'stretch'"
            )))
        }
    };
    info!(id = %id, ?nudge, "Nudge target");
    commit(&state, id, |id| Action::NudgeTarget { id, nudge }).await
}

/// POST /api/positions/:id/close
pub async fn close_position(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Result<Json<CloseBody>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(CloseBody { ratio }) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    if !ratio.is_finite() || ratio <= 0.0 || ratio > 1.0 {
        return Err(AppError::BadRequest(format!(
            "ratio must be in (0, 1], got {ratio}"
        )));
    }
    info!(id = %id, ratio, "Close position");
    commit(&state, id, |id| Action::Close { id, ratio }).await
}

/// POST /api/positions/:id/flip
pub async fn flip_position(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    info!(id = %id, "Flip bias");
    commit(&state, id, |id| Action::Flip { id }).await
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn finite_percent(body: Result<Json<PercentBody>, JsonRejection>) -> Result<f64, AppError> {
    let Json(PercentBody { percent }) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    if !percent.is_finite() {
        return Err(AppError::BadRequest("percent must be a finite number".into()));
    }
    Ok(percent)
}

/// Dispatches the action built for `id` and answers with that position as it
/// stood at the committed revision.
async fn commit(
    state: &SharedState,
    id: String,
    action: impl FnOnce(String) -> Action,
) -> Result<Json<Value>, AppError> {
    match state.store.dispatch(action(id.clone())).await? {
        Outcome::Applied { snapshot, .. } => {
            let position = snapshot.position(&id).map(PositionView::build);
            Ok(Json(json!({
                "ok":       true,
                "revision": snapshot.revision,
                "position": position,
            })))
        }
        Outcome::Unchanged { .. } => Err(AppError::NotFound(format!("no position '{id}'"))),
    }
}
