//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs basic result info.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, response::IntoResponse, Json};
use tracing::{info, instrument, warn};

use crate::domain::{DailyPuzzle, ScoreResult};
use crate::error::{AppError, AppResult};
use crate::protocol::{CheckIn, HealthOut};
use crate::scoring::score;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
    Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_daily(State(state): State<Arc<AppState>>) -> AppResult<Json<DailyPuzzle>> {
    match state.today_puzzle().await {
        Ok(p) => {
            info!(target: "puzzle", id = %p.id, date = %p.date, "HTTP daily puzzle served");
            Ok(Json(p))
        }
        Err(e) => {
            warn!(target: "puzzle", today = %state.clock.today(), "HTTP daily puzzle missing");
            Err(e)
        }
    }
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_check(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CheckIn>, JsonRejection>,
) -> AppResult<Json<ScoreResult>> {
    let Json(body) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let puzzle = state.today_puzzle().await?;
    let assignment = body.into_assignment()?;
    let result = score(&puzzle, &assignment).inspect_err(|e| {
        warn!(target: "puzzle", id = %puzzle.id, error = %e, "HTTP check rejected");
    })?;
    info!(target: "puzzle", id = %puzzle.id, all_correct = result.all_correct, "HTTP check evaluated");
    Ok(Json(result))
}
