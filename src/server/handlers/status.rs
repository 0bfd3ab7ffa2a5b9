//! JSON status handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::atomic::Ordering;

use super::super::types::{ApiState, StatusResponse};

/// Progress of the most recent bulk job.
pub async fn status_handler<C: Send + Sync + 'static>(State(state): State<ApiState<C>>) -> Response {
    let progress = &state.progress;
    let total = progress.total.load(Ordering::SeqCst);
    let completed = progress.completed.load(Ordering::SeqCst);
    let errored = progress.errored.load(Ordering::SeqCst);

    let attempted = completed + errored;
    let percentage = if total > 0 {
        (attempted as f64 / total as f64) * 100.0
    } else {
        0.0
    };

    let response = StatusResponse {
        total,
        completed,
        errored,
        pending: total.saturating_sub(attempted),
        percentage_complete: percentage,
        running: progress.running.load(Ordering::SeqCst),
    };

    (StatusCode::OK, Json(response)).into_response()
}
