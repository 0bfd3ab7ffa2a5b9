//! Bulk check handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::super::types::ApiState;
use super::error_response;
use crate::dns::DomainChecker;

const BULK_BUSY: &str = "A bulk check is already running";

/// `POST /api/bulk` with a text body of domains.
///
/// Runs the whole job before answering; `/status` reports progress meanwhile.
/// Only one job runs at a time; a second request gets 409 until it finishes.
pub async fn bulk_handler<C: DomainChecker + 'static>(
    State(state): State<ApiState<C>>,
    body: String,
) -> Response {
    let progress = state.progress.clone();
    if !progress.try_start() {
        return error_response(StatusCode::CONFLICT, BULK_BUSY);
    }
    let outcome = state
        .bulk
        .run(&body, |job, _| progress.update(job))
        .await;
    progress.finish();

    match outcome {
        Ok(job) => (StatusCode::OK, Json(job.slots)).into_response(),
        Err(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
    }
}
