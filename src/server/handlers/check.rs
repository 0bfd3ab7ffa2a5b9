//! Single-domain check handler.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::super::types::{ApiState, CheckQuery, CheckResponse};
use super::error_response;
use crate::dns::DomainChecker;
use crate::error_handling::CheckError;

const CHECK_FAILED: &str = "Error checking domain records";

/// `GET /api/check-domain?domain=<d>`
///
/// 400 for a missing or malformed domain, 500 when the check itself fails.
pub async fn check_domain_handler<C: DomainChecker + 'static>(
    State(state): State<ApiState<C>>,
    Query(query): Query<CheckQuery>,
) -> Response {
    let Some(domain) = query.domain.filter(|d| !d.trim().is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, CheckError::EmptyDomain.to_string());
    };

    let checker = state.checker.clone();
    let task = tokio::spawn(async move { checker.check_domain(&domain).await });

    match task.await {
        Ok(Ok(result)) => (StatusCode::OK, Json(CheckResponse::from(result))).into_response(),
        Ok(Err(e)) if e.is_client_error() => error_response(StatusCode::BAD_REQUEST, e.to_string()),
        Ok(Err(e)) => {
            log::warn!("Domain check failed: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, CHECK_FAILED)
        }
        Err(e) => {
            log::error!("Domain check task failed: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, CHECK_FAILED)
        }
    }
}
