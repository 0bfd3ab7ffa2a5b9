//! Record analyzer handlers.

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::super::types::AnalyzeQuery;
use super::error_response;
use crate::parse::{analyze_dmarc_record, analyze_spf_record};

/// `GET /api/analyze?record=<r>`: explained DMARC tags.
pub async fn analyze_dmarc_handler(Query(query): Query<AnalyzeQuery>) -> Response {
    match analyze_dmarc_record(query.record.as_deref().unwrap_or("")) {
        Ok(tags) => (StatusCode::OK, Json(tags)).into_response(),
        Err(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
    }
}

/// `GET /api/analyze-spf?record=<r>`: explained SPF terms.
pub async fn analyze_spf_handler(Query(query): Query<AnalyzeQuery>) -> Response {
    match analyze_spf_record(query.record.as_deref().unwrap_or("")) {
        Ok(analysis) => (StatusCode::OK, Json(analysis)).into_response(),
        Err(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
    }
}
