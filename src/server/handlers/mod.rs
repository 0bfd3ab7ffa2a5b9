//! API server HTTP handlers.

mod analyze;
mod bulk;
mod check;
mod status;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::types::ErrorBody;

pub use analyze::{analyze_dmarc_handler, analyze_spf_handler};
pub use bulk::bulk_handler;
pub use check::check_domain_handler;
pub use status::status_handler;

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}
