//! HTTP API for domain checks.
//!
//! Endpoints:
//! - `GET /api/check-domain?domain=` - DMARC/SPF/DKIM result with score
//! - `GET /api/analyze?record=` - explained DMARC tags
//! - `GET /api/analyze-spf?record=` - explained SPF terms
//! - `POST /api/bulk` - sequential bulk check of a text list of domains
//! - `/status` - progress of the most recent bulk job

mod handlers;
mod types;

use axum::routing::{get, post};
use axum::Router;

use crate::dns::DomainChecker;
use handlers::{
    analyze_dmarc_handler, analyze_spf_handler, bulk_handler, check_domain_handler,
    status_handler,
};
pub use types::{ApiState, BulkProgress, CheckResponse, StatusResponse};

/// Builds the API router over `state`.
pub fn router<C: DomainChecker + 'static>(state: ApiState<C>) -> Router {
    Router::new()
        .route("/api/check-domain", get(check_domain_handler::<C>))
        .route("/api/analyze", get(analyze_dmarc_handler))
        .route("/api/analyze-spf", get(analyze_spf_handler))
        .route("/api/bulk", post(bulk_handler::<C>))
        .route("/status", get(status_handler::<C>))
        .with_state(state)
}

/// Binds `127.0.0.1:<port>` and serves the API until the process exits.
pub async fn start_api_server<C: DomainChecker + 'static>(
    port: u16,
    state: ApiState<C>,
) -> Result<(), anyhow::Error> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind API server to port {}: {}", port, e))?;

    log::info!("API server listening on http://127.0.0.1:{}/", port);
    log::info!("  - Check: http://127.0.0.1:{}/api/check-domain?domain=example.com", port);
    log::info!("  - Status: http://127.0.0.1:{}/status", port);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("API server error: {}", e))?;

    Ok(())
}
