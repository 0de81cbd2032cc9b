//! REST API for bill calculation.
//!
//! Provides two endpoints:
//! - `GET /tariff`: active tariff configuration
//! - `POST /bill`: validate form input and return the bill or the first error

mod handlers;
mod types;

pub use types::{BillRequest, BillResponse, ErrorResponse};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::bill::calculator::BillCalculator;

/// Immutable application state shared across all request handlers.
///
/// Wrapped in `Arc`; no locks needed since the calculator is read-only.
pub struct AppState {
    /// Calculator bound to the active tariff.
    pub calculator: BillCalculator,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/tariff", get(handlers::get_tariff))
        .route("/bill", post(handlers::post_bill))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
