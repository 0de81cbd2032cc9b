//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{BillRequest, BillResponse, ErrorResponse};
use crate::bill::types::RawInput;
use crate::config::TariffConfig;

/// Returns the active tariff.
///
/// `GET /tariff` → 200 + `TariffConfig` JSON
pub async fn get_tariff(State(state): State<Arc<AppState>>) -> Json<TariffConfig> {
    Json(state.calculator.tariff().clone())
}

/// Validates the submitted form and prices it.
///
/// `POST /bill` → 200 + `BillResponse` JSON
/// `POST /bill` with failing input → 400 + `ErrorResponse`
pub async fn post_bill(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BillRequest>,
) -> impl IntoResponse {
    let locale = req.locale();
    match state.calculator.calculate(&RawInput::from(&req)) {
        Ok(bill) => Ok(Json(BillResponse::new(bill, locale))),
        Err(e) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::validation(e, locale)),
        )),
    }
}
