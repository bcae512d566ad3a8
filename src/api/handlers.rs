//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ChapterResponse, DecodedTariffResponse, ErrorResponse};
use crate::account::Account;
use crate::concepts::{self, Concept, ConceptId};
use crate::machine::ChapterId;
use crate::tariff::decode;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: String) -> ApiError {
    (status, Json(ErrorResponse { error }))
}

/// `GET /account` → 200 + `Account` JSON
pub async fn get_account(State(state): State<Arc<AppState>>) -> Json<Account> {
    Json(state.account.clone())
}

/// `GET /concepts` → 200 + every catalog entry
pub async fn list_concepts() -> Json<&'static [Concept]> {
    Json(concepts::catalog())
}

/// Returns one concept by its camelCase id.
///
/// `GET /concepts/mpan` → 200 + `Concept` JSON
/// `GET /concepts/bogus` → 404 + `ErrorResponse`
pub async fn get_concept(Path(id): Path<String>) -> impl IntoResponse {
    match id.parse::<ConceptId>() {
        Ok(id) => Ok(Json(concepts::concept(id))),
        Err(e) => Err(api_error(StatusCode::NOT_FOUND, e.to_string())),
    }
}

/// Decodes an arbitrary tariff code.
///
/// `GET /tariffs/E-1R-AGILE-FLEX-22-11-25-C` → 200 + `DecodedTariffResponse`
/// `GET /tariffs/E-1R-X` → 422 + `ErrorResponse`
pub async fn decode_tariff(Path(code): Path<String>) -> impl IntoResponse {
    decode_response(&code)
}

/// Decodes the tariff code the dashboard decoder shows.
pub async fn get_dashboard_tariff(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    decode_response(&state.tariff_code)
}

fn decode_response(code: &str) -> Result<Json<DecodedTariffResponse>, ApiError> {
    decode(code)
        .map(|decoded| Json(DecodedTariffResponse::new(code, decoded)))
        .ok_or_else(|| {
            api_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("\"{code}\" is not a decodable tariff code"),
            )
        })
}

/// `GET /chapters` → 200 + chapters in story order
pub async fn list_chapters() -> Json<Vec<ChapterResponse>> {
    Json(
        ChapterId::ALL
            .into_iter()
            .map(|c| ChapterResponse::from(c.meta()))
            .collect(),
    )
}
