//! Read-only REST API over the account fixture, concept catalog and decoder.
//!
//! Endpoints:
//! - `GET /account`: the mock account
//! - `GET /concepts` and `GET /concepts/{id}`: concept catalog
//! - `GET /tariffs/{code}`: decoded tariff code
//! - `GET /tariff`: decoded tariff shown on the dashboard
//! - `GET /chapters`: story chapter list

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::account::Account;

pub use types::{ChapterResponse, DecodedTariffResponse, ErrorResponse};

/// Immutable application state shared across all request handlers.
///
/// Built once at startup and wrapped in `Arc`; nothing is mutated after that.
pub struct AppState {
    /// Account served by `/account`.
    pub account: Account,
    /// Tariff code the dashboard decoder shows.
    pub tariff_code: String,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/account", get(handlers::get_account))
        .route("/concepts", get(handlers::list_concepts))
        .route("/concepts/{id}", get(handlers::get_concept))
        .route("/tariff", get(handlers::get_dashboard_tariff))
        .route("/tariffs/{code}", get(handlers::decode_tariff))
        .route("/chapters", get(handlers::list_chapters))
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind to `addr` or the
/// server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
