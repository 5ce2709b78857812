//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::join::JoinedStation;

use super::dto::*;
use super::state::AppState;

/// `Cache-Control` for station data; matches the refresh interval.
const STATION_CACHE_CONTROL: &str = "public, max-age=10";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/v1/stations", get(all_stations))
        .route("/api/v1/stations/:id", get(single_station))
        .route("/api/v1/status", get(status))
        .layer(CorsLayer::new().allow_origin(Any));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
}

/// Liveness text. Never cached.
async fn root(State(state): State<AppState>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        format!("I am listening... on {} 🤖\n", state.listen_addr),
    )
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// All stations in the current snapshot, in no particular order.
async fn all_stations(State(state): State<AppState>) -> Result<Response, AppError> {
    let snapshot = state.view.get().await.ok_or(AppError::NotReady)?;
    let stations: Vec<&JoinedStation> = snapshot.stations().collect();

    Ok((
        [(header::CACHE_CONTROL, STATION_CACHE_CONTROL)],
        Json(stations),
    )
        .into_response())
}

/// A single station by id.
async fn single_station(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let snapshot = state.view.get().await.ok_or(AppError::NotReady)?;
    let station = snapshot.get(&id).ok_or_else(|| AppError::NotFound {
        message: format!("no station with id {id}"),
    })?;

    Ok((
        [(header::CACHE_CONTROL, STATION_CACHE_CONTROL)],
        Json(station),
    )
        .into_response())
}

/// Freshness of the published snapshot. Always 200.
async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let body = match state.view.get().await {
        Some(snapshot) => StatusResponse::from_snapshot(&snapshot),
        None => StatusResponse::not_ready(),
    };
    Json(body)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// No refresh has succeeded yet
    NotReady,
    NotFound { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotReady => {
                warn!("request served before station data was ready");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "station data is not ready yet".to_string(),
                )
            }
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
