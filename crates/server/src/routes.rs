use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::warn;

use cards::CardRecord;
use sources::{CURATED_DECKS, CuratedDeck};

use crate::error::DeckError;
use crate::request::{DeckParams, DeckRequest};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/tmdb/deck", get(deck))
        .route("/api/tmdb/lists", get(lists))
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn deck(
    State(state): State<AppState>,
    params: Result<Query<DeckParams>, QueryRejection>,
) -> Result<Json<Vec<CardRecord>>, ApiError> {
    let Query(params) = params.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let request = DeckRequest::from_params(params, state.mode)?;
    let deck = state.assembler.assemble(&request).await?;
    Ok(Json(deck))
}

async fn lists() -> Json<&'static [CuratedDeck]> {
    Json(CURATED_DECKS)
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: error.into(),
                status: None,
                body: None,
            },
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<DeckError> for ApiError {
    fn from(err: DeckError) -> Self {
        match err {
            DeckError::ClientRequest { message } => ApiError::bad_request(message),
            DeckError::Upstream { status, body } => {
                warn!(status, "Upstream failure surfaced to caller");
                // Only error statuses are passed through as ours
                let code = StatusCode::from_u16(status)
                    .ok()
                    .filter(|code| code.is_client_error() || code.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                Self {
                    status: code,
                    body: ErrorBody {
                        error: "TMDb request failed".to_string(),
                        status: Some(status),
                        body: Some(body),
                    },
                }
            }
            DeckError::UpstreamUnavailable { message } => {
                warn!(error = %message, "Upstream unavailable");
                ApiError::new(StatusCode::BAD_GATEWAY, message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
