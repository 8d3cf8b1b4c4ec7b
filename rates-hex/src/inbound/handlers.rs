//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use rates_types::{AppError, BidResponse, HealthResponse, RateRepository, RateSource};

use crate::RateService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<S: RateSource, R: RateRepository> {
    pub service: RateService<S, R>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Detail stays in the logs; the caller only gets the generic message.
        tracing::error!(
            error = ?self.0,
            timeout = self.0.is_timeout(),
            "quote request failed"
        );

        (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".into(),
    })
}

/// Fetch, store and return the current USD -> BRL bid.
#[tracing::instrument(skip(state))]
pub async fn get_quote<S: RateSource, R: RateRepository>(
    State(state): State<Arc<AppState<S, R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let bid = state.service.current_rate().await?;
    tracing::info!(%bid, "quote served");
    Ok(Json(BidResponse::from(bid)))
}

/// OpenAPI document for this service.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
