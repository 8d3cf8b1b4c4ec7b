//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use rates_types::dto::{BidResponse, HealthResponse};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
async fn health() {}

/// Current USD -> BRL bid
///
/// Fetches the quote upstream (200 ms budget), stores it (10 ms budget) and
/// returns it. Nothing is returned unless both steps succeed.
#[utoipa::path(
    get,
    path = "/cotacao",
    tag = "quotes",
    responses(
        (status = 200, description = "Quote fetched and stored", body = BidResponse),
        (status = 500, description = "Upstream or storage failure", body = String, content_type = "text/plain")
    )
)]
async fn get_quote() {}

/// OpenAPI documentation for the quote API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "USD/BRL Quote Service API",
        version = "1.0.0",
        description = "Fetches the current USD/BRL bid, records it, and returns it under strict per-hop timeouts.",
        license(name = "MIT"),
    ),
    paths(health, get_quote),
    components(schemas(BidResponse, HealthResponse)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "quotes", description = "Exchange rate quotes"),
    )
)]
pub struct ApiDoc;
