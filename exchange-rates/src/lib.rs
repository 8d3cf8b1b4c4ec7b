//! USD/BRL Exchange Rate Sources
//!
//! Adapters implementing the [`RateSource`] port:
//!
//! - [`AwesomeApiSource`] - queries `economia.awesomeapi.com.br` over HTTP
//! - [`FixedRateSource`] - always answers the same bid, for development and testing
//!
//! # Example
//! ```no_run
//! use std::time::Duration;
//! use exchange_rates::AwesomeApiSource;
//! use rates_types::{Deadline, RateSource};
//!
//! # async fn demo() -> Result<(), rates_types::SourceError> {
//! let source = AwesomeApiSource::default();
//! let bid = source.fetch_bid(Deadline::after(Duration::from_millis(200))).await?;
//! println!("USD/BRL bid: {bid}");
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use rates_types::{Bid, Deadline, RateSource, SourceError};

/// Public endpoint for the latest USD -> BRL quote.
pub const AWESOME_API_URL: &str = "https://economia.awesomeapi.com.br/json/last/USD-BRL";

// ─────────────────────────────────────────────────────────────────────────────
// Upstream wire format
// ─────────────────────────────────────────────────────────────────────────────

/// `{"USDBRL": {"bid": "5.2534", ...}}`; every other field is ignored.
#[derive(Debug, Deserialize)]
struct UpstreamQuote {
    #[serde(rename = "USDBRL")]
    usd_brl: UpstreamPair,
}

#[derive(Debug, Deserialize)]
struct UpstreamPair {
    bid: String,
}

/// Decodes an upstream body into a validated bid.
pub fn parse_quote(body: &str) -> Result<Bid, SourceError> {
    let quote: UpstreamQuote =
        serde_json::from_str(body).map_err(|e| SourceError::Decode(e.to_string()))?;
    Ok(quote.usd_brl.bid.parse::<Bid>()?)
}

// ─────────────────────────────────────────────────────────────────────────────
// AwesomeAPI adapter
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP adapter for the AwesomeAPI quote endpoint.
#[derive(Debug, Clone)]
pub struct AwesomeApiSource {
    url: String,
    http: Client,
}

impl Default for AwesomeApiSource {
    fn default() -> Self {
        Self::new(AWESOME_API_URL)
    }
}

impl AwesomeApiSource {
    /// Creates a source reading from `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, Client::new())
    }

    /// Creates a source that sends its requests through `http`.
    pub fn with_client(url: impl Into<String>, http: Client) -> Self {
        Self {
            url: url.into(),
            http,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request(&self, deadline: Deadline) -> Result<Bid, SourceError> {
        let resp = self
            .http
            .get(&self.url)
            .timeout(deadline.remaining())
            .send()
            .await
            .map_err(|e| transport_error(e, deadline))?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| transport_error(e, deadline))?;
        parse_quote(&body)
    }
}

fn transport_error(err: reqwest::Error, deadline: Deadline) -> SourceError {
    if err.is_timeout() {
        SourceError::Timeout(deadline.budget())
    } else {
        SourceError::Transport(err.to_string())
    }
}

#[async_trait]
impl RateSource for AwesomeApiSource {
    #[tracing::instrument(skip_all, fields(budget = ?deadline.budget()))]
    async fn fetch_bid(&self, deadline: Deadline) -> Result<Bid, SourceError> {
        if deadline.is_expired() {
            return Err(SourceError::Timeout(deadline.budget()));
        }

        match tokio::time::timeout(deadline.remaining(), self.request(deadline)).await {
            Ok(Ok(bid)) => {
                tracing::debug!(%bid, url = %self.url, "upstream quote received");
                Ok(bid)
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "upstream quote failed");
                Err(e)
            }
            Err(_) => {
                tracing::warn!("upstream quote abandoned at deadline");
                Err(SourceError::Timeout(deadline.budget()))
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fixed rate
// ─────────────────────────────────────────────────────────────────────────────

/// Always answers the same bid, without touching the network.
#[derive(Debug, Clone, Copy)]
pub struct FixedRateSource {
    bid: Bid,
}

impl FixedRateSource {
    pub fn new(bid: Bid) -> Self {
        Self { bid }
    }
}

#[async_trait]
impl RateSource for FixedRateSource {
    async fn fetch_bid(&self, deadline: Deadline) -> Result<Bid, SourceError> {
        if deadline.is_expired() {
            return Err(SourceError::Timeout(deadline.budget()));
        }
        Ok(self.bid)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
