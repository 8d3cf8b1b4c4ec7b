//! # Rates Client SDK
//!
//! A typed Rust client for the quote API, plus the writer for the local
//! quote file.

use std::path::Path;
use std::time::Duration;

use rates_types::{Bid, BidResponse, Deadline};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

mod quote_file;

pub use quote_file::{QUOTE_FILE, render_quote, write_quote};

/// Default address of the quote server.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server did not answer within {0:?}")]
    Timeout(Duration),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Falha ao criar arquivo: {0}")]
    CreateFile(#[source] std::io::Error),

    #[error("Falha ao escrever no arquivo: {0}")]
    WriteFile(#[source] std::io::Error),
}

impl ClientError {
    /// Whether the quote was fetched and only saving it failed.
    pub fn is_file_error(&self) -> bool {
        matches!(self, ClientError::CreateFile(_) | ClientError::WriteFile(_))
    }
}

/// Quote API client.
pub struct RatesClient {
    base_url: String,
    http: Client,
}

impl RatesClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Creates a client that sends its requests through `http`.
    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Asks the server for the current bid, giving up when `deadline` expires.
    pub async fn current_rate(&self, deadline: Deadline) -> Result<Bid, ClientError> {
        if deadline.is_expired() {
            return Err(ClientError::Timeout(deadline.budget()));
        }

        let request = async {
            let body: BidResponse = self.get("/cotacao", deadline).await?;
            Ok::<_, ClientError>(body.bid)
        };

        match tokio::time::timeout(deadline.remaining(), request).await {
            Ok(Err(ClientError::Http(e))) if e.is_timeout() => {
                Err(ClientError::Timeout(deadline.budget()))
            }
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout(deadline.budget())),
        }
    }

    /// Fetches the current bid and overwrites `path` with it.
    ///
    /// Nothing is written unless the fetch succeeds.
    pub async fn save_current_rate(
        &self,
        path: impl AsRef<Path>,
        deadline: Deadline,
    ) -> Result<Bid, ClientError> {
        let bid = self.current_rate(deadline).await?;
        write_quote(path, bid)?;
        Ok(bid)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        deadline: Deadline,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .timeout(deadline.remaining())
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status == StatusCode::OK {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let message = resp.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
