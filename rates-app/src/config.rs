//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use rates_types::Budgets;

/// Application configuration.
///
/// Every variable is optional; the defaults are the service's fixed settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub upstream_url: String,
    pub budgets: Budgets,
    pub otlp_enabled: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("PORT must be a port number: {e}"))?;

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://cotacao.db?mode=rwc".to_string());

        let upstream_url =
            lookup("UPSTREAM_URL").unwrap_or_else(|| exchange_rates::AWESOME_API_URL.to_string());

        let defaults = Budgets::default();
        let budgets = Budgets {
            upstream: millis(&lookup, "UPSTREAM_TIMEOUT_MS", defaults.upstream)?,
            storage: millis(&lookup, "STORAGE_TIMEOUT_MS", defaults.storage)?,
            client: defaults.client,
        };

        let otlp_enabled = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").is_some_and(|v| !v.is_empty());

        Ok(Self {
            port,
            database_url,
            upstream_url,
            budgets,
            otlp_enabled,
        })
    }
}

fn millis(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
) -> anyhow::Result<Duration> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| anyhow::anyhow!("{key} must be a number of milliseconds: {e}")),
    }
}
