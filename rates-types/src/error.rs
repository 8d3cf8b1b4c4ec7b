//! Error types for the exchange rate service.

use std::time::Duration;

/// Domain-level errors (invalid values).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid bid: {0}")]
    InvalidBid(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Budgets out of order: {0}")]
    BudgetCascade(String),
}

/// Upstream rate source failures.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Upstream did not answer within {0:?}")]
    Timeout(Duration),

    #[error("Upstream returned status {0}")]
    Status(u16),

    #[error("Malformed upstream body: {0}")]
    Decode(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Database did not answer within {0:?}")]
    Timeout(Duration),
}

/// Application-level errors (for HTTP responses).
///
/// Display strings are what the caller sees; the wrapped source carries the
/// detail that only goes to the logs.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Erro: Falha ao obter a cotação do dólar")]
    Upstream(#[from] SourceError),

    #[error("Erro: Falha ao salvar no banco de dados")]
    Storage(#[from] RepoError),
}

impl AppError {
    /// Whether the failure was a deadline expiring rather than a hard error.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            AppError::Upstream(SourceError::Timeout(_)) | AppError::Storage(RepoError::Timeout(_))
        )
    }
}
