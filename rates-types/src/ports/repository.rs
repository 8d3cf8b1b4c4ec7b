//! Repository port trait.
//!
//! Adapters (SQLite, in-memory) implement this trait.

use crate::domain::{Deadline, NewRateRecord, RateRecord};
use crate::error::RepoError;

/// Append-only storage for fetched quotes.
///
/// Implementations must be safe to call from many in-flight requests at once.
#[async_trait::async_trait]
pub trait RateRepository: Send + Sync + 'static {
    /// Inserts one quote as a single statement, giving up once `deadline`
    /// expires with `RepoError::Timeout`.
    async fn insert_rate(
        &self,
        record: NewRateRecord,
        deadline: Deadline,
    ) -> Result<RateRecord, RepoError>;

    /// Number of stored quotes.
    async fn count_rates(&self) -> Result<i64, RepoError>;

    /// Most recently inserted quote, if any.
    async fn latest_rate(&self) -> Result<Option<RateRecord>, RepoError>;
}
