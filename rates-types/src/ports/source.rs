//! Exchange rate source port.
//!
//! Implementations can be HTTP clients, fixed-rate stubs, etc.

use crate::domain::{Bid, Deadline};
use crate::error::SourceError;

/// Port trait for upstream exchange rate providers.
#[async_trait::async_trait]
pub trait RateSource: Send + Sync + 'static {
    /// Fetches the current USD -> BRL bid.
    ///
    /// Must give up once `deadline` expires and report `SourceError::Timeout`.
    async fn fetch_bid(&self, deadline: Deadline) -> Result<Bid, SourceError>;
}
