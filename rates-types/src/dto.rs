//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Bid;

/// Body of a successful `GET /cotacao`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BidResponse {
    /// USD -> BRL bid price
    #[schema(value_type = f64, example = 5.25)]
    pub bid: Bid,
}

impl From<Bid> for BidResponse {
    fn from(bid: Bid) -> Self {
        Self { bid }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
}
