//! Exchange rate domain model.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Text layout of `created_at` in storage (`YYYY-MM-DD HH:MM:SS`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Bid price of USD quoted in BRL.
///
/// Always finite and non-negative; deserialization goes through the same check.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Bid(f64);

impl Bid {
    /// Creates a bid, rejecting NaN, infinities and negative values.
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::InvalidBid(format!("{value} is not finite")));
        }
        if value < 0.0 {
            return Err(DomainError::InvalidBid(format!("{value} is negative")));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Bid {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Bid> for f64 {
    fn from(bid: Bid) -> Self {
        bid.0
    }
}

impl FromStr for Bid {
    type Err = DomainError;

    /// Parses the textual bid the upstream API sends (e.g. `"5.2534"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidBid(format!("'{s}' is not a number")))?;
        Self::new(value)
    }
}

impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A quote waiting to be persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewRateRecord {
    pub rate: Bid,
    pub created_at: NaiveDateTime,
}

impl NewRateRecord {
    /// Stamps the bid with the current local wall-clock time, truncated to seconds.
    pub fn now(rate: Bid) -> Self {
        let now = Local::now().naive_local();
        Self::at(rate, now)
    }

    pub fn at(rate: Bid, created_at: NaiveDateTime) -> Self {
        let created_at = created_at.with_nanosecond(0).unwrap_or(created_at);
        Self { rate, created_at }
    }

    /// `created_at` rendered the way it is stored.
    pub fn created_at_text(&self) -> String {
        self.created_at.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// A persisted quote. Append-only: never updated or deleted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateRecord {
    pub id: i64,
    pub rate: Bid,
    pub created_at: NaiveDateTime,
}

impl RateRecord {
    /// Rebuilds a record from its stored representation.
    pub fn from_parts(id: i64, rate: f64, created_at: &str) -> Result<Self, DomainError> {
        let created_at = NaiveDateTime::parse_from_str(created_at, TIMESTAMP_FORMAT)
            .map_err(|e| DomainError::InvalidTimestamp(format!("'{created_at}': {e}")))?;
        Ok(Self {
            id,
            rate: Bid::new(rate)?,
            created_at,
        })
    }
}
