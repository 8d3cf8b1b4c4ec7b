//! Domain models for the exchange rate service.

pub mod deadline;
pub mod rate;

pub use deadline::{Budgets, Deadline};
pub use rate::{Bid, NewRateRecord, RateRecord, TIMESTAMP_FORMAT};
