//! # Rates Types
//!
//! Domain types and port traits for the exchange rate service.
//! This crate has ZERO external IO dependencies - only data structures,
//! deadline arithmetic, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Bid, RateRecord, Deadline, Budgets)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain, adapter and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{Bid, Budgets, Deadline, NewRateRecord, RateRecord, TIMESTAMP_FORMAT};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError, SourceError};
pub use ports::{RateRepository, RateSource};
