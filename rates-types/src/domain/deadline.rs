//! Deadlines and per-hop timeout budgets.
//!
//! Every outbound call takes a [`Deadline`] argument instead of reading a
//! timeout from ambient state. A caller that already runs under a deadline
//! hands its callee `deadline.child(budget)`, which can only be tighter.

use std::time::{Duration, Instant};

use crate::error::DomainError;

/// A fixed point in time after which an operation is abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    expires_at: Instant,
    budget: Duration,
}

impl Deadline {
    /// Starts a fresh deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            expires_at: Instant::now() + budget,
            budget,
        }
    }

    /// Derives a deadline for a nested call: `budget` from now, capped by
    /// this deadline's own expiry.
    pub fn child(&self, budget: Duration) -> Self {
        let own = Instant::now() + budget;
        Self {
            expires_at: own.min(self.expires_at),
            budget,
        }
    }

    /// Time left before expiry; zero once expired.
    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }

    /// The budget this deadline was created with.
    pub fn budget(&self) -> Duration {
        self.budget
    }
}

/// Timeout budgets for the three hops of a quote request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budgets {
    /// Server -> upstream rate API.
    pub upstream: Duration,
    /// Server -> database insert.
    pub storage: Duration,
    /// Client -> server.
    pub client: Duration,
}

impl Default for Budgets {
    fn default() -> Self {
        Self {
            upstream: Duration::from_millis(200),
            storage: Duration::from_millis(10),
            client: Duration::from_millis(300),
        }
    }
}

impl Budgets {
    /// Checks that each hop is tighter than the one calling it.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.upstream >= self.client {
            return Err(DomainError::BudgetCascade(format!(
                "upstream budget {:?} must be shorter than client budget {:?}",
                self.upstream, self.client
            )));
        }
        if self.storage >= self.client {
            return Err(DomainError::BudgetCascade(format!(
                "storage budget {:?} must be shorter than client budget {:?}",
                self.storage, self.client
            )));
        }
        Ok(())
    }

    /// Budget of one server request: upstream and storage run back to back.
    pub fn server_total(&self) -> Duration {
        self.upstream + self.storage
    }
}
