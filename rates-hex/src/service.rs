//! Quote Application Service
//!
//! Orchestrates the fetch-then-persist sequence through the source and
//! repository ports, each hop under its own deadline.
//! Contains NO infrastructure logic - pure orchestration.

use std::future::Future;

use rates_types::{
    AppError, Bid, Budgets, Deadline, NewRateRecord, RateRecord, RateRepository, RateSource,
    RepoError, SourceError,
};

/// Application service for quote requests.
///
/// Generic over the source and repository ports - adapters are injected at
/// construction, so tests can swap in mocks and `main` owns their lifecycle.
pub struct RateService<S: RateSource, R: RateRepository> {
    source: S,
    repo: R,
    budgets: Budgets,
}

impl<S: RateSource, R: RateRepository> RateService<S, R> {
    /// Creates a service with the default 200 ms / 10 ms budgets.
    pub fn new(source: S, repo: R) -> Self {
        Self::with_budgets(source, repo, Budgets::default())
    }

    pub fn with_budgets(source: S, repo: R, budgets: Budgets) -> Self {
        Self {
            source,
            repo,
            budgets,
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn budgets(&self) -> Budgets {
        self.budgets
    }

    /// Fetches the current bid and records it.
    ///
    /// Both hops run under one request deadline, each with its own child
    /// budget. The bid is only returned once the row is stored; a storage
    /// failure discards it.
    pub async fn current_rate(&self) -> Result<Bid, AppError> {
        let request = Deadline::after(self.budgets.server_total());

        let bid = self
            .fetch_bid(request.child(self.budgets.upstream))
            .await?;

        let record = self.store_bid(bid, request).await?;
        tracing::debug!(id = record.id, %bid, "quote stored");

        Ok(bid)
    }

    async fn fetch_bid(&self, deadline: Deadline) -> Result<Bid, SourceError> {
        within(deadline, self.source.fetch_bid(deadline))
            .await
            .unwrap_or(Err(SourceError::Timeout(deadline.budget())))
    }

    /// The repository enforces the storage budget itself and commits only
    /// inside it; the request deadline is the backstop for one that does not.
    async fn store_bid(&self, bid: Bid, request: Deadline) -> Result<RateRecord, RepoError> {
        let deadline = request.child(self.budgets.storage);
        let record = NewRateRecord::now(bid);
        within(request, self.repo.insert_rate(record, deadline))
            .await
            .unwrap_or(Err(RepoError::Timeout(deadline.budget())))
    }
}

/// Drops `fut` once `deadline` passes, even if the adapter ignores it.
async fn within<F: Future>(deadline: Deadline, fut: F) -> Option<F::Output> {
    tokio::time::timeout(deadline.remaining(), fut).await.ok()
}
