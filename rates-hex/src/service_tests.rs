//! RateService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    use async_trait::async_trait;

    use rates_types::{
        AppError, Bid, Budgets, Deadline, DomainError, NewRateRecord, RateRecord, RateRepository,
        RateSource, RepoError, SourceError,
    };

    use crate::RateService;

    /// Scripted upstream. Sleeps without looking at the deadline, so only the
    /// service can cut it short.
    pub struct MockSource {
        outcome: fn() -> Result<Bid, SourceError>,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl MockSource {
        pub fn answering(outcome: fn() -> Result<Bid, SourceError>) -> Self {
            Self {
                outcome,
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn delayed(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RateSource for MockSource {
        async fn fetch_bid(&self, _deadline: Deadline) -> Result<Bid, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            (self.outcome)()
        }
    }

    /// Simple in-memory repository for testing the service layer.
    pub struct MockRepo {
        rows: Mutex<Vec<RateRecord>>,
        delay: Duration,
        fail: bool,
        deadlines: Mutex<Vec<Deadline>>,
    }

    impl MockRepo {
        pub fn new() -> Self {
            Self {
                rows: Mutex::new(Vec::new()),
                delay: Duration::ZERO,
                fail: false,
                deadlines: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        pub fn slow(delay: Duration) -> Self {
            Self {
                delay,
                ..Self::new()
            }
        }

        pub fn rows(&self) -> Vec<RateRecord> {
            self.rows.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RateRepository for MockRepo {
        async fn insert_rate(
            &self,
            record: NewRateRecord,
            deadline: Deadline,
        ) -> Result<RateRecord, RepoError> {
            self.deadlines.lock().unwrap().push(deadline);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if self.fail {
                return Err(RepoError::Database("database is closed".into()));
            }
            let mut rows = self.rows.lock().unwrap();
            let stored = RateRecord {
                id: rows.len() as i64 + 1,
                rate: record.rate,
                created_at: record.created_at,
            };
            rows.push(stored);
            Ok(stored)
        }

        async fn count_rates(&self) -> Result<i64, RepoError> {
            Ok(self.rows.lock().unwrap().len() as i64)
        }

        async fn latest_rate(&self) -> Result<Option<RateRecord>, RepoError> {
            Ok(self.rows.lock().unwrap().last().copied())
        }
    }

    fn bid_525() -> Result<Bid, SourceError> {
        Ok(Bid::new(5.25).unwrap())
    }

    fn bad_bid() -> Result<Bid, SourceError> {
        Err(SourceError::Domain(DomainError::InvalidBid(
            "'abc' is not a number".into(),
        )))
    }

    fn unavailable() -> Result<Bid, SourceError> {
        Err(SourceError::Status(503))
    }

    #[tokio::test]
    async fn test_current_rate_stores_and_returns_bid() {
        let service = RateService::new(MockSource::answering(bid_525), MockRepo::new());

        let bid = service.current_rate().await.unwrap();

        assert_eq!(bid.value(), 5.25);
        let rows = service.repo().rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rate.value(), 5.25);
        assert_eq!(service.source().calls(), 1);
    }

    #[tokio::test]
    async fn test_storage_gets_its_own_budget() {
        let service = RateService::new(MockSource::answering(bid_525), MockRepo::new());

        service.current_rate().await.unwrap();

        let deadlines = service.repo().deadlines.lock().unwrap().clone();
        assert_eq!(deadlines.len(), 1);
        assert_eq!(deadlines[0].budget(), Duration::from_millis(10));
        assert!(deadlines[0].remaining() <= Duration::from_millis(10));
    }

    #[tokio::test]
    async fn test_slow_upstream_is_cut_at_budget() {
        let source = MockSource::answering(bid_525).delayed(Duration::from_millis(500));
        let service = RateService::new(source, MockRepo::new());

        let started = Instant::now();
        let err = service.current_rate().await.unwrap_err();

        assert!(matches!(
            err,
            AppError::Upstream(SourceError::Timeout(d)) if d == Duration::from_millis(200)
        ));
        assert!(err.is_timeout());
        assert!(started.elapsed() < Duration::from_millis(450));
        assert!(service.repo().rows().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_bid_stores_nothing() {
        let service = RateService::new(MockSource::answering(bad_bid), MockRepo::new());

        let err = service.current_rate().await.unwrap_err();

        assert!(matches!(err, AppError::Upstream(SourceError::Domain(_))));
        assert!(service.repo().rows().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_status_stores_nothing() {
        let service = RateService::new(MockSource::answering(unavailable), MockRepo::new());

        let err = service.current_rate().await.unwrap_err();

        assert!(matches!(err, AppError::Upstream(SourceError::Status(503))));
        assert!(service.repo().deadlines.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_discards_fetched_bid() {
        let service = RateService::new(MockSource::answering(bid_525), MockRepo::failing());

        let err = service.current_rate().await.unwrap_err();

        assert!(matches!(err, AppError::Storage(RepoError::Database(_))));
        assert_eq!(service.source().calls(), 1);
        assert!(!err.to_string().contains("5.25"));
    }

    #[tokio::test]
    async fn test_storage_ignoring_deadline_is_abandoned_with_request() {
        let service = RateService::new(
            MockSource::answering(bid_525),
            MockRepo::slow(Duration::from_millis(400)),
        );

        let started = Instant::now();
        let err = service.current_rate().await.unwrap_err();

        assert!(matches!(
            err,
            AppError::Storage(RepoError::Timeout(d)) if d == Duration::from_millis(10)
        ));
        assert!(started.elapsed() < Duration::from_millis(350));
        assert!(service.repo().rows().is_empty());
    }

    #[tokio::test]
    async fn test_custom_budgets() {
        let budgets = Budgets {
            upstream: Duration::from_millis(50),
            storage: Duration::from_millis(500),
            client: Duration::from_millis(1000),
        };
        let source = MockSource::answering(bid_525).delayed(Duration::from_millis(200));
        let service = RateService::with_budgets(source, MockRepo::new(), budgets);

        assert_eq!(service.budgets(), budgets);
        let err = service.current_rate().await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Upstream(SourceError::Timeout(d)) if d == Duration::from_millis(50)
        ));
    }
}
