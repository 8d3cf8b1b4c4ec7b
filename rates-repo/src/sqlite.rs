//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use rates_types::{Deadline, NewRateRecord, RateRecord, RateRepository, RepoError};

use crate::types::DbRate;

const CREATE_COTACAO: &str = include_str!("../migrations/0001_create_cotacao.sql");

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
///
/// Wraps a `SqlitePool`, so one instance can be shared by every in-flight request.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Connects and creates the schema.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every connection to `:memory:` is its own database; keep exactly one alive.
        let pool = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePool::connect_with(options).await?
        };

        let repo = Self { pool };
        repo.create_schema().await?;

        tracing::debug!(database_url, "sqlite repository ready");
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the `cotacao` table if absent.
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        sqlx::query(CREATE_COTACAO)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }

    /// Closes every pooled connection; later calls fail with `RepoError::Database`.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl RateRepository for SqliteRepo {
    async fn insert_rate(
        &self,
        record: NewRateRecord,
        deadline: Deadline,
    ) -> Result<RateRecord, RepoError> {
        if deadline.is_expired() {
            return Err(RepoError::Timeout(deadline.budget()));
        }

        // An uncommitted `tx` dropped on timeout queues a ROLLBACK behind the
        // INSERT still running on the sqlite worker.
        let insert = async {
            let mut tx = self.pool.begin().await?;
            let result = sqlx::query(r#"INSERT INTO cotacao (rate, created_at) VALUES (?, ?)"#)
                .bind(record.rate.value())
                .bind(record.created_at_text())
                .execute(&mut *tx)
                .await?;
            Ok::<_, sqlx::Error>((tx, result))
        };

        let (tx, result) = tokio::time::timeout(deadline.remaining(), insert)
            .await
            .map_err(|_| RepoError::Timeout(deadline.budget()))?
            .map_err(|e| RepoError::Database(e.to_string()))?;

        if deadline.is_expired() {
            tx.rollback()
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;
            return Err(RepoError::Timeout(deadline.budget()));
        }
        tx.commit()
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(RateRecord {
            id: result.last_insert_rowid(),
            rate: record.rate,
            created_at: record.created_at,
        })
    }

    async fn count_rates(&self) -> Result<i64, RepoError> {
        sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM cotacao"#)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))
    }

    async fn latest_rate(&self) -> Result<Option<RateRecord>, RepoError> {
        let row: Option<DbRate> = sqlx::query_as(
            r#"SELECT id, rate, created_at FROM cotacao ORDER BY id DESC LIMIT 1"#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbRate::into_domain).transpose()
    }
}
