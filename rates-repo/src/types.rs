//! Database row structs.

use sqlx::FromRow;

use rates_types::{RateRecord, RepoError};

/// `cotacao` row as stored: `created_at` is TEXT.
#[derive(FromRow)]
pub struct DbRate {
    pub id: i64,
    pub rate: f64,
    pub created_at: String,
}

impl DbRate {
    pub fn into_domain(self) -> Result<RateRecord, RepoError> {
        RateRecord::from_parts(self.id, self.rate, &self.created_at).map_err(RepoError::Domain)
    }
}
