//! Unified data layer error type

use thiserror::Error;

use super::cache::CacheError;
use super::postgres::PostgresError;

/// Unified error type for the data layer
#[derive(Error, Debug)]
pub enum DataError {
    #[error(transparent)]
    Postgres(#[from] PostgresError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl From<sqlx::Error> for DataError {
    fn from(e: sqlx::Error) -> Self {
        Self::Postgres(PostgresError::Database(e))
    }
}
