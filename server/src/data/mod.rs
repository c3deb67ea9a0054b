//! Data storage layer
//!
//! Provides the persistence and caching services for the application:
//! - `postgres` - transactional database (schema, migrations, repositories)
//! - `cache` - read-through caching with in-memory and Redis backends
//! - `types` - row types shared across repositories and cached views
//! - `error` - unified error type

pub mod cache;
pub mod error;
pub mod postgres;
pub mod types;

pub use error::DataError;
pub use postgres::PostgresService;
