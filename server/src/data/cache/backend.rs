//! Cache backend trait definition

use std::time::Duration;

use async_trait::async_trait;

use super::error::CacheError;

/// Cache backend trait
///
/// Defines the interface for the physical key/value store. Both the
/// in-memory and Redis backends implement this trait.
///
/// # Consistency Notes
///
/// Operations on individual keys are atomic, but the return value of
/// `delete` may be stale in concurrent scenarios. This is acceptable for
/// cache use cases where eventual consistency is sufficient.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Get a value from the cache
    ///
    /// Expiry is enforced on read: an entry past its TTL is reported as
    /// absent even if it has not been evicted yet.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Set a value in the cache with optional TTL
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>)
    -> Result<(), CacheError>;

    /// Delete a key from the cache
    ///
    /// Returns `true` if the key existed before deletion. Deleting a
    /// missing key is not an error.
    async fn delete(&self, key: &str) -> Result<bool, CacheError>;

    /// Delete every key in the cache
    async fn clear(&self) -> Result<(), CacheError>;

    /// Health check (validates connection)
    async fn health_check(&self) -> Result<(), CacheError>;

    /// Backend name for debugging/logging
    fn backend_name(&self) -> &'static str;
}
