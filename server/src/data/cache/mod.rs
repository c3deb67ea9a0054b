//! Cache module
//!
//! Read-through caching infrastructure with pluggable backends:
//! - In-memory (default) - uses moka
//! - Redis (optional) - uses deadpool-redis
//!
//! All cached views are JSON-encoded and expire after a fixed TTL; writes
//! to domain entities delete the affected keys through the declarative
//! sets in [`invalidation`].

mod backend;
mod error;
pub mod invalidation;
mod key;
mod memory;
mod redis;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use backend::CacheBackend;
pub use error::CacheError;
pub use key::CacheKey;

use memory::InMemoryCache;

use crate::core::config::{CacheBackendType, CacheConfig};

/// Cache service providing read-through access to the cache backend
///
/// Wraps the underlying cache backend and provides:
/// - Raw bytes API for flexibility
/// - Typed API using JSON serialization
/// - `remember` / `remember_json` compute-or-fetch wrappers
/// - `invalidate_caches` for post-write key deletion
///
/// The service is constructed once at startup and injected as
/// `Arc<CacheService>` into every component that needs it; there is no
/// ambient/global cache handle.
pub struct CacheService {
    backend: Arc<dyn CacheBackend>,
}

impl std::fmt::Debug for CacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheService")
            .field("backend", &self.backend.backend_name())
            .finish()
    }
}

impl CacheService {
    /// Create a new cache service from configuration
    pub async fn new(config: &CacheConfig) -> Result<Self, CacheError> {
        let backend: Arc<dyn CacheBackend> = match config.backend {
            CacheBackendType::Memory => {
                tracing::debug!(
                    max_entries = config.max_entries,
                    "Initializing in-memory cache"
                );
                Arc::new(InMemoryCache::new(config))
            }
            CacheBackendType::Redis => {
                let url = config.redis_url.as_ref().ok_or_else(|| {
                    CacheError::Config("redis_url required for Redis backend".into())
                })?;
                // Note: RedisCache::new logs sanitized URL internally
                Arc::new(redis::RedisCache::new(url).await?)
            }
        };

        Ok(Self { backend })
    }

    /// Get the backend name
    pub fn backend_name(&self) -> &'static str {
        self.backend.backend_name()
    }

    // =========================================================================
    // Raw bytes API
    // =========================================================================

    /// Get raw bytes from cache
    pub async fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.backend.get(key).await
    }

    /// Set raw bytes in cache
    pub async fn set_raw(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        self.backend.set(key, value, ttl).await
    }

    // =========================================================================
    // Typed API (serde_json)
    // =========================================================================

    /// Get a typed value from cache
    ///
    /// A malformed stored entry is a [`CacheError::Decode`], never a miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.get_raw(key).await? {
            Some(bytes) => {
                let value = serde_json::from_slice(&bytes)
                    .map_err(|e| CacheError::Decode(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value in cache
    pub async fn set<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        let bytes =
            serde_json::to_vec(value).map_err(|e| CacheError::Operation(e.to_string()))?;
        self.set_raw(key, bytes, ttl).await
    }

    // =========================================================================
    // Read-through wrappers
    // =========================================================================

    /// Return the cached string at `key`, or compute, store, and return it.
    ///
    /// Backend read failures are logged and treated as a miss; backend
    /// write failures are logged and the freshly produced value is still
    /// returned. There is no stampede protection: concurrent callers
    /// racing on the same missing key may each invoke the producer and
    /// each write the result (last writer wins).
    pub async fn remember<E, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        producer: F,
    ) -> Result<String, E>
    where
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, E>>,
    {
        match self.get_raw(key).await {
            Ok(Some(bytes)) => {
                return String::from_utf8(bytes)
                    .map_err(|e| E::from(CacheError::Decode(e.to_string())));
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache read failed, recomputing");
            }
        }

        let value = producer().await?;
        if let Err(e) = self
            .set_raw(key, value.clone().into_bytes(), Some(ttl))
            .await
        {
            tracing::warn!(key = %key, error = %e, "Cache write failed");
        }
        Ok(value)
    }

    /// JSON variant of [`Self::remember`].
    ///
    /// The stored entry is decoded on a hit; a decode failure propagates
    /// as [`CacheError::Decode`] instead of silently recomputing, since a
    /// silent fallback would mask corruption.
    pub async fn remember_json<T, E, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        producer: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match self.get_raw(key).await {
            Ok(Some(bytes)) => {
                let value = serde_json::from_slice(&bytes)
                    .map_err(|e| E::from(CacheError::Decode(e.to_string())))?;
                return Ok(value);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache read failed, recomputing");
            }
        }

        let value = producer().await?;
        match serde_json::to_vec(&value) {
            Ok(bytes) => {
                if let Err(e) = self.set_raw(key, bytes, Some(ttl)).await {
                    tracing::warn!(key = %key, error = %e, "Cache write failed");
                }
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache encode failed, value not cached");
            }
        }
        Ok(value)
    }

    // =========================================================================
    // Invalidation
    // =========================================================================

    /// Delete a key from cache with automatic error logging.
    pub async fn invalidate_key(&self, key: &str) {
        if let Err(e) = self.backend.delete(key).await {
            tracing::warn!(key = %key, error = %e, "Cache invalidation failed");
        }
    }

    /// Delete every listed key (delete-if-present, a missing key is not an
    /// error).
    ///
    /// Mutation handlers await this before sending their response, so the
    /// issuing client's next read cannot observe the stale view it just
    /// replaced. Key sets come from [`invalidation`].
    pub async fn invalidate_caches<I>(&self, keys: I)
    where
        I: IntoIterator<Item = String>,
    {
        for key in keys {
            self.invalidate_key(&key).await;
        }
    }

    /// Health check
    pub async fn health_check(&self) -> Result<(), CacheError> {
        self.backend.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::core::config::CacheBackendType;

    fn test_config() -> CacheConfig {
        CacheConfig {
            backend: CacheBackendType::Memory,
            redis_url: None,
            max_entries: 1000,
        }
    }

    async fn test_service() -> CacheService {
        CacheService::new(&test_config()).await.unwrap()
    }

    const TTL: Duration = Duration::from_secs(1800);

    #[tokio::test]
    async fn test_backend_name() {
        let service = test_service().await;
        assert_eq!(service.backend_name(), "memory");
    }

    #[tokio::test]
    async fn test_typed_get_set() {
        let service = test_service().await;

        #[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
        struct Hotel {
            id: i64,
            name: String,
        }

        let hotel = Hotel {
            id: 1,
            name: "Grand Central".to_string(),
        };

        service.set("hotel1", &hotel, None).await.unwrap();
        let fetched: Option<Hotel> = service.get("hotel1").await.unwrap();
        assert_eq!(fetched, Some(hotel));
    }

    #[tokio::test]
    async fn test_remember_invokes_producer_once() {
        let service = test_service().await;
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let calls = calls.clone();
            let value: Result<String, CacheError> = service
                .remember("greeting", TTL, move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok("hello".to_string())
                })
                .await;
            assert_eq!(value.unwrap(), "hello");
        }

        // Second call was served from cache
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_remember_json_roundtrip() {
        let service = test_service().await;

        let produced = vec![
            ("one".to_string(), 1i64),
            ("two".to_string(), 2i64),
        ];
        let expected = produced.clone();

        let value: Result<Vec<(String, i64)>, CacheError> = service
            .remember_json("pairs", TTL, move || async move { Ok(produced) })
            .await;
        assert_eq!(value.unwrap(), expected);

        // Cached copy decodes deep-equal, producer not consulted
        let value: Result<Vec<(String, i64)>, CacheError> = service
            .remember_json("pairs", TTL, || async {
                panic!("producer must not run on a warm cache")
            })
            .await;
        assert_eq!(value.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_remember_json_decode_error_propagates() {
        let service = test_service().await;

        // Poison the entry with malformed JSON
        service
            .set_raw("poisoned", b"{not json".to_vec(), Some(TTL))
            .await
            .unwrap();

        let result: Result<Vec<i64>, CacheError> = service
            .remember_json("poisoned", TTL, || async {
                panic!("decode failure must not fall back to the producer")
            })
            .await;

        assert!(matches!(result, Err(CacheError::Decode(_))));
    }

    #[tokio::test]
    async fn test_invalidate_forces_recompute() {
        let service = test_service().await;
        let calls = Arc::new(AtomicUsize::new(0));

        let produce = |calls: Arc<AtomicUsize>| {
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, CacheError>("v".to_string())
            }
        };

        service
            .remember("k1", TTL, produce(calls.clone()))
            .await
            .unwrap();
        service
            .remember("k2", TTL, produce(calls.clone()))
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        service
            .invalidate_caches(vec!["k1".to_string(), "k2".to_string()])
            .await;

        service
            .remember("k1", TTL, produce(calls.clone()))
            .await
            .unwrap();
        service
            .remember("k2", TTL, produce(calls.clone()))
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_invalidate_missing_key_is_noop() {
        let service = test_service().await;
        // Must not panic or error
        service
            .invalidate_caches(vec!["neverExisted".to_string()])
            .await;
    }

    /// Collection view lifecycle: populate, write a second entity,
    /// invalidate, and the next read recomputes the full view.
    #[tokio::test]
    async fn test_collection_view_sees_new_entity_after_invalidation() {
        let service = test_service().await;
        let store = Arc::new(std::sync::Mutex::new(vec!["floor one".to_string()]));

        let read = |store: Arc<std::sync::Mutex<Vec<String>>>| {
            move || async move { Ok::<_, CacheError>(store.lock().unwrap().clone()) }
        };

        let floors: Vec<String> = service
            .remember_json("allFloors", TTL, read(store.clone()))
            .await
            .unwrap();
        assert_eq!(floors.len(), 1);

        // Create a second floor, then invalidate the way a mutation
        // handler does
        store.lock().unwrap().push("floor two".to_string());
        service
            .invalidate_caches(invalidation::floor_write(2, 1000))
            .await;

        let floors: Vec<String> = service
            .remember_json("allFloors", TTL, read(store.clone()))
            .await
            .unwrap();
        assert_eq!(floors, vec!["floor one", "floor two"]);
    }

    #[tokio::test]
    async fn test_health_check() {
        let service = test_service().await;
        assert!(service.health_check().await.is_ok());
    }
}
