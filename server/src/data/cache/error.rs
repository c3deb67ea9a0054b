//! Cache error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache configuration error: {0}")]
    Config(String),

    #[error("Cache connection error: {0}")]
    Connection(String),

    #[error("Cache decode error: {0}")]
    Decode(String),

    #[error("Cache operation failed: {0}")]
    Operation(String),

    #[error("Redis error: {0}")]
    Redis(#[from] deadpool_redis::redis::RedisError),

    #[error("Redis pool error: {0}")]
    Pool(#[from] deadpool_redis::PoolError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = CacheError::Config("redis_url required".to_string());
        assert_eq!(
            err.to_string(),
            "Cache configuration error: redis_url required"
        );
    }

    #[test]
    fn test_decode_error_display() {
        let err = CacheError::Decode("expected value at line 1".to_string());
        assert_eq!(
            err.to_string(),
            "Cache decode error: expected value at line 1"
        );
    }

    #[test]
    fn test_operation_error_display() {
        let err = CacheError::Operation("key too long".to_string());
        assert_eq!(err.to_string(), "Cache operation failed: key too long");
    }
}
