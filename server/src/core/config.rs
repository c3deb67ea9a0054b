//! Application configuration
//!
//! Configuration is layered, lowest to highest priority:
//! 1. Built-in defaults
//! 2. JSON config file (CLI-specified path, or `innkeeper.json` in the
//!    working directory)
//! 3. CLI arguments (which include env var fallbacks via clap)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use super::cli::CliConfig;
use super::constants::{
    CACHE_DEFAULT_MAX_ENTRIES, CONFIG_FILE_NAME, ENV_ADMIN_PASSWORD, ENV_JWT_SIGNING_KEY,
};

/// Cache backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackendType {
    /// In-memory cache (default)
    Memory,
    /// Redis-compatible cache
    Redis,
}

impl Default for CacheBackendType {
    fn default() -> Self {
        Self::Memory
    }
}

// =============================================================================
// File config (raw, all fields optional)
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PostgresFileConfig {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
    pub max_lifetime_secs: Option<u64>,
    pub statement_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CacheFileConfig {
    pub backend: Option<CacheBackendType>,
    pub redis_url: Option<String>,
    pub max_entries: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuthFileConfig {
    /// Hex-encoded HS256 signing key (32 bytes). Generated if absent.
    pub signing_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub database: Option<PostgresFileConfig>,
    pub cache: Option<CacheFileConfig>,
    pub auth: Option<AuthFileConfig>,
}

impl FileConfig {
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }
}

// =============================================================================
// Resolved config
// =============================================================================

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    pub statement_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub backend: CacheBackendType,
    pub redis_url: Option<String>,
    pub max_entries: u64,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Hex-encoded HS256 signing key; generated at startup when unset
    pub signing_key: Option<String>,
    /// Password for the bootstrap administrator account
    pub admin_password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: PostgresConfig,
    pub cache: CacheConfig,
    pub auth: AuthConfig,
}

/// Check if a host string binds all interfaces
pub fn is_all_interfaces(host: &str) -> bool {
    host == "0.0.0.0" || host == "::"
}

impl AppConfig {
    /// Load configuration from all sources
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");

        let config_path = if let Some(ref path) = cli.config {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Some(path.clone())
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        let file_config = match config_path {
            Some(path) => {
                let config = FileConfig::load_from_file(&path)?;
                tracing::debug!(path = %path.display(), "Config file loaded");
                config
            }
            None => FileConfig::default(),
        };

        let file_server = file_config.server.unwrap_or_default();
        let file_database = file_config.database.unwrap_or_default();
        let file_cache = file_config.cache.unwrap_or_default();
        let file_auth = file_config.auth.unwrap_or_default();

        let server = ServerConfig {
            host: cli
                .host
                .clone()
                .or(file_server.host)
                .unwrap_or_else(|| "127.0.0.1".to_string()),
            port: cli.port.or(file_server.port).unwrap_or(8472),
        };

        let database = PostgresConfig {
            url: cli
                .postgres_url
                .clone()
                .or(file_database.url)
                .unwrap_or_default(),
            max_connections: file_database.max_connections.unwrap_or(0),
            min_connections: file_database.min_connections.unwrap_or(0),
            acquire_timeout_secs: file_database.acquire_timeout_secs.unwrap_or(0),
            idle_timeout_secs: file_database.idle_timeout_secs.unwrap_or(0),
            max_lifetime_secs: file_database.max_lifetime_secs.unwrap_or(0),
            statement_timeout_secs: file_database.statement_timeout_secs.unwrap_or(0),
        };

        let cache = CacheConfig {
            backend: cli
                .cache_backend
                .or(file_cache.backend)
                .unwrap_or_default(),
            redis_url: cli.redis_url.clone().or(file_cache.redis_url),
            max_entries: cli
                .cache_max_entries
                .or(file_cache.max_entries)
                .unwrap_or(CACHE_DEFAULT_MAX_ENTRIES),
        };

        let auth = AuthConfig {
            signing_key: std::env::var(ENV_JWT_SIGNING_KEY)
                .ok()
                .or(file_auth.signing_key),
            admin_password: std::env::var(ENV_ADMIN_PASSWORD).ok(),
        };

        Ok(Self {
            server,
            database,
            cache,
            auth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_backend_deserialize() {
        let backend: CacheBackendType = serde_json::from_str("\"memory\"").unwrap();
        assert_eq!(backend, CacheBackendType::Memory);
        let backend: CacheBackendType = serde_json::from_str("\"redis\"").unwrap();
        assert_eq!(backend, CacheBackendType::Redis);
    }

    #[test]
    fn test_file_config_partial() {
        let json = r#"{"server": {"port": 9000}}"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();
        let server = config.server.unwrap();
        assert_eq!(server.port, Some(9000));
        assert_eq!(server.host, None);
        assert!(config.cache.is_none());
    }

    #[test]
    fn test_file_config_cache_section() {
        let json = r#"{"cache": {"backend": "redis", "redis_url": "redis://localhost:6379"}}"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();
        let cache = config.cache.unwrap();
        assert_eq!(cache.backend, Some(CacheBackendType::Redis));
        assert_eq!(cache.redis_url.as_deref(), Some("redis://localhost:6379"));
    }

    #[test]
    fn test_is_all_interfaces() {
        assert!(is_all_interfaces("0.0.0.0"));
        assert!(is_all_interfaces("::"));
        assert!(!is_all_interfaces("127.0.0.1"));
    }
}
