//! Command line interface

use std::path::PathBuf;

use clap::Parser;

use super::config::CacheBackendType;
use super::constants::{
    ENV_CACHE_BACKEND, ENV_CACHE_MAX_ENTRIES, ENV_CACHE_REDIS_URL, ENV_CONFIG, ENV_HOST, ENV_PORT,
    ENV_POSTGRES_URL,
};

#[derive(Parser)]
#[command(name = "innkeeper")]
#[command(version, about = "Hotel management backend", long_about = None)]
pub struct Cli {
    /// Server host address
    #[arg(long, short = 'H', env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', env = ENV_PORT)]
    pub port: Option<u16>,

    /// Path to config file
    #[arg(long, short = 'c', env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// PostgreSQL connection URL
    #[arg(long, env = ENV_POSTGRES_URL)]
    pub postgres_url: Option<String>,

    /// Cache backend (memory or redis)
    #[arg(long, env = ENV_CACHE_BACKEND, value_parser = parse_cache_backend)]
    pub cache_backend: Option<CacheBackendType>,

    /// Redis URL for the redis cache backend
    #[arg(long, env = ENV_CACHE_REDIS_URL)]
    pub redis_url: Option<String>,

    /// Maximum entries for the in-memory cache backend
    #[arg(long, env = ENV_CACHE_MAX_ENTRIES)]
    pub cache_max_entries: Option<u64>,
}

fn parse_cache_backend(s: &str) -> Result<CacheBackendType, String> {
    match s.to_lowercase().as_str() {
        "memory" => Ok(CacheBackendType::Memory),
        "redis" => Ok(CacheBackendType::Redis),
        other => Err(format!(
            "Unknown cache backend '{}' (expected 'memory' or 'redis')",
            other
        )),
    }
}

/// Parsed CLI configuration handed to [`super::config::AppConfig::load`]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub config: Option<PathBuf>,
    pub postgres_url: Option<String>,
    pub cache_backend: Option<CacheBackendType>,
    pub redis_url: Option<String>,
    pub cache_max_entries: Option<u64>,
}

/// Parse command line arguments
pub fn parse() -> CliConfig {
    let cli = Cli::parse();
    CliConfig {
        host: cli.host,
        port: cli.port,
        config: cli.config,
        postgres_url: cli.postgres_url,
        cache_backend: cli.cache_backend,
        redis_url: cli.redis_url,
        cache_max_entries: cli.cache_max_entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cache_backend() {
        assert!(matches!(
            parse_cache_backend("memory"),
            Ok(CacheBackendType::Memory)
        ));
        assert!(matches!(
            parse_cache_backend("Redis"),
            Ok(CacheBackendType::Redis)
        ));
        assert!(parse_cache_backend("memcached").is_err());
    }
}
