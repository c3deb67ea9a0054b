//! Application-wide constants

// =============================================================================
// Application
// =============================================================================

/// Application name (lowercase, used in log filters)
pub const APP_NAME_LOWER: &str = "innkeeper";

/// Config file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "innkeeper.json";

// =============================================================================
// Environment variables
// =============================================================================

pub const ENV_LOG: &str = "INNKEEPER_LOG";
pub const ENV_HOST: &str = "INNKEEPER_HOST";
pub const ENV_PORT: &str = "INNKEEPER_PORT";
pub const ENV_CONFIG: &str = "INNKEEPER_CONFIG";
pub const ENV_POSTGRES_URL: &str = "INNKEEPER_POSTGRES_URL";
pub const ENV_CACHE_BACKEND: &str = "INNKEEPER_CACHE_BACKEND";
pub const ENV_CACHE_REDIS_URL: &str = "INNKEEPER_CACHE_REDIS_URL";
pub const ENV_CACHE_MAX_ENTRIES: &str = "INNKEEPER_CACHE_MAX_ENTRIES";
pub const ENV_JWT_SIGNING_KEY: &str = "INNKEEPER_JWT_SIGNING_KEY";
pub const ENV_ADMIN_PASSWORD: &str = "INNKEEPER_ADMIN_PASSWORD";

// =============================================================================
// HTTP
// =============================================================================

/// Default request body limit (1 MB)
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Body limit for auth endpoints (64 KB)
pub const AUTH_BODY_LIMIT: usize = 64 * 1024;

// =============================================================================
// Tokens & cookies
// =============================================================================

/// Access token lifetime in minutes
pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 10;

/// Refresh token lifetime in hours
pub const REFRESH_TOKEN_TTL_HOURS: i64 = 24;

/// Name of the refresh token cookie
pub const REFRESH_COOKIE_NAME: &str = "innkeeper_refresh";

/// Path the refresh cookie is scoped to. The refresh token is never sent
/// anywhere else and is never read from the Authorization header.
pub const REFRESH_COOKIE_PATH: &str = "/api/v1/auth/refresh";

// =============================================================================
// Cache
// =============================================================================

/// Default TTL for every cached view, in seconds
pub const CACHE_TTL_DEFAULT: u64 = 1800;

/// Default maximum entries for the in-memory cache backend
pub const CACHE_DEFAULT_MAX_ENTRIES: u64 = 100_000;

// =============================================================================
// PostgreSQL pool defaults
// =============================================================================

pub const POSTGRES_DEFAULT_MAX_CONNECTIONS: u32 = 20;
pub const POSTGRES_DEFAULT_MIN_CONNECTIONS: u32 = 2;
pub const POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;
pub const POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS: u64 = 300;
pub const POSTGRES_DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;
pub const POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Bootstrap
// =============================================================================

/// Email of the administrator account created on first start
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@localhost";

/// Role id of the seeded administrator role
pub const ADMIN_ROLE_ID: i64 = 1;
