//! Core application

use std::sync::Arc;

use anyhow::Result;

use crate::api::ApiServer;
use crate::api::auth::{AuthManager, AuthorizationGate, PermissionResolver};
use crate::core::cli;
use crate::core::config::AppConfig;
use crate::core::constants::{ADMIN_ROLE_ID, APP_NAME_LOWER, DEFAULT_ADMIN_EMAIL, ENV_LOG};
use crate::data::PostgresService;
use crate::data::cache::CacheService;
use crate::data::postgres::repositories::user;
use crate::utils::crypto;

pub struct CoreApp {
    pub config: AppConfig,
    pub database: Arc<PostgresService>,
    pub cache: Arc<CacheService>,
    pub auth: Arc<AuthManager>,
    pub resolver: Arc<PermissionResolver>,
    pub gate: Arc<AuthorizationGate>,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let cli_config = cli::parse();
        let app = Self::init(&cli_config).await?;

        let server = ApiServer::new(app);
        server.start().await
    }

    async fn init(cli: &cli::CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;

        // Initialize cache service
        let cache = Arc::new(
            CacheService::new(&config.cache)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to initialize cache service: {}", e))?,
        );
        tracing::debug!(backend = cache.backend_name(), "Cache initialized");

        // Initialize database (runs migrations)
        let database = Arc::new(
            PostgresService::init(&config.database)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to initialize database: {}", e))?,
        );

        let auth = Arc::new(AuthManager::init(&config.auth)?);

        // Permission resolution and the authorization gate share the
        // process-wide cache client through explicit injection
        let resolver = Arc::new(PermissionResolver::new(
            database.pool().clone(),
            cache.clone(),
        ));
        let gate = Arc::new(AuthorizationGate::new(resolver.clone()));

        let app = Self {
            config,
            database,
            cache,
            auth,
            resolver,
            gate,
        };

        app.bootstrap_admin().await?;

        Ok(app)
    }

    /// Create the administrator account on first start
    ///
    /// Runs only when the users table is empty. The password comes from
    /// the environment when provided, otherwise one is generated and
    /// logged once.
    async fn bootstrap_admin(&self) -> Result<()> {
        let pool = self.database.pool();

        if user::count_users(pool).await? > 0 {
            return Ok(());
        }

        let (password, generated) = match &self.config.auth.admin_password {
            Some(p) => (p.clone(), false),
            None => (crypto::generate_token(12), true),
        };

        let password_hash = crypto::hash_password(&password)
            .map_err(|e| anyhow::anyhow!("Failed to hash bootstrap password: {}", e))?;

        let admin =
            user::create_user(pool, DEFAULT_ADMIN_EMAIL, Some("Administrator"), &password_hash)
                .await?;
        user::set_user_roles(pool, admin.id, &[ADMIN_ROLE_ID]).await?;

        if generated {
            tracing::warn!(
                email = DEFAULT_ADMIN_EMAIL,
                password = %password,
                "Created bootstrap administrator; change this password after first login"
            );
        } else {
            tracing::info!(email = DEFAULT_ADMIN_EMAIL, "Created bootstrap administrator");
        }

        Ok(())
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }
}
