//! Health check endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::api::types::ApiError;
use crate::data::PostgresService;
use crate::data::cache::CacheService;

#[derive(Clone)]
pub struct HealthApiState {
    pub database: Arc<PostgresService>,
    pub cache: Arc<CacheService>,
}

/// Build health routes
pub fn routes(database: Arc<PostgresService>, cache: Arc<CacheService>) -> Router<()> {
    let state = HealthApiState { database, cache };
    Router::new().route("/", get(health)).with_state(state)
}

/// Health check (database + cache)
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service healthy"),
        (status = 503, description = "A dependency is unavailable")
    )
)]
pub async fn health(State(state): State<HealthApiState>) -> Result<Json<Value>, ApiError> {
    state
        .database
        .health_check()
        .await
        .map_err(|e| ApiError::service_unavailable(format!("database: {}", e)))?;

    state
        .cache
        .health_check()
        .await
        .map_err(|e| ApiError::service_unavailable(format!("cache: {}", e)))?;

    Ok(Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "cache_backend": state.cache.backend_name(),
    })))
}
