//! Permission resolution with cached derived views
//!
//! Maintains two views over the permission tables, each cached under its
//! own key with the default TTL:
//! - `permissionsMap`: name to id map for all permissions. Guards declare
//!   requirements by name, but claims carry ids, so every check resolves
//!   through this map.
//! - `rolePermissionsFlattened{roleId}`: a role's permission ids as a
//!   bare list, used when computing a user's snapshot at token issue.
//!
//! Role mutations invalidate the per-role view (see
//! `data::cache::invalidation::role_permissions_write`); the views are
//! otherwise refreshed only by TTL expiry.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use crate::core::constants::CACHE_TTL_DEFAULT;
use crate::data::DataError;
use crate::data::cache::{CacheKey, CacheService};
use crate::data::postgres::repositories::{permission, role, user};

/// Permission resolver with cached lookups
pub struct PermissionResolver {
    pool: PgPool,
    cache: Arc<CacheService>,
}

impl PermissionResolver {
    /// Create a new resolver
    pub fn new(pool: PgPool, cache: Arc<CacheService>) -> Self {
        Self { pool, cache }
    }

    fn ttl() -> Duration {
        Duration::from_secs(CACHE_TTL_DEFAULT)
    }

    /// Name to id map for all permissions (cached)
    pub async fn permission_ids_by_name(&self) -> Result<HashMap<String, i64>, DataError> {
        let pool = self.pool.clone();
        self.cache
            .remember_json(&CacheKey::permissions_map(), Self::ttl(), move || async move {
                let rows = permission::list_permissions(&pool).await?;
                Ok::<_, DataError>(rows.into_iter().map(|p| (p.name, p.id)).collect())
            })
            .await
    }

    /// A role's flattened permission id list (cached per role)
    pub async fn role_permission_ids(&self, role_id: i64) -> Result<Vec<i64>, DataError> {
        let pool = self.pool.clone();
        self.cache
            .remember_json(
                &CacheKey::role_permissions_flattened(role_id),
                Self::ttl(),
                move || async move {
                    Ok::<_, DataError>(role::role_permission_ids(&pool, role_id).await?)
                },
            )
            .await
    }

    /// A user's effective permission set: the union of permission ids
    /// across all assigned roles.
    ///
    /// Called at token issue time only; the result is embedded in the
    /// access token as a snapshot and never re-read during its life.
    pub async fn permission_ids_for_user(&self, user_id: i64) -> Result<Vec<i64>, DataError> {
        let role_ids = user::user_role_ids(&self.pool, user_id).await?;

        let mut ids = BTreeSet::new();
        for role_id in role_ids {
            ids.extend(self.role_permission_ids(role_id).await?);
        }
        Ok(ids.into_iter().collect())
    }
}
