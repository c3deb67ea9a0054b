//! Permission repository
//!
//! Permissions are seeded at migration time and read-only at runtime; the
//! name to id mapping is immutable once created.

use sqlx::PgPool;

use crate::data::postgres::PostgresError;
use crate::data::types::PermissionRow;

/// List all permissions, in id order
pub async fn list_permissions(pool: &PgPool) -> Result<Vec<PermissionRow>, PostgresError> {
    let rows =
        sqlx::query_as::<_, PermissionRow>("SELECT id, name FROM permissions ORDER BY id")
            .fetch_all(pool)
            .await?;
    Ok(rows)
}
