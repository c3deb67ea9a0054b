//! Role repository

use sqlx::PgPool;

use crate::data::postgres::PostgresError;
use crate::data::types::RoleRow;

/// List all roles, in id order
pub async fn list_roles(pool: &PgPool) -> Result<Vec<RoleRow>, PostgresError> {
    let rows = sqlx::query_as::<_, RoleRow>("SELECT id, name FROM roles ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Get a role by id
pub async fn get_role(pool: &PgPool, id: i64) -> Result<Option<RoleRow>, PostgresError> {
    let row = sqlx::query_as::<_, RoleRow>("SELECT id, name FROM roles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Create a role
pub async fn create_role(pool: &PgPool, name: &str) -> Result<RoleRow, PostgresError> {
    let row = sqlx::query_as::<_, RoleRow>(
        "INSERT INTO roles (name) VALUES ($1) RETURNING id, name",
    )
    .bind(name)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Rename a role; returns the updated row, or None if the id is unknown
pub async fn update_role(
    pool: &PgPool,
    id: i64,
    name: &str,
) -> Result<Option<RoleRow>, PostgresError> {
    let row = sqlx::query_as::<_, RoleRow>(
        "UPDATE roles SET name = $2 WHERE id = $1 RETURNING id, name",
    )
    .bind(id)
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Delete a role; returns the deleted row, or None if the id is unknown
pub async fn delete_role(pool: &PgPool, id: i64) -> Result<Option<RoleRow>, PostgresError> {
    let row = sqlx::query_as::<_, RoleRow>("DELETE FROM roles WHERE id = $1 RETURNING id, name")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Flattened permission ids of a role
pub async fn role_permission_ids(
    pool: &PgPool,
    role_id: i64,
) -> Result<Vec<i64>, PostgresError> {
    let ids: Vec<i64> = sqlx::query_scalar(
        "SELECT permission_id FROM role_permissions WHERE role_id = $1 ORDER BY permission_id",
    )
    .bind(role_id)
    .fetch_all(pool)
    .await?;
    Ok(ids)
}

/// Replace a role's permission edge set atomically
pub async fn set_role_permissions(
    pool: &PgPool,
    role_id: i64,
    permission_ids: &[i64],
) -> Result<(), PostgresError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM role_permissions WHERE role_id = $1")
        .bind(role_id)
        .execute(&mut *tx)
        .await?;

    for permission_id in permission_ids {
        sqlx::query(
            "INSERT INTO role_permissions (role_id, permission_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(role_id)
        .bind(permission_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}
