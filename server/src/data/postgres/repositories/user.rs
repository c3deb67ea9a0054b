//! User repository

use sqlx::PgPool;

use crate::data::postgres::PostgresError;
use crate::data::types::UserRow;

const COLUMNS: &str = "id, email, display_name, password_hash, created_at, updated_at";

/// List all users
pub async fn list_users(pool: &PgPool) -> Result<Vec<UserRow>, PostgresError> {
    let rows = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {} FROM users ORDER BY id",
        COLUMNS
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Get a user by id
pub async fn get_user(pool: &PgPool, id: i64) -> Result<Option<UserRow>, PostgresError> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {} FROM users WHERE id = $1",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Get a user by email (emails are stored lowercase)
pub async fn get_user_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<UserRow>, PostgresError> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {} FROM users WHERE email = $1",
        COLUMNS
    ))
    .bind(email.to_lowercase())
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Count all users
pub async fn count_users(pool: &PgPool) -> Result<i64, PostgresError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Create a user with a pre-hashed password
pub async fn create_user(
    pool: &PgPool,
    email: &str,
    display_name: Option<&str>,
    password_hash: &str,
) -> Result<UserRow, PostgresError> {
    let now = chrono::Utc::now().timestamp();
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "INSERT INTO users (email, display_name, password_hash, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $4)
         RETURNING {}",
        COLUMNS
    ))
    .bind(email.to_lowercase())
    .bind(display_name)
    .bind(password_hash)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Role ids assigned to a user
pub async fn user_role_ids(pool: &PgPool, user_id: i64) -> Result<Vec<i64>, PostgresError> {
    let ids: Vec<i64> =
        sqlx::query_scalar("SELECT role_id FROM user_roles WHERE user_id = $1 ORDER BY role_id")
            .bind(user_id)
            .fetch_all(pool)
            .await?;
    Ok(ids)
}

/// Replace a user's role edge set atomically
pub async fn set_user_roles(
    pool: &PgPool,
    user_id: i64,
    role_ids: &[i64],
) -> Result<(), PostgresError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    for role_id in role_ids {
        sqlx::query(
            "INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(role_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}
