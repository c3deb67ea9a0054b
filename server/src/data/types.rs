//! Shared data types
//!
//! Row structs returned by the repositories. They derive `Serialize` /
//! `Deserialize` because cached views store them JSON-encoded.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Hotel row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct HotelRow {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub stars: i16,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Floor row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FloorRow {
    pub id: i64,
    pub hotel_id: i64,
    pub number: i32,
    pub name: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Room type row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RoomTypeRow {
    pub id: i64,
    pub hotel_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub capacity: i32,
    pub price_cents: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Room row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RoomRow {
    pub id: i64,
    pub floor_id: i64,
    pub room_type_id: i64,
    pub number: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Hotel setting row (one named value per hotel)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct HotelSettingRow {
    pub id: i64,
    pub hotel_id: i64,
    pub name: String,
    pub value: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Hotel information row (free-form content shown to guests)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct HotelInformationRow {
    pub id: i64,
    pub hotel_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// User row
///
/// `password_hash` stays inside the data layer; DTOs never carry it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub display_name: Option<String>,
    pub password_hash: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Role row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RoleRow {
    pub id: i64,
    pub name: String,
}

/// Permission row
///
/// Seeded at migration time; the name to id mapping is immutable once
/// created (names are unique).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PermissionRow {
    pub id: i64,
    pub name: String,
}
