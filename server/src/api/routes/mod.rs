//! API route modules

pub mod auth;
pub mod floors;
pub mod health;
pub mod hotel_informations;
pub mod hotel_settings;
pub mod hotels;
pub mod permissions;
pub mod roles;
pub mod room_types;
pub mod rooms;
pub mod users;

use std::time::Duration;

use crate::core::constants::CACHE_TTL_DEFAULT;

/// TTL applied to every cached view
pub(crate) fn cache_ttl() -> Duration {
    Duration::from_secs(CACHE_TTL_DEFAULT)
}
