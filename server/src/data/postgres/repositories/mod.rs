//! Entity repositories
//!
//! Plain-SQL free functions per entity. Repositories never touch the
//! cache: read handlers wrap these in `CacheService::remember_json` and
//! mutation handlers follow them with `CacheService::invalidate_caches`.

pub mod floor;
pub mod hotel;
pub mod hotel_information;
pub mod hotel_setting;
pub mod permission;
pub mod role;
pub mod room;
pub mod room_type;
pub mod user;
