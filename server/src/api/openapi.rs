//! OpenAPI specification

use axum::response::{IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{
    auth, floors, health, hotel_informations, hotel_settings, hotels, permissions, roles,
    room_types, rooms, users,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Innkeeper API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Hotel management backend"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "hotels", description = "Hotel management"),
        (name = "floors", description = "Floor management"),
        (name = "rooms", description = "Room management"),
        (name = "room-types", description = "Room type management"),
        (name = "hotel-settings", description = "Hotel settings"),
        (name = "hotel-informations", description = "Hotel information entries"),
        (name = "permissions", description = "Permission listing"),
        (name = "roles", description = "Role management"),
        (name = "users", description = "User administration")
    ),
    paths(
        // Health
        health::health,
        // Auth
        auth::login,
        auth::refresh,
        auth::logout,
        // Hotels
        hotels::list_hotels,
        hotels::get_hotel,
        hotels::create_hotel,
        hotels::update_hotel,
        hotels::delete_hotel,
        hotels::list_hotel_floors,
        hotels::list_hotel_room_types,
        hotels::list_settings_for_hotel,
        hotels::list_informations_for_hotel,
        // Floors
        floors::list_floors,
        floors::get_floor,
        floors::create_floor,
        floors::update_floor,
        floors::delete_floor,
        floors::list_floor_rooms,
        // Rooms
        rooms::list_rooms,
        rooms::get_room,
        rooms::create_room,
        rooms::update_room,
        rooms::delete_room,
        // Room types
        room_types::list_room_types,
        room_types::get_room_type,
        room_types::create_room_type,
        room_types::update_room_type,
        room_types::delete_room_type,
        room_types::list_room_type_rooms,
        // Hotel settings
        hotel_settings::list_hotel_settings,
        hotel_settings::get_hotel_setting,
        hotel_settings::create_hotel_setting,
        hotel_settings::update_hotel_setting,
        hotel_settings::delete_hotel_setting,
        // Hotel informations
        hotel_informations::list_hotel_informations,
        hotel_informations::get_hotel_information,
        hotel_informations::create_hotel_information,
        hotel_informations::update_hotel_information,
        hotel_informations::delete_hotel_information,
        // Permissions & roles
        permissions::list_permissions,
        roles::list_roles,
        roles::get_role,
        roles::create_role,
        roles::update_role,
        roles::delete_role,
        roles::get_role_permissions,
        roles::set_role_permissions,
        // Users
        users::list_users,
        users::create_user,
        users::get_user_roles,
        users::set_user_roles,
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI JSON document
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
