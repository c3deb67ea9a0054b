//! Cache key builders
//!
//! Every cached view has exactly one key. Keys are flat strings (no
//! hierarchy, no wildcards): a view that must be refreshed after a write
//! has to be listed explicitly in that write's invalidation set, see
//! [`super::invalidation`].

/// Cache key builder for all cached views
pub struct CacheKey;

impl CacheKey {
    // =========================================================================
    // Hotels
    // =========================================================================

    /// Cache key for the list of all hotels
    pub fn all_hotels() -> String {
        "allHotels".to_string()
    }

    /// Cache key for a hotel by id
    pub fn hotel(id: i64) -> String {
        format!("hotel{}", id)
    }

    /// Cache key for a hotel's floors
    pub fn hotel_floors(hotel_id: i64) -> String {
        format!("hotelFloors{}", hotel_id)
    }

    /// Cache key for a hotel's room types
    pub fn hotel_room_types(hotel_id: i64) -> String {
        format!("hotelRoomTypes{}", hotel_id)
    }

    /// Cache key for a hotel's settings
    pub fn hotel_hotel_settings(hotel_id: i64) -> String {
        format!("hotelHotelSettings{}", hotel_id)
    }

    /// Cache key for a hotel's information entries
    pub fn hotel_hotel_informations(hotel_id: i64) -> String {
        format!("hotelHotelInformations{}", hotel_id)
    }

    // =========================================================================
    // Floors
    // =========================================================================

    /// Cache key for the list of all floors
    pub fn all_floors() -> String {
        "allFloors".to_string()
    }

    /// Cache key for a floor by id
    pub fn floor(id: i64) -> String {
        format!("floor{}", id)
    }

    /// Cache key for a floor's rooms
    pub fn floor_rooms(floor_id: i64) -> String {
        format!("floorRooms{}", floor_id)
    }

    // =========================================================================
    // Rooms
    // =========================================================================

    /// Cache key for the list of all rooms
    pub fn all_rooms() -> String {
        "allRooms".to_string()
    }

    /// Cache key for a room by id
    pub fn room(id: i64) -> String {
        format!("room{}", id)
    }

    // =========================================================================
    // Room types
    // =========================================================================

    /// Cache key for the list of all room types
    pub fn all_room_types() -> String {
        "allRoomTypes".to_string()
    }

    /// Cache key for a room type by id
    pub fn room_type(id: i64) -> String {
        format!("roomType{}", id)
    }

    /// Cache key for a room type's rooms
    pub fn room_type_rooms(room_type_id: i64) -> String {
        format!("roomTypeRooms{}", room_type_id)
    }

    // =========================================================================
    // Hotel settings
    // =========================================================================

    /// Cache key for the list of all hotel settings
    pub fn all_hotel_settings() -> String {
        "allHotelSettings".to_string()
    }

    /// Cache key for a hotel setting by id
    pub fn hotel_setting(id: i64) -> String {
        format!("hotelSetting{}", id)
    }

    // =========================================================================
    // Hotel informations
    // =========================================================================

    /// Cache key for the list of all hotel information entries
    pub fn all_hotel_informations() -> String {
        "allHotelInformations".to_string()
    }

    /// Cache key for a hotel information entry by id
    pub fn hotel_information(id: i64) -> String {
        format!("hotelInformation{}", id)
    }

    // =========================================================================
    // Permissions & roles
    // =========================================================================

    /// Cache key for the list of all permissions
    pub fn all_permissions() -> String {
        "allPermissions".to_string()
    }

    /// Cache key for the permission name to id map
    pub fn permissions_map() -> String {
        "permissionsMap".to_string()
    }

    /// Cache key for a role's flattened permission id list
    pub fn role_permissions_flattened(role_id: i64) -> String {
        format!("rolePermissionsFlattened{}", role_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotel_keys() {
        assert_eq!(CacheKey::all_hotels(), "allHotels");
        assert_eq!(CacheKey::hotel(42), "hotel42");
        assert_eq!(CacheKey::hotel_floors(42), "hotelFloors42");
        assert_eq!(CacheKey::hotel_room_types(42), "hotelRoomTypes42");
        assert_eq!(CacheKey::hotel_hotel_settings(42), "hotelHotelSettings42");
        assert_eq!(
            CacheKey::hotel_hotel_informations(42),
            "hotelHotelInformations42"
        );
    }

    #[test]
    fn test_floor_keys() {
        assert_eq!(CacheKey::all_floors(), "allFloors");
        assert_eq!(CacheKey::floor(7), "floor7");
        assert_eq!(CacheKey::floor_rooms(7), "floorRooms7");
    }

    #[test]
    fn test_room_keys() {
        assert_eq!(CacheKey::all_rooms(), "allRooms");
        assert_eq!(CacheKey::room(11), "room11");
    }

    #[test]
    fn test_room_type_keys() {
        assert_eq!(CacheKey::all_room_types(), "allRoomTypes");
        assert_eq!(CacheKey::room_type(3), "roomType3");
        assert_eq!(CacheKey::room_type_rooms(3), "roomTypeRooms3");
    }

    #[test]
    fn test_setting_and_information_keys() {
        assert_eq!(CacheKey::all_hotel_settings(), "allHotelSettings");
        assert_eq!(CacheKey::hotel_setting(5), "hotelSetting5");
        assert_eq!(CacheKey::all_hotel_informations(), "allHotelInformations");
        assert_eq!(CacheKey::hotel_information(5), "hotelInformation5");
    }

    #[test]
    fn test_permission_keys() {
        assert_eq!(CacheKey::all_permissions(), "allPermissions");
        assert_eq!(CacheKey::permissions_map(), "permissionsMap");
        assert_eq!(
            CacheKey::role_permissions_flattened(9),
            "rolePermissionsFlattened9"
        );
    }
}
