//! Declarative invalidation table
//!
//! One function per entity type, returning every cache key that a write to
//! that entity makes stale: the "all entities" collection view, the
//! "entity by id" view, and the related-collection view of every parent
//! the entity hangs off. Mutation handlers pass these sets to
//! [`super::CacheService::invalidate_caches`] instead of hand-listing keys
//! at each call site, so a view can only be missed here, and the tests
//! below check that every cached view template is produced by some write
//! set.
//!
//! An update that moves an entity to a different parent must invalidate
//! the sets for both the old and the new parent; handlers do this by
//! chaining the before/after key sets (duplicate deletes are harmless).

use super::key::CacheKey;

/// Keys invalidated by any write to a hotel
pub fn hotel_write(id: i64) -> Vec<String> {
    vec![CacheKey::all_hotels(), CacheKey::hotel(id)]
}

/// Keys invalidated by any write to a floor
pub fn floor_write(id: i64, hotel_id: i64) -> Vec<String> {
    vec![
        CacheKey::all_floors(),
        CacheKey::floor(id),
        CacheKey::hotel_floors(hotel_id),
    ]
}

/// Keys invalidated by any write to a room
pub fn room_write(id: i64, floor_id: i64, room_type_id: i64) -> Vec<String> {
    vec![
        CacheKey::all_rooms(),
        CacheKey::room(id),
        CacheKey::floor_rooms(floor_id),
        CacheKey::room_type_rooms(room_type_id),
    ]
}

/// Keys invalidated by any write to a room type
pub fn room_type_write(id: i64, hotel_id: i64) -> Vec<String> {
    vec![
        CacheKey::all_room_types(),
        CacheKey::room_type(id),
        CacheKey::hotel_room_types(hotel_id),
    ]
}

/// Keys invalidated by any write to a hotel setting
pub fn hotel_setting_write(id: i64, hotel_id: i64) -> Vec<String> {
    vec![
        CacheKey::all_hotel_settings(),
        CacheKey::hotel_setting(id),
        CacheKey::hotel_hotel_settings(hotel_id),
    ]
}

/// Keys invalidated by any write to a hotel information entry
pub fn hotel_information_write(id: i64, hotel_id: i64) -> Vec<String> {
    vec![
        CacheKey::all_hotel_informations(),
        CacheKey::hotel_information(id),
        CacheKey::hotel_hotel_informations(hotel_id),
    ]
}

/// Keys invalidated when a role's permission edges change
///
/// Access tokens issued before the change keep their permission snapshot
/// until they expire; only the derived views are refreshed here.
pub fn role_permissions_write(role_id: i64) -> Vec<String> {
    vec![CacheKey::role_permissions_flattened(role_id)]
}

/// Keys invalidated when permission rows change
pub fn permission_write() -> Vec<String> {
    vec![CacheKey::all_permissions(), CacheKey::permissions_map()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotel_write_set() {
        assert_eq!(hotel_write(1000), vec!["allHotels", "hotel1000"]);
    }

    #[test]
    fn test_floor_write_set() {
        assert_eq!(
            floor_write(7, 1000),
            vec!["allFloors", "floor7", "hotelFloors1000"]
        );
    }

    #[test]
    fn test_room_write_set() {
        assert_eq!(
            room_write(11, 7, 3),
            vec!["allRooms", "room11", "floorRooms7", "roomTypeRooms3"]
        );
    }

    #[test]
    fn test_room_type_write_set() {
        assert_eq!(
            room_type_write(3, 1000),
            vec!["allRoomTypes", "roomType3", "hotelRoomTypes1000"]
        );
    }

    #[test]
    fn test_hotel_setting_write_set() {
        assert_eq!(
            hotel_setting_write(5, 1000),
            vec!["allHotelSettings", "hotelSetting5", "hotelHotelSettings1000"]
        );
    }

    #[test]
    fn test_hotel_information_write_set() {
        assert_eq!(
            hotel_information_write(5, 1000),
            vec![
                "allHotelInformations",
                "hotelInformation5",
                "hotelHotelInformations1000"
            ]
        );
    }

    #[test]
    fn test_permission_write_sets() {
        assert_eq!(
            role_permissions_write(9),
            vec!["rolePermissionsFlattened9"]
        );
        assert_eq!(permission_write(), vec!["allPermissions", "permissionsMap"]);
    }

    /// Every cached view template must be refreshed by at least one write
    /// set. A view missing here would go stale with no runtime detection.
    #[test]
    fn test_every_view_is_covered_by_a_write_set() {
        let union: Vec<String> = [
            hotel_write(1),
            floor_write(2, 1),
            room_write(3, 2, 4),
            room_type_write(4, 1),
            hotel_setting_write(5, 1),
            hotel_information_write(6, 1),
            role_permissions_write(7),
            permission_write(),
        ]
        .into_iter()
        .flatten()
        .collect();

        let views = [
            CacheKey::all_hotels(),
            CacheKey::hotel(1),
            CacheKey::hotel_floors(1),
            CacheKey::hotel_room_types(1),
            CacheKey::hotel_hotel_settings(1),
            CacheKey::hotel_hotel_informations(1),
            CacheKey::all_floors(),
            CacheKey::floor(2),
            CacheKey::floor_rooms(2),
            CacheKey::all_rooms(),
            CacheKey::room(3),
            CacheKey::room_type_rooms(4),
            CacheKey::all_room_types(),
            CacheKey::room_type(4),
            CacheKey::all_hotel_settings(),
            CacheKey::hotel_setting(5),
            CacheKey::all_hotel_informations(),
            CacheKey::hotel_information(6),
            CacheKey::all_permissions(),
            CacheKey::permissions_map(),
            CacheKey::role_permissions_flattened(7),
        ];

        for view in views {
            assert!(
                union.contains(&view),
                "cached view {} is not invalidated by any write set",
                view
            );
        }
    }

    /// Each entity write set carries the collection key, the by-id key,
    /// and one related-collection key per parent edge.
    #[test]
    fn test_write_sets_have_expected_shape() {
        // (set, expected parent edge count)
        let cases = [
            (hotel_write(1), 0),
            (floor_write(2, 1), 1),
            (room_write(3, 2, 4), 2),
            (room_type_write(4, 1), 1),
            (hotel_setting_write(5, 1), 1),
            (hotel_information_write(6, 1), 1),
        ];

        for (set, parents) in cases {
            assert_eq!(set.len(), 2 + parents);
            assert!(set[0].starts_with("all"));
        }
    }
}
