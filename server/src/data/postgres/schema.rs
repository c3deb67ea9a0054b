//! PostgreSQL schema definitions

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema SQL for PostgreSQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: Schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at BIGINT NOT NULL,
    description TEXT
);

-- =============================================================================
-- 1. Hotels
-- =============================================================================
CREATE TABLE IF NOT EXISTS hotels (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL CHECK(length(name) >= 1 AND length(name) <= 200),
    address TEXT NOT NULL,
    city TEXT NOT NULL,
    stars SMALLINT NOT NULL DEFAULT 0 CHECK(stars >= 0 AND stars <= 5),
    created_at BIGINT NOT NULL,
    updated_at BIGINT NOT NULL
);

-- =============================================================================
-- 2. Floors (belong to a hotel)
-- =============================================================================
CREATE TABLE IF NOT EXISTS floors (
    id BIGSERIAL PRIMARY KEY,
    hotel_id BIGINT NOT NULL REFERENCES hotels(id) ON DELETE RESTRICT,
    number INTEGER NOT NULL,
    name TEXT CHECK(name IS NULL OR length(name) <= 100),
    created_at BIGINT NOT NULL,
    updated_at BIGINT NOT NULL,
    UNIQUE(hotel_id, number)
);

CREATE INDEX IF NOT EXISTS idx_floors_hotel ON floors(hotel_id);

-- =============================================================================
-- 3. Room types (belong to a hotel)
-- =============================================================================
CREATE TABLE IF NOT EXISTS room_types (
    id BIGSERIAL PRIMARY KEY,
    hotel_id BIGINT NOT NULL REFERENCES hotels(id) ON DELETE RESTRICT,
    name TEXT NOT NULL CHECK(length(name) >= 1 AND length(name) <= 100),
    description TEXT,
    capacity INTEGER NOT NULL CHECK(capacity >= 1),
    price_cents BIGINT NOT NULL CHECK(price_cents >= 0),
    created_at BIGINT NOT NULL,
    updated_at BIGINT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_room_types_hotel ON room_types(hotel_id);

-- =============================================================================
-- 4. Rooms (belong to a floor and a room type)
-- =============================================================================
CREATE TABLE IF NOT EXISTS rooms (
    id BIGSERIAL PRIMARY KEY,
    floor_id BIGINT NOT NULL REFERENCES floors(id) ON DELETE RESTRICT,
    room_type_id BIGINT NOT NULL REFERENCES room_types(id) ON DELETE RESTRICT,
    number TEXT NOT NULL CHECK(length(number) >= 1 AND length(number) <= 20),
    created_at BIGINT NOT NULL,
    updated_at BIGINT NOT NULL,
    UNIQUE(floor_id, number)
);

CREATE INDEX IF NOT EXISTS idx_rooms_floor ON rooms(floor_id);
CREATE INDEX IF NOT EXISTS idx_rooms_room_type ON rooms(room_type_id);

-- =============================================================================
-- 5. Hotel settings (named values per hotel)
-- =============================================================================
CREATE TABLE IF NOT EXISTS hotel_settings (
    id BIGSERIAL PRIMARY KEY,
    hotel_id BIGINT NOT NULL REFERENCES hotels(id) ON DELETE RESTRICT,
    name TEXT NOT NULL CHECK(length(name) >= 1 AND length(name) <= 100),
    value TEXT NOT NULL,
    created_at BIGINT NOT NULL,
    updated_at BIGINT NOT NULL,
    UNIQUE(hotel_id, name)
);

CREATE INDEX IF NOT EXISTS idx_hotel_settings_hotel ON hotel_settings(hotel_id);

-- =============================================================================
-- 6. Hotel informations (guest-facing content per hotel)
-- =============================================================================
CREATE TABLE IF NOT EXISTS hotel_informations (
    id BIGSERIAL PRIMARY KEY,
    hotel_id BIGINT NOT NULL REFERENCES hotels(id) ON DELETE RESTRICT,
    title TEXT NOT NULL CHECK(length(title) >= 1 AND length(title) <= 200),
    content TEXT NOT NULL,
    created_at BIGINT NOT NULL,
    updated_at BIGINT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_hotel_informations_hotel ON hotel_informations(hotel_id);

-- =============================================================================
-- 7. Users
-- =============================================================================
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    email TEXT NOT NULL UNIQUE CHECK(length(email) >= 3),
    display_name TEXT CHECK(display_name IS NULL OR length(display_name) <= 100),
    password_hash TEXT NOT NULL,
    created_at BIGINT NOT NULL,
    updated_at BIGINT NOT NULL
);

-- =============================================================================
-- 8. Roles and permissions
-- =============================================================================
CREATE TABLE IF NOT EXISTS roles (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL UNIQUE CHECK(length(name) >= 1 AND length(name) <= 100)
);

CREATE TABLE IF NOT EXISTS permissions (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL UNIQUE CHECK(length(name) >= 1 AND length(name) <= 100)
);

CREATE TABLE IF NOT EXISTS role_permissions (
    role_id BIGINT NOT NULL REFERENCES roles(id) ON DELETE CASCADE,
    permission_id BIGINT NOT NULL REFERENCES permissions(id) ON DELETE CASCADE,
    PRIMARY KEY (role_id, permission_id)
);

CREATE TABLE IF NOT EXISTS user_roles (
    user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    role_id BIGINT NOT NULL REFERENCES roles(id) ON DELETE CASCADE,
    PRIMARY KEY (user_id, role_id)
);

CREATE INDEX IF NOT EXISTS idx_role_permissions_role ON role_permissions(role_id);
CREATE INDEX IF NOT EXISTS idx_user_roles_user ON user_roles(user_id);
"#;

/// Default data: seeded permissions and the administrator role
///
/// Permission names are referenced by the route guards; ids are fixed so
/// cached views stay consistent across environments.
pub const DEFAULT_DATA: &str = r#"
INSERT INTO permissions (id, name) VALUES
    (1, 'hotels.view'),
    (2, 'hotels.manage'),
    (3, 'floors.view'),
    (4, 'floors.manage'),
    (5, 'rooms.view'),
    (6, 'rooms.manage'),
    (7, 'room_types.view'),
    (8, 'room_types.manage'),
    (9, 'hotel_settings.view'),
    (10, 'hotel_settings.manage'),
    (11, 'hotel_informations.view'),
    (12, 'hotel_informations.manage'),
    (13, 'permissions.view'),
    (14, 'roles.view'),
    (15, 'roles.manage'),
    (16, 'users.manage')
ON CONFLICT (id) DO NOTHING;

SELECT setval('permissions_id_seq', 16, true);

INSERT INTO roles (id, name) VALUES (1, 'administrator')
ON CONFLICT (id) DO NOTHING;

SELECT setval('roles_id_seq', 1, true);

INSERT INTO role_permissions (role_id, permission_id)
SELECT 1, id FROM permissions
ON CONFLICT DO NOTHING;
"#;

/// Seeded permission names, in id order
///
/// Kept in sync with [`DEFAULT_DATA`]; the auth extractor tests check the
/// guard marker names against this list.
pub const PERMISSION_NAMES: &[&str] = &[
    "hotels.view",
    "hotels.manage",
    "floors.view",
    "floors.manage",
    "rooms.view",
    "rooms.manage",
    "room_types.view",
    "room_types.manage",
    "hotel_settings.view",
    "hotel_settings.manage",
    "hotel_informations.view",
    "hotel_informations.manage",
    "permissions.view",
    "roles.view",
    "roles.manage",
    "users.manage",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_names_match_seed_sql() {
        for name in PERMISSION_NAMES {
            assert!(
                DEFAULT_DATA.contains(&format!("'{}'", name)),
                "permission {} missing from DEFAULT_DATA",
                name
            );
        }
        assert!(DEFAULT_DATA.contains(&format!(
            "setval('permissions_id_seq', {}, true)",
            PERMISSION_NAMES.len()
        )));
    }

    #[test]
    fn test_schema_contains_all_tables() {
        for table in [
            "hotels",
            "floors",
            "room_types",
            "rooms",
            "hotel_settings",
            "hotel_informations",
            "users",
            "roles",
            "permissions",
            "role_permissions",
            "user_roles",
        ] {
            assert!(
                SCHEMA.contains(&format!("CREATE TABLE IF NOT EXISTS {} ", table)),
                "schema missing table {}",
                table
            );
        }
    }
}
