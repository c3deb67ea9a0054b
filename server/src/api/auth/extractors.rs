//! Permission guard extractors for Axum handlers
//!
//! Handlers declare the permission they require through a marker type:
//!
//! ```no_run
//! # use innkeeper_server::api::auth::{Protected, ViewHotels};
//! # use innkeeper_server::api::types::ApiError;
//! pub async fn list_hotels(auth: Protected<ViewHotels>) -> Result<(), ApiError> {
//!     // auth.claims - verified claims with the permission snapshot
//!     Ok(())
//! }
//! ```
//!
//! The extractor requires `require_auth` to have run (missing context is
//! an internal error, never a silent allow) and resolves the marker's
//! permission name through the gate. Denials are uniform.

use std::marker::PhantomData;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::gate::AuthorizationGate;
use super::jwt::AccessClaims;
use super::middleware::AuthContext;
use crate::api::types::ApiError;

// ============================================================================
// Permission Markers
// ============================================================================

/// Marker trait for permission requirements
pub trait RequiredPermission: Send + Sync + 'static {
    /// The permission name, as seeded in the permission table
    const NAME: &'static str;
}

pub struct ViewHotels;
impl RequiredPermission for ViewHotels {
    const NAME: &'static str = "hotels.view";
}

pub struct ManageHotels;
impl RequiredPermission for ManageHotels {
    const NAME: &'static str = "hotels.manage";
}

pub struct ViewFloors;
impl RequiredPermission for ViewFloors {
    const NAME: &'static str = "floors.view";
}

pub struct ManageFloors;
impl RequiredPermission for ManageFloors {
    const NAME: &'static str = "floors.manage";
}

pub struct ViewRooms;
impl RequiredPermission for ViewRooms {
    const NAME: &'static str = "rooms.view";
}

pub struct ManageRooms;
impl RequiredPermission for ManageRooms {
    const NAME: &'static str = "rooms.manage";
}

pub struct ViewRoomTypes;
impl RequiredPermission for ViewRoomTypes {
    const NAME: &'static str = "room_types.view";
}

pub struct ManageRoomTypes;
impl RequiredPermission for ManageRoomTypes {
    const NAME: &'static str = "room_types.manage";
}

pub struct ViewHotelSettings;
impl RequiredPermission for ViewHotelSettings {
    const NAME: &'static str = "hotel_settings.view";
}

pub struct ManageHotelSettings;
impl RequiredPermission for ManageHotelSettings {
    const NAME: &'static str = "hotel_settings.manage";
}

pub struct ViewHotelInformations;
impl RequiredPermission for ViewHotelInformations {
    const NAME: &'static str = "hotel_informations.view";
}

pub struct ManageHotelInformations;
impl RequiredPermission for ManageHotelInformations {
    const NAME: &'static str = "hotel_informations.manage";
}

pub struct ViewPermissions;
impl RequiredPermission for ViewPermissions {
    const NAME: &'static str = "permissions.view";
}

pub struct ViewRoles;
impl RequiredPermission for ViewRoles {
    const NAME: &'static str = "roles.view";
}

pub struct ManageRoles;
impl RequiredPermission for ManageRoles {
    const NAME: &'static str = "roles.manage";
}

pub struct ManageUsers;
impl RequiredPermission for ManageUsers {
    const NAME: &'static str = "users.manage";
}

// ============================================================================
// Guard extractor
// ============================================================================

/// Rejection type for the permission guard
pub enum GuardRejection {
    /// Authorization denied (uniform, no permission detail)
    Denied(ApiError),
    /// Auth context not available (middleware not applied)
    MissingContext,
}

impl axum::response::IntoResponse for GuardRejection {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::Denied(e) => e.into_response(),
            Self::MissingContext => {
                ApiError::internal("Auth context not available").into_response()
            }
        }
    }
}

/// Verified permission guard with parameterized requirement.
///
/// Extraction succeeds only when the request passed `require_auth` and
/// the claims snapshot satisfies the marker's permission.
pub struct Protected<P: RequiredPermission> {
    /// The verified token claims
    pub claims: AccessClaims,
    _permission: PhantomData<P>,
}

impl<S, P> FromRequestParts<S> for Protected<P>
where
    S: Send + Sync,
    P: RequiredPermission,
{
    type Rejection = GuardRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(GuardRejection::MissingContext)?;

        let gate = parts
            .extensions
            .get::<Arc<AuthorizationGate>>()
            .cloned()
            .ok_or(GuardRejection::MissingContext)?;

        gate.authorize(&context.claims, P::NAME)
            .await
            .map_err(GuardRejection::Denied)?;

        Ok(Self {
            claims: context.claims,
            _permission: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::postgres::schema::PERMISSION_NAMES;

    /// Every guard marker must reference a seeded permission name;
    /// a typo here would deny all access to the affected routes.
    #[test]
    fn test_marker_names_are_seeded() {
        let names = [
            ViewHotels::NAME,
            ManageHotels::NAME,
            ViewFloors::NAME,
            ManageFloors::NAME,
            ViewRooms::NAME,
            ManageRooms::NAME,
            ViewRoomTypes::NAME,
            ManageRoomTypes::NAME,
            ViewHotelSettings::NAME,
            ManageHotelSettings::NAME,
            ViewHotelInformations::NAME,
            ManageHotelInformations::NAME,
            ViewPermissions::NAME,
            ViewRoles::NAME,
            ManageRoles::NAME,
            ManageUsers::NAME,
        ];

        for name in names {
            assert!(
                PERMISSION_NAMES.contains(&name),
                "guard permission {} is not seeded",
                name
            );
        }
    }
}
