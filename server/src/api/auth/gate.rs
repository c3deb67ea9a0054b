//! Authorization gate
//!
//! Checks a named permission requirement against the caller's claims:
//! the name resolves to an id through the cached permission map, then the
//! id is looked up in the claims' permission snapshot. No database
//! round-trip in the common case.
//!
//! Fail-closed: an unknown permission name, an id missing from the
//! claims, or any error during resolution all produce the same denial.

use std::collections::HashMap;
use std::sync::Arc;

use super::jwt::AccessClaims;
use super::resolver::PermissionResolver;
use crate::api::types::ApiError;

/// Authorization gate consulted by the route guards
pub struct AuthorizationGate {
    resolver: Arc<PermissionResolver>,
}

impl AuthorizationGate {
    /// Create a new gate
    pub fn new(resolver: Arc<PermissionResolver>) -> Self {
        Self { resolver }
    }

    /// The uniform denial response
    ///
    /// Deliberately carries no detail about which permission was missing,
    /// so callers cannot probe the authorization model.
    fn denied() -> ApiError {
        ApiError::unauthorized("PERMISSION_DENIED", "Unauthorized")
    }

    /// Check that the claims satisfy the named permission
    pub async fn authorize(&self, claims: &AccessClaims, permission: &str) -> Result<(), ApiError> {
        let map = match self.resolver.permission_ids_by_name().await {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(error = %e, "Permission resolution failed, denying");
                return Err(Self::denied());
            }
        };

        if is_permitted(&map, permission, &claims.permissions) {
            Ok(())
        } else {
            Err(Self::denied())
        }
    }
}

/// Membership check against a resolved permission map
///
/// An unknown name is a denial, not an error.
fn is_permitted(map: &HashMap<String, i64>, permission: &str, claim_ids: &[i64]) -> bool {
    map.get(permission)
        .map(|id| claim_ids.contains(id))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permission_map() -> HashMap<String, i64> {
        HashMap::from([
            ("rooms.view".to_string(), 5),
            ("room_types.view".to_string(), 7),
            ("hotels.manage".to_string(), 2),
        ])
    }

    #[test]
    fn test_claims_grant_resolved_ids() {
        let map = permission_map();
        let claims = vec![5, 7];

        assert!(is_permitted(&map, "rooms.view", &claims));
        assert!(is_permitted(&map, "room_types.view", &claims));
        assert!(!is_permitted(&map, "hotels.manage", &claims));
    }

    #[test]
    fn test_unknown_permission_is_denied() {
        let map = permission_map();
        assert!(!is_permitted(&map, "bookings.manage", &[5, 7]));
    }

    #[test]
    fn test_empty_claims_denied() {
        let map = permission_map();
        assert!(!is_permitted(&map, "rooms.view", &[]));
    }

    /// Claims are a snapshot: revoking a permission from the role after
    /// token issuance does not change the outcome for that token.
    #[test]
    fn test_snapshot_survives_role_revocation() {
        let map = permission_map();

        // Permission set of the role at issue time
        let role_permissions_at_issue = vec![5i64, 7];
        let claims = role_permissions_at_issue.clone();

        // Permission 7 revoked from the role afterwards
        let role_permissions_now = vec![5i64];
        assert!(!role_permissions_now.contains(&7));

        // The gate consults the claims snapshot, not the live role
        assert!(is_permitted(&map, "room_types.view", &claims));
    }
}
