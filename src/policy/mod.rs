//! Authorization policy
//!
//! Pure decision functions over (principal, target). They return `Result`
//! rather than panicking or short-circuiting the request pipeline, so they
//! compose inside services and are testable without any HTTP or database
//! machinery.

use crate::domain::{Order, Role};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;

/// Succeeds iff the principal holds the admin role.
///
/// Gate for catalog mutation endpoints.
pub fn require_admin(principal: &AuthUser) -> Result<()> {
    if principal.has_role(Role::Admin) {
        return Ok(());
    }
    Err(AppError::Forbidden("Admin role required".to_string()))
}

/// Succeeds iff the principal is an admin or is the user identified by
/// `target_user_id`.
pub fn validate_self_or_admin(principal: &AuthUser, target_user_id: i64) -> Result<()> {
    if principal.has_role(Role::Admin) || principal.id == target_user_id {
        return Ok(());
    }
    Err(AppError::Forbidden("Access denied".to_string()))
}

/// Succeeds iff the principal may view the given order: admins see every
/// order, clients only their own.
pub fn validate_order_access(principal: &AuthUser, order: &Order) -> Result<()> {
    validate_self_or_admin(principal, order.client.id)
        .map_err(|_| AppError::Forbidden("Order does not belong to the logged user".to_string()))
}
