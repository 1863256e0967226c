//! Authorization policy.
//!
//! Pure decision functions over [`Role`] and grant facts. Handlers and
//! usecases call these instead of comparing role strings inline, so every
//! access rule lives in one place.

use crate::role::Role;

/// A category is readable by admins unconditionally and by regular users
/// only when an explicit grant exists.
pub fn can_read_category(role: Role, has_grant: bool) -> bool {
    role.is_admin() || has_grant
}

/// Creating, updating, and deleting categories is admin-only. Grants never
/// confer write access.
pub fn can_write_category(role: Role) -> bool {
    role.is_admin()
}

/// Granting and revoking category permissions is admin-only.
pub fn can_manage_permissions(role: Role) -> bool {
    role.is_admin()
}

/// Listing, inspecting, updating, and deleting other users is admin-only.
pub fn can_manage_users(role: Role) -> bool {
    role.is_admin()
}
