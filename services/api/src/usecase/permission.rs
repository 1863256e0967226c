use chrono::Utc;

use crate::domain::repository::{CategoryRepository, PermissionRepository, UserRepository};
use crate::domain::types::{User, UserPermissionSet};
use crate::error::ApiError;

// ── GrantPermissions (replace-all) ───────────────────────────────────────────

pub struct GrantPermissionsInput {
    pub target_user_id: i32,
    pub category_ids: Vec<i32>,
}

pub struct GrantPermissionsUseCase<U: UserRepository, C: CategoryRepository, P: PermissionRepository>
{
    pub users: U,
    pub categories: C,
    pub permissions: P,
}

impl<U: UserRepository, C: CategoryRepository, P: PermissionRepository>
    GrantPermissionsUseCase<U, C, P>
{
    /// Replaces the target's entire grant set: every existing grant is
    /// deleted, then one grant per requested category is inserted, in one
    /// transaction. Granting an empty list revokes everything. Returns the
    /// target user for response rendering.
    pub async fn execute(&self, caller_id: i32, input: GrantPermissionsInput) -> Result<User, ApiError> {
        let target = self
            .users
            .find_by_id(input.target_user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        let existing = self
            .categories
            .filter_existing_ids(&input.category_ids)
            .await?;
        let mut missing: Vec<i32> = input
            .category_ids
            .iter()
            .copied()
            .filter(|id| !existing.contains(id))
            .collect();
        if !missing.is_empty() {
            missing.sort_unstable();
            missing.dedup();
            return Err(ApiError::UnknownCategories(missing));
        }

        self.permissions
            .replace_for_user(target.id, &input.category_ids, caller_id, Utc::now())
            .await?;
        Ok(target)
    }
}

// ── RevokePermission ─────────────────────────────────────────────────────────

pub struct RevokePermissionUseCase<P: PermissionRepository> {
    pub permissions: P,
}

impl<P: PermissionRepository> RevokePermissionUseCase<P> {
    /// Removes exactly one (user, category) grant; the rest of the user's
    /// grants are untouched.
    pub async fn execute(&self, user_id: i32, category_id: i32) -> Result<(), ApiError> {
        let removed = self.permissions.revoke(user_id, category_id).await?;
        if !removed {
            return Err(ApiError::PermissionNotFound);
        }
        Ok(())
    }
}

// ── ListAllPermissions ───────────────────────────────────────────────────────

pub struct ListAllPermissionsUseCase<U: UserRepository, P: PermissionRepository> {
    pub users: U,
    pub permissions: P,
}

impl<U: UserRepository, P: PermissionRepository> ListAllPermissionsUseCase<U, P> {
    /// One entry per non-admin user, including users with no grants.
    pub async fn execute(&self) -> Result<Vec<UserPermissionSet>, ApiError> {
        let users = self.users.list_non_admin().await?;
        let mut sets = Vec::with_capacity(users.len());
        // One grant query per user; acceptable at admin-dashboard call rates.
        for user in users {
            let grants = self.permissions.list_for_user(user.id).await?;
            sets.push(UserPermissionSet {
                user_id: user.id,
                username: user.username,
                email: user.email,
                grants,
            });
        }
        Ok(sets)
    }
}

// ── GetUserPermissions ───────────────────────────────────────────────────────

pub struct GetUserPermissionsUseCase<U: UserRepository, P: PermissionRepository> {
    pub users: U,
    pub permissions: P,
}

impl<U: UserRepository, P: PermissionRepository> GetUserPermissionsUseCase<U, P> {
    pub async fn execute(&self, user_id: i32) -> Result<UserPermissionSet, ApiError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        let grants = self.permissions.list_for_user(user.id).await?;
        Ok(UserPermissionSet {
            user_id: user.id,
            username: user.username,
            email: user.email,
            grants,
        })
    }
}
