#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{
    Category, CategoryChanges, CategoryWithCreator, Employee, EmployeeFields, GrantDetail,
    LoginEvent, NewCategory, NewLoginEvent, NewUser, User, UserChanges,
};
use crate::error::ApiError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, ApiError>;

    /// Exact match on username OR email (login identifier lookup).
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, ApiError>;

    /// Exact-match existence check, optionally excluding one user id
    /// (self-updates keep their own row out of the check).
    async fn username_taken(&self, username: &str, exclude: Option<i32>) -> Result<bool, ApiError>;
    async fn email_taken(&self, email: &str, exclude: Option<i32>) -> Result<bool, ApiError>;

    async fn create(&self, user: &NewUser) -> Result<User, ApiError>;
    async fn update(&self, id: i32, changes: &UserChanges) -> Result<(), ApiError>;

    /// Delete the user's login audit rows, then the user, in one transaction.
    /// Permission grants referencing the user are left in place and will
    /// block the delete at the foreign-key level if present.
    async fn delete_with_logins(&self, id: i32) -> Result<(), ApiError>;

    async fn list(&self) -> Result<Vec<User>, ApiError>;

    /// Users whose stored role string is not exactly `"admin"`.
    async fn list_non_admin(&self) -> Result<Vec<User>, ApiError>;
}

/// Repository for the login audit trail.
pub trait LoginEventRepository: Send + Sync {
    async fn record(&self, event: &NewLoginEvent) -> Result<(), ApiError>;

    /// Login events for one user, newest first.
    async fn list_for_user(&self, user_id: i32) -> Result<Vec<LoginEvent>, ApiError>;
}

/// Repository for categories.
pub trait CategoryRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<CategoryWithCreator>, ApiError>;

    /// Categories with an existing grant for `user_id`.
    async fn list_granted_to(&self, user_id: i32) -> Result<Vec<CategoryWithCreator>, ApiError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<CategoryWithCreator>, ApiError>;

    /// Case-insensitive name existence check, optionally excluding one
    /// category id (renames keep their own row out of the check).
    async fn name_taken(&self, name: &str, exclude: Option<i32>) -> Result<bool, ApiError>;

    async fn create(&self, category: &NewCategory) -> Result<Category, ApiError>;

    /// Apply changes and stamp `updated_at`.
    async fn update(&self, id: i32, changes: &CategoryChanges) -> Result<(), ApiError>;

    /// Delete the category's grants, then the category, in one transaction.
    async fn delete_with_grants(&self, id: i32) -> Result<(), ApiError>;

    /// Of the given ids, the subset that exists.
    async fn filter_existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, ApiError>;
}

/// Repository for permission grants.
pub trait PermissionRepository: Send + Sync {
    async fn has_grant(&self, user_id: i32, category_id: i32) -> Result<bool, ApiError>;

    /// Replace every grant for `user_id` with one grant per id in
    /// `category_ids`, in one transaction. An empty set revokes everything.
    async fn replace_for_user(
        &self,
        user_id: i32,
        category_ids: &[i32],
        granted_by: i32,
        granted_at: DateTime<Utc>,
    ) -> Result<(), ApiError>;

    /// Remove one (user, category) grant. Returns `true` if a row was deleted.
    async fn revoke(&self, user_id: i32, category_id: i32) -> Result<bool, ApiError>;

    /// Grants for one user with category names and granter usernames
    /// resolved.
    async fn list_for_user(&self, user_id: i32) -> Result<Vec<GrantDetail>, ApiError>;
}

/// Repository for the unguarded employee resource.
pub trait EmployeeRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Employee>, ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, ApiError>;
    async fn create(&self, employee: &Employee) -> Result<(), ApiError>;

    /// Replace all fields. Returns `true` if the employee existed.
    async fn update(&self, id: Uuid, fields: &EmployeeFields) -> Result<bool, ApiError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}
