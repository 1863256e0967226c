use chrono::{DateTime, Utc};
use uuid::Uuid;

/// User account as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a user at registration.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub role: String,
}

/// Partial user update. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
            && self.full_name.is_none()
            && self.role.is_none()
    }
}

/// One successful authentication, append-only.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginEvent {
    pub id: i32,
    pub user_id: i32,
    pub login_time: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewLoginEvent {
    pub user_id: i32,
    pub login_time: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub content: String,
    pub link: Option<String>,
    pub created_by_user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Category plus its creator's username, resolved at query time. The
/// username is `None` when the creator row is missing; responses render
/// that as `"Unknown"`.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryWithCreator {
    pub category: Category,
    pub creator_username: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub content: String,
    pub link: Option<String>,
    pub created_by_user_id: i32,
}

/// Partial category update. The outer `Option` on `link` distinguishes
/// "leave unchanged" (`None`) from "set" (`Some(Some(_))`) and "clear"
/// (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub content: Option<String>,
    pub link: Option<Option<String>>,
}

/// One resolved grant row for permission listings.
#[derive(Debug, Clone, PartialEq)]
pub struct GrantDetail {
    pub category_id: i32,
    pub category_name: String,
    pub granted_at: DateTime<Utc>,
    pub granted_by_username: Option<String>,
}

/// Full grant set for one user, as returned by the permission listings.
#[derive(Debug, Clone, PartialEq)]
pub struct UserPermissionSet {
    pub user_id: i32,
    pub username: String,
    pub email: String,
    pub grants: Vec<GrantDetail>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub salary: f64,
}

/// Full employee payload; employee updates replace every field.
#[derive(Debug, Clone)]
pub struct EmployeeFields {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub salary: f64,
}
