//! User role model.

use serde::{Deserialize, Serialize};

/// User permission level.
///
/// Wire format: free-form string. Only the exact spelling `"admin"`
/// (case-sensitive) carries privileges; every other value behaves as a
/// regular user. Unknown role strings are preserved in storage, not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Classify a stored role string. `"admin"` maps to [`Role::Admin`];
    /// everything else, including `"Admin"` and empty strings, maps to
    /// [`Role::User`].
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "admin" => Self::Admin,
            _ => Self::User,
        }
    }

    /// Canonical string for the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}
