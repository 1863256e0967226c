use palisade_auth::password;

use crate::domain::repository::{LoginEventRepository, UserRepository};
use crate::domain::types::{LoginEvent, User, UserChanges};
use crate::error::ApiError;
use crate::usecase::non_empty;

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetProfileUseCase<U> {
    pub async fn execute(&self, user_id: i32) -> Result<User, ApiError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)
    }
}

// ── UpdateProfile (self-service) ─────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateProfileInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
}

pub struct UpdateProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UpdateProfileUseCase<U> {
    /// Empty or absent fields leave the column unchanged; role is not
    /// updatable through this path.
    pub async fn execute(&self, user_id: i32, input: UpdateProfileInput) -> Result<(), ApiError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        let changes = build_user_changes(
            &self.users,
            user.id,
            input.username,
            input.email,
            input.password,
            input.full_name,
            None,
        )
        .await?;

        if changes.is_empty() {
            return Ok(());
        }
        self.users.update(user.id, &changes).await
    }
}

// ── AdminUpdateUser ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct AdminUpdateUserInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<String>,
}

pub struct AdminUpdateUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> AdminUpdateUserUseCase<U> {
    /// Same per-field semantics as the self-service update, except role IS
    /// updatable. Role changes reach already-issued tokens only at the next
    /// login.
    pub async fn execute(&self, target_id: i32, input: AdminUpdateUserInput) -> Result<(), ApiError> {
        let user = self
            .users
            .find_by_id(target_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        let changes = build_user_changes(
            &self.users,
            user.id,
            input.username,
            input.email,
            input.password,
            input.full_name,
            input.role,
        )
        .await?;

        if changes.is_empty() {
            return Ok(());
        }
        self.users.update(user.id, &changes).await
    }
}

/// Shared per-field update semantics: empty strings are no-ops, username and
/// email are checked for ownership by another user id, a new password is
/// re-digested.
async fn build_user_changes<U: UserRepository>(
    users: &U,
    user_id: i32,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    full_name: Option<String>,
    role: Option<String>,
) -> Result<UserChanges, ApiError> {
    let username = non_empty(username);
    let email = non_empty(email);
    let password = non_empty(password);
    let full_name = non_empty(full_name);
    let role = non_empty(role);

    if let Some(ref username) = username {
        if users.username_taken(username, Some(user_id)).await? {
            return Err(ApiError::DuplicateUsername);
        }
    }
    if let Some(ref email) = email {
        if users.email_taken(email, Some(user_id)).await? {
            return Err(ApiError::DuplicateEmail);
        }
    }

    let password_hash = match password {
        Some(ref p) => {
            Some(password::hash_password(p).map_err(|e| ApiError::Internal(e.into()))?)
        }
        None => None,
    };

    Ok(UserChanges {
        username,
        email,
        password_hash,
        full_name,
        role,
    })
}

// ── AdminDeleteUser ──────────────────────────────────────────────────────────

pub struct AdminDeleteUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> AdminDeleteUserUseCase<U> {
    /// Deletes the target's login events then the target, in one
    /// transaction. Admins cannot delete their own account.
    pub async fn execute(&self, caller_id: i32, target_id: i32) -> Result<(), ApiError> {
        if caller_id == target_id {
            return Err(ApiError::SelfDeleteDenied);
        }
        let user = self
            .users
            .find_by_id(target_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        self.users.delete_with_logins(user.id).await
    }
}

// ── AdminListUsers / AdminGetUser ────────────────────────────────────────────

pub struct AdminListUsersUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> AdminListUsersUseCase<U> {
    pub async fn execute(&self) -> Result<Vec<User>, ApiError> {
        self.users.list().await
    }
}

pub struct AdminGetUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> AdminGetUserUseCase<U> {
    pub async fn execute(&self, id: i32) -> Result<User, ApiError> {
        self.users.find_by_id(id).await?.ok_or(ApiError::UserNotFound)
    }
}

// ── ListLogins ───────────────────────────────────────────────────────────────

pub struct ListLoginsUseCase<L: LoginEventRepository> {
    pub logins: L,
}

impl<L: LoginEventRepository> ListLoginsUseCase<L> {
    /// Newest first. Self-service only; the caller id comes from the token.
    pub async fn execute(&self, user_id: i32) -> Result<Vec<LoginEvent>, ApiError> {
        self.logins.list_for_user(user_id).await
    }
}
