use chrono::{DateTime, Utc};

use palisade_auth::password;
use palisade_auth::token::{TokenKeys, issue_token};

use crate::domain::repository::{LoginEventRepository, UserRepository};
use crate::domain::types::{NewLoginEvent, NewUser, User};
use crate::error::ApiError;

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub role: Option<String>,
}

pub struct RegisterUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> RegisterUseCase<U> {
    pub async fn execute(&self, input: RegisterInput) -> Result<User, ApiError> {
        if self.users.username_taken(&input.username, None).await? {
            return Err(ApiError::DuplicateUsername);
        }
        if self.users.email_taken(&input.email, None).await? {
            return Err(ApiError::DuplicateEmail);
        }

        let password_hash =
            password::hash_password(&input.password).map_err(|e| ApiError::Internal(e.into()))?;

        let role = match input.role {
            Some(role) if !role.is_empty() => role,
            _ => "user".to_owned(),
        };

        self.users
            .create(&NewUser {
                username: input.username,
                email: input.email,
                password_hash,
                full_name: input.full_name,
                role,
            })
            .await
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    /// Username or email, matched exactly against both columns.
    pub identifier: String,
    pub password: String,
}

/// Client metadata captured into the login audit trail.
#[derive(Debug, Clone, Default)]
pub struct LoginMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub role: String,
}

pub struct LoginUseCase<U: UserRepository, L: LoginEventRepository> {
    pub users: U,
    pub logins: L,
    pub keys: TokenKeys,
}

impl<U: UserRepository, L: LoginEventRepository> LoginUseCase<U, L> {
    /// Unknown identifier and wrong password return the same error, so the
    /// endpoint cannot be used to enumerate accounts.
    pub async fn execute(&self, input: LoginInput, meta: LoginMeta) -> Result<LoginOutput, ApiError> {
        let user = self
            .users
            .find_by_identifier(&input.identifier)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        let verified = password::verify_password(&input.password, &user.password_hash)
            .map_err(|e| ApiError::Internal(e.into()))?;
        if !verified {
            return Err(ApiError::InvalidCredentials);
        }

        self.logins
            .record(&NewLoginEvent {
                user_id: user.id,
                login_time: Utc::now(),
                ip_address: meta.ip_address,
                user_agent: meta.user_agent,
            })
            .await?;

        let (token, expires_at) =
            issue_token(user.id, &user.username, &user.email, &user.role, &self.keys)
                .map_err(|e| ApiError::Internal(e.into()))?;

        Ok(LoginOutput {
            token,
            expires_at,
            role: user.role,
        })
    }
}
