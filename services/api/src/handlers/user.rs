use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use palisade_auth::identity::Identity;
use palisade_domain::policy;

use crate::domain::types::{LoginEvent, User};
use crate::error::ApiError;
use crate::handlers::MessageResponse;
use crate::state::AppState;
use crate::usecase::user::{
    AdminDeleteUserUseCase, AdminGetUserUseCase, AdminListUsersUseCase, AdminUpdateUserInput,
    AdminUpdateUserUseCase, GetProfileUseCase, ListLoginsUseCase, UpdateProfileInput,
    UpdateProfileUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
    #[serde(serialize_with = "palisade_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginEventResponse {
    pub id: i32,
    #[serde(serialize_with = "palisade_core::serde::to_rfc3339_ms")]
    pub login_time: chrono::DateTime<chrono::Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl From<LoginEvent> for LoginEventResponse {
    fn from(event: LoginEvent) -> Self {
        LoginEventResponse {
            id: event.id,
            login_time: event.login_time,
            ip_address: event.ip_address,
            user_agent: event.user_agent,
        }
    }
}

// ── GET /auth/profile ────────────────────────────────────────────────────────

pub async fn get_profile(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = GetProfileUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(user.into()))
}

// ── PUT /auth/profile ────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
}

pub async fn update_profile(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let usecase = UpdateProfileUseCase {
        users: state.user_repo(),
    };
    usecase
        .execute(
            identity.user_id,
            UpdateProfileInput {
                username: body.username,
                email: body.email,
                password: body.password,
                full_name: body.full_name,
            },
        )
        .await?;
    Ok(Json(MessageResponse::new("Profile updated successfully")))
}

// ── GET /auth/logins ─────────────────────────────────────────────────────────

pub async fn get_logins(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<LoginEventResponse>>, ApiError> {
    let usecase = ListLoginsUseCase {
        logins: state.login_repo(),
    };
    let events = usecase.execute(identity.user_id).await?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

// ── GET /auth/users ──────────────────────────────────────────────────────────

pub async fn list_users(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    if !policy::can_manage_users(identity.role) {
        return Err(ApiError::Forbidden);
    }
    let usecase = AdminListUsersUseCase {
        users: state.user_repo(),
    };
    let users = usecase.execute().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

// ── GET /auth/user/{id} ──────────────────────────────────────────────────────

pub async fn get_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, ApiError> {
    if !policy::can_manage_users(identity.role) {
        return Err(ApiError::Forbidden);
    }
    let usecase = AdminGetUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(id).await?;
    Ok(Json(user.into()))
}

// ── PUT /auth/user/{id} ──────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<String>,
}

pub async fn update_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<AdminUpdateUserRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !policy::can_manage_users(identity.role) {
        return Err(ApiError::Forbidden);
    }
    let usecase = AdminUpdateUserUseCase {
        users: state.user_repo(),
    };
    usecase
        .execute(
            id,
            AdminUpdateUserInput {
                username: body.username,
                email: body.email,
                password: body.password,
                full_name: body.full_name,
                role: body.role,
            },
        )
        .await?;
    Ok(Json(MessageResponse::new("User updated successfully")))
}

// ── DELETE /auth/user/{id} ───────────────────────────────────────────────────

pub async fn delete_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !policy::can_manage_users(identity.role) {
        return Err(ApiError::Forbidden);
    }
    let usecase = AdminDeleteUserUseCase {
        users: state.user_repo(),
    };
    usecase.execute(identity.user_id, id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
