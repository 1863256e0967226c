use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use palisade_auth::identity::Identity;
use palisade_domain::policy;

use crate::domain::types::{GrantDetail, UserPermissionSet};
use crate::error::ApiError;
use crate::handlers::MessageResponse;
use crate::state::AppState;
use crate::usecase::permission::{
    GetUserPermissionsUseCase, GrantPermissionsInput, GrantPermissionsUseCase,
    ListAllPermissionsUseCase, RevokePermissionUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionInfoResponse {
    pub category_id: i32,
    pub category_name: String,
    #[serde(serialize_with = "palisade_core::serde::to_rfc3339_ms")]
    pub granted_at: chrono::DateTime<chrono::Utc>,
    pub granted_by_username: Option<String>,
}

impl From<GrantDetail> for PermissionInfoResponse {
    fn from(grant: GrantDetail) -> Self {
        PermissionInfoResponse {
            category_id: grant.category_id,
            category_name: grant.category_name,
            granted_at: grant.granted_at,
            granted_by_username: grant.granted_by_username,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPermissionResponse {
    pub user_id: i32,
    pub username: String,
    pub email: String,
    pub permissions: Vec<PermissionInfoResponse>,
}

impl From<UserPermissionSet> for UserPermissionResponse {
    fn from(set: UserPermissionSet) -> Self {
        UserPermissionResponse {
            user_id: set.user_id,
            username: set.username,
            email: set.email,
            permissions: set.grants.into_iter().map(Into::into).collect(),
        }
    }
}

// ── POST /category/grant-permission ──────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantPermissionRequest {
    pub user_id: i32,
    pub category_ids: Vec<i32>,
}

pub async fn grant_permissions(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<GrantPermissionRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !policy::can_manage_permissions(identity.role) {
        return Err(ApiError::Forbidden);
    }
    let usecase = GrantPermissionsUseCase {
        users: state.user_repo(),
        categories: state.category_repo(),
        permissions: state.permission_repo(),
    };
    let target = usecase
        .execute(
            identity.user_id,
            GrantPermissionsInput {
                target_user_id: body.user_id,
                category_ids: body.category_ids,
            },
        )
        .await?;
    Ok(Json(MessageResponse::new(format!(
        "Permissions granted successfully to {}",
        target.username
    ))))
}

// ── DELETE /category/revoke-permission/{userId}/{categoryId} ─────────────────

pub async fn revoke_permission(
    identity: Identity,
    State(state): State<AppState>,
    Path((user_id, category_id)): Path<(i32, i32)>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !policy::can_manage_permissions(identity.role) {
        return Err(ApiError::Forbidden);
    }
    let usecase = RevokePermissionUseCase {
        permissions: state.permission_repo(),
    };
    usecase.execute(user_id, category_id).await?;
    Ok(Json(MessageResponse::new("Permission revoked successfully")))
}

// ── GET /category/user-permissions ───────────────────────────────────────────

pub async fn list_user_permissions(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserPermissionResponse>>, ApiError> {
    if !policy::can_manage_permissions(identity.role) {
        return Err(ApiError::Forbidden);
    }
    let usecase = ListAllPermissionsUseCase {
        users: state.user_repo(),
        permissions: state.permission_repo(),
    };
    let sets = usecase.execute().await?;
    Ok(Json(sets.into_iter().map(Into::into).collect()))
}

// ── GET /category/user-permissions/{userId} ──────────────────────────────────

pub async fn get_user_permissions(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserPermissionResponse>, ApiError> {
    if !policy::can_manage_permissions(identity.role) {
        return Err(ApiError::Forbidden);
    }
    let usecase = GetUserPermissionsUseCase {
        users: state.user_repo(),
        permissions: state.permission_repo(),
    };
    let set = usecase.execute(user_id).await?;
    Ok(Json(set.into()))
}
