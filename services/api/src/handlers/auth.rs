use std::net::SocketAddr;

use axum::{
    Json,
    extract::{ConnectInfo, State},
    http::{HeaderMap, header},
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::auth::{LoginInput, LoginMeta, LoginUseCase, RegisterInput, RegisterUseCase};

// ── POST /auth/register ──────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub role: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: &'static str,
    pub username: String,
    pub role: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(RegisterInput {
            username: body.username,
            email: body.email,
            password: body.password,
            full_name: body.full_name,
            role: body.role,
        })
        .await?;
    Ok(Json(RegisterResponse {
        message: "Registration successful",
        username: user.username,
        role: user.role,
    }))
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username_or_email: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(serialize_with = "palisade_core::serde::to_rfc3339_ms")]
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub role: String,
}

pub async fn login(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let usecase = LoginUseCase {
        users: state.user_repo(),
        logins: state.login_repo(),
        keys: state.tokens.clone(),
    };
    let output = usecase
        .execute(
            LoginInput {
                identifier: body.username_or_email,
                password: body.password,
            },
            LoginMeta {
                ip_address: Some(addr.ip().to_string()),
                user_agent,
            },
        )
        .await?;
    Ok(Json(LoginResponse {
        token: output.token,
        expires_at: output.expires_at,
        role: output.role,
    }))
}
