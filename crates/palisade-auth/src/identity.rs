//! Bearer-token identity extractor.

use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use http::request::Parts;

use palisade_domain::role::Role;

use crate::token::{TokenKeys, verify_token};

/// Caller identity carried end-to-end, from token claims to usecases.
///
/// The role is whatever the token said at issue time; a role change in
/// storage takes effect only on the next login.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i32,
    pub role: Role,
}

/// Rejection for absent or invalid bearer tokens. Renders the same 401 body
/// regardless of the failure mode so callers cannot probe token internals.
#[derive(Debug)]
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "kind": "UNAUTHENTICATED",
            "message": "invalid user token",
        });
        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    TokenKeys: FromRef<S>,
{
    type Rejection = AuthRejection;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let keys = TokenKeys::from_ref(state);
        let bearer = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(str::to_owned);

        async move {
            let token = bearer.ok_or(AuthRejection)?;
            verify_token(&token, &keys.secret).map_err(|e| {
                tracing::debug!(error = %e, "bearer token rejected");
                AuthRejection
            })
        }
    }
}
