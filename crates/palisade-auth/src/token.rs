//! JWT access-token issue and verification.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;

use palisade_domain::role::Role;

use crate::identity::Identity;

/// Claim names written by pre-migration token issuers. Tokens minted by the
/// legacy stack carry these full URIs instead of the short `uid`/`role`
/// names, and stay valid until they expire, so verification accepts both.
const LEGACY_NAME_ID_CLAIM: &str =
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier";
const LEGACY_ROLE_CLAIM: &str = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";

/// Subject-id claim names in priority order.
const SUBJECT_CLAIMS: [&str; 4] = ["uid", LEGACY_NAME_ID_CLAIM, "sub", "id"];

/// HS256 signing material plus token lifetime, shared via app state.
#[derive(Debug, Clone)]
pub struct TokenKeys {
    pub secret: String,
    pub expire_hours: i64,
}

/// Errors returned by [`verify_token`] and [`issue_token`].
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("missing identity claim")]
    MissingClaim,
    #[error("token signing failed")]
    Signing,
}

/// Claims payload written at issue time.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `sub` / `uid` | user id as decimal string (both written for reader compatibility) |
/// | `unique_name` | username at issue time |
/// | `email` | email at issue time |
/// | `role` | role string at issue time (trusted for the token lifetime) |
/// | `exp` | expiration, seconds since UNIX epoch |
#[derive(Debug, Serialize)]
pub struct TokenClaims {
    pub sub: String,
    pub uid: String,
    pub unique_name: String,
    pub email: String,
    pub role: String,
    pub exp: u64,
}

/// Issue a signed access token for the given user. Returns the encoded token
/// and its expiration instant (`now + expire_hours`).
pub fn issue_token(
    user_id: i32,
    username: &str,
    email: &str,
    role: &str,
    keys: &TokenKeys,
) -> Result<(String, DateTime<Utc>), TokenError> {
    let expires_at = Utc::now() + Duration::hours(keys.expire_hours);
    let claims = TokenClaims {
        sub: user_id.to_string(),
        uid: user_id.to_string(),
        unique_name: username.to_owned(),
        email: email.to_owned(),
        role: role.to_owned(),
        exp: expires_at.timestamp() as u64,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(keys.secret.as_bytes()),
    )
    .map_err(|_| TokenError::Signing)?;
    Ok((token, expires_at))
}

/// Decode and validate a token, returning the caller identity.
///
/// Validation: HS256, exp checked (default 60s leeway for clock skew). Only
/// `exp` is required; the subject may arrive under any of the
/// [`SUBJECT_CLAIMS`] names. The role claim is optional, and a token without
/// one acts as a regular user.
pub fn verify_token(token: &str, secret: &str) -> Result<Identity, TokenError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp"]);

    let data = decode::<serde_json::Value>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_) => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })?;

    let user_id = subject_from_claims(&data.claims).ok_or(TokenError::MissingClaim)?;
    let role = role_from_claims(&data.claims);
    Ok(Identity { user_id, role })
}

fn subject_from_claims(claims: &serde_json::Value) -> Option<i32> {
    SUBJECT_CLAIMS
        .iter()
        .find_map(|name| claims.get(name).and_then(claim_as_i32))
}

fn role_from_claims(claims: &serde_json::Value) -> Role {
    ["role", LEGACY_ROLE_CLAIM]
        .iter()
        .find_map(|name| claims.get(name).and_then(|v| v.as_str()))
        .map(Role::from_str_lossy)
        .unwrap_or(Role::User)
}

// Subject ids appear as decimal strings in our own tokens and as JSON
// numbers in some legacy ones.
fn claim_as_i32(value: &serde_json::Value) -> Option<i32> {
    match value {
        serde_json::Value::String(s) => s.parse().ok(),
        serde_json::Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        _ => None,
    }
}
