//! HTTP layer: request/response DTOs and axum handlers.
//!
//! Handlers resolve the caller's [`Identity`], apply the `policy` gates, and
//! delegate to `usecase`. Response field names follow the JSON casing the
//! API has always served (camelCase).
//!
//! [`Identity`]: palisade_auth::identity::Identity

use serde::Serialize;

pub mod auth;
pub mod category;
pub mod employee;
pub mod permission;
pub mod user;

/// Plain `{"message": ...}` body used by mutation endpoints.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
