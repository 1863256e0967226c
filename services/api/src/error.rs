use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// API error variants.
///
/// The four `*NotFound` variants share the `NOT_FOUND` kind but keep
/// distinct messages so callers can tell which lookup failed.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("username already taken")]
    DuplicateUsername,
    #[error("email already registered")]
    DuplicateEmail,
    #[error("category name already exists")]
    DuplicateCategoryName,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("forbidden")]
    Forbidden,
    #[error("user not found")]
    UserNotFound,
    #[error("category not found")]
    CategoryNotFound,
    #[error("permission not found")]
    PermissionNotFound,
    #[error("employee not found")]
    EmployeeNotFound,
    #[error("cannot delete your own account")]
    SelfDeleteDenied,
    #[error("categories not found: {}", join_ids(.0))]
    UnknownCategories(Vec<i32>),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

fn join_ids(ids: &[i32]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateUsername => "DUPLICATE_USERNAME",
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::DuplicateCategoryName => "DUPLICATE_NAME",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::UserNotFound
            | Self::CategoryNotFound
            | Self::PermissionNotFound
            | Self::EmployeeNotFound => "NOT_FOUND",
            Self::SelfDeleteDenied => "SELF_DELETE_DENIED",
            Self::UnknownCategories(_) => "INVALID_REFERENCE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::DuplicateUsername
            | Self::DuplicateEmail
            | Self::DuplicateCategoryName
            | Self::SelfDeleteDenied
            | Self::UnknownCategories(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound
            | Self::CategoryNotFound
            | Self::PermissionNotFound
            | Self::EmployeeNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only. TraceLayer already records method/uri/status for every
        // request, and 4xx are expected client errors; internal errors need the
        // anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
