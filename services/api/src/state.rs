use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use palisade_auth::token::TokenKeys;

use crate::infra::db::{
    DbCategoryRepository, DbEmployeeRepository, DbLoginEventRepository, DbPermissionRepository,
    DbUserRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub tokens: TokenKeys,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn login_repo(&self) -> DbLoginEventRepository {
        DbLoginEventRepository {
            db: self.db.clone(),
        }
    }

    pub fn category_repo(&self) -> DbCategoryRepository {
        DbCategoryRepository {
            db: self.db.clone(),
        }
    }

    pub fn permission_repo(&self) -> DbPermissionRepository {
        DbPermissionRepository {
            db: self.db.clone(),
        }
    }

    pub fn employee_repo(&self) -> DbEmployeeRepository {
        DbEmployeeRepository {
            db: self.db.clone(),
        }
    }
}

// Lets the `Identity` extractor pull the verification keys out of router
// state without a dedicated layer.
impl FromRef<AppState> for TokenKeys {
    fn from_ref(state: &AppState) -> TokenKeys {
        state.tokens.clone()
    }
}
