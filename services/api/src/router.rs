use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use palisade_core::health::{healthz, readyz};
use palisade_core::middleware::request_id_layer;

use crate::handlers::{
    auth::{login, register},
    category::{create_category, delete_category, get_category, list_categories, update_category},
    employee::{
        create_employee, delete_employee, get_employee, list_employees, update_employee,
    },
    permission::{
        get_user_permissions, grant_permissions, list_user_permissions, revoke_permission,
    },
    user::{delete_user, get_logins, get_profile, get_user, list_users, update_profile, update_user},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/profile", get(get_profile))
        .route("/auth/profile", put(update_profile))
        .route("/auth/logins", get(get_logins))
        .route("/auth/users", get(list_users))
        .route("/auth/user/{id}", get(get_user))
        .route("/auth/user/{id}", put(update_user))
        .route("/auth/user/{id}", delete(delete_user))
        // Categories
        .route("/category", get(list_categories))
        .route("/category", post(create_category))
        .route("/category/{id}", get(get_category))
        .route("/category/{id}", put(update_category))
        .route("/category/{id}", delete(delete_category))
        // Permission grants
        .route("/category/grant-permission", post(grant_permissions))
        .route(
            "/category/revoke-permission/{user_id}/{category_id}",
            delete(revoke_permission),
        )
        .route("/category/user-permissions", get(list_user_permissions))
        .route(
            "/category/user-permissions/{user_id}",
            get(get_user_permissions),
        )
        // Employees
        .route("/employees", get(list_employees))
        .route("/employees", post(create_employee))
        .route("/employees/{id}", get(get_employee))
        .route("/employees/{id}", put(update_employee))
        .route("/employees/{id}", delete(delete_employee))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
