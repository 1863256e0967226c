use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use palisade_auth::identity::Identity;
use palisade_domain::policy;

use crate::domain::types::CategoryWithCreator;
use crate::error::ApiError;
use crate::handlers::MessageResponse;
use crate::state::AppState;
use crate::usecase::category::{
    CreateCategoryInput, CreateCategoryUseCase, DeleteCategoryUseCase, GetCategoryUseCase,
    ListCategoriesUseCase, UpdateCategoryInput, UpdateCategoryUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub content: String,
    pub link: Option<String>,
    #[serde(serialize_with = "palisade_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "palisade_core::serde::to_rfc3339_ms_opt")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_by_username: String,
    pub created_by_user_id: i32,
}

impl From<CategoryWithCreator> for CategoryResponse {
    fn from(with_creator: CategoryWithCreator) -> Self {
        let CategoryWithCreator {
            category,
            creator_username,
        } = with_creator;
        CategoryResponse {
            id: category.id,
            name: category.name,
            content: category.content,
            link: category.link,
            created_at: category.created_at,
            updated_at: category.updated_at,
            created_by_username: creator_username.unwrap_or_else(|| "Unknown".to_owned()),
            created_by_user_id: category.created_by_user_id,
        }
    }
}

// ── GET /category ────────────────────────────────────────────────────────────

pub async fn list_categories(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let usecase = ListCategoriesUseCase {
        categories: state.category_repo(),
    };
    let categories = usecase.execute(&identity).await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

// ── GET /category/{id} ───────────────────────────────────────────────────────

pub async fn get_category(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let usecase = GetCategoryUseCase {
        categories: state.category_repo(),
        permissions: state.permission_repo(),
    };
    let category = usecase.execute(&identity, id).await?;
    Ok(Json(category.into()))
}

// ── POST /category ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    pub content: String,
    pub link: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryResponse {
    pub message: &'static str,
    pub category_id: i32,
}

pub async fn create_category(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CreateCategoryResponse>), ApiError> {
    if !policy::can_write_category(identity.role) {
        return Err(ApiError::Forbidden);
    }
    let usecase = CreateCategoryUseCase {
        categories: state.category_repo(),
    };
    let category = usecase
        .execute(
            identity.user_id,
            CreateCategoryInput {
                name: body.name,
                content: body.content,
                link: body.link,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateCategoryResponse {
            message: "Category created successfully",
            category_id: category.id,
        }),
    ))
}

// ── PUT /category/{id} ───────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub content: Option<String>,
    /// Absent leaves the link unchanged; an explicit `null` clears it.
    #[serde(default, deserialize_with = "palisade_core::serde::double_option")]
    pub link: Option<Option<String>>,
}

pub async fn update_category(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateCategoryRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !policy::can_write_category(identity.role) {
        return Err(ApiError::Forbidden);
    }
    let usecase = UpdateCategoryUseCase {
        categories: state.category_repo(),
    };
    usecase
        .execute(
            id,
            UpdateCategoryInput {
                name: body.name,
                content: body.content,
                link: body.link,
            },
        )
        .await?;
    Ok(Json(MessageResponse::new("Category updated successfully")))
}

// ── DELETE /category/{id} ────────────────────────────────────────────────────

pub async fn delete_category(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !policy::can_write_category(identity.role) {
        return Err(ApiError::Forbidden);
    }
    let usecase = DeleteCategoryUseCase {
        categories: state.category_repo(),
    };
    usecase.execute(id).await?;
    Ok(Json(MessageResponse::new("Category deleted successfully")))
}
