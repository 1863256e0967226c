use palisade_auth::identity::Identity;
use palisade_domain::policy;

use crate::domain::repository::{CategoryRepository, PermissionRepository};
use crate::domain::types::{Category, CategoryChanges, CategoryWithCreator, NewCategory};
use crate::error::ApiError;
use crate::usecase::non_empty;

// ── ListCategories ───────────────────────────────────────────────────────────

pub struct ListCategoriesUseCase<C: CategoryRepository> {
    pub categories: C,
}

impl<C: CategoryRepository> ListCategoriesUseCase<C> {
    /// Admins see every category; regular users only those with a grant.
    pub async fn execute(&self, identity: &Identity) -> Result<Vec<CategoryWithCreator>, ApiError> {
        if identity.role.is_admin() {
            self.categories.list_all().await
        } else {
            self.categories.list_granted_to(identity.user_id).await
        }
    }
}

// ── GetCategory ──────────────────────────────────────────────────────────────

pub struct GetCategoryUseCase<C: CategoryRepository, P: PermissionRepository> {
    pub categories: C,
    pub permissions: P,
}

impl<C: CategoryRepository, P: PermissionRepository> GetCategoryUseCase<C, P> {
    /// Existence is checked before access, so an ungranted caller can tell a
    /// missing id (404) from a forbidden one (403).
    pub async fn execute(&self, identity: &Identity, id: i32) -> Result<CategoryWithCreator, ApiError> {
        let category = self
            .categories
            .find_by_id(id)
            .await?
            .ok_or(ApiError::CategoryNotFound)?;

        if !identity.role.is_admin() {
            let has_grant = self.permissions.has_grant(identity.user_id, id).await?;
            if !policy::can_read_category(identity.role, has_grant) {
                return Err(ApiError::Forbidden);
            }
        }
        Ok(category)
    }
}

// ── CreateCategory ───────────────────────────────────────────────────────────

pub struct CreateCategoryInput {
    pub name: String,
    pub content: String,
    pub link: Option<String>,
}

pub struct CreateCategoryUseCase<C: CategoryRepository> {
    pub categories: C,
}

impl<C: CategoryRepository> CreateCategoryUseCase<C> {
    pub async fn execute(&self, caller_id: i32, input: CreateCategoryInput) -> Result<Category, ApiError> {
        if self.categories.name_taken(&input.name, None).await? {
            return Err(ApiError::DuplicateCategoryName);
        }
        self.categories
            .create(&NewCategory {
                name: input.name,
                content: input.content,
                link: input.link,
                created_by_user_id: caller_id,
            })
            .await
    }
}

// ── UpdateCategory ───────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateCategoryInput {
    pub name: Option<String>,
    pub content: Option<String>,
    /// `Some(None)` clears the link; `None` leaves it unchanged.
    pub link: Option<Option<String>>,
}

pub struct UpdateCategoryUseCase<C: CategoryRepository> {
    pub categories: C,
}

impl<C: CategoryRepository> UpdateCategoryUseCase<C> {
    /// A rename re-checks name uniqueness case-insensitively against every
    /// other category. `updated_at` is stamped on every successful call.
    pub async fn execute(&self, id: i32, input: UpdateCategoryInput) -> Result<(), ApiError> {
        let existing = self
            .categories
            .find_by_id(id)
            .await?
            .ok_or(ApiError::CategoryNotFound)?;

        let name = non_empty(input.name);
        if let Some(ref name) = name {
            if self.categories.name_taken(name, Some(existing.category.id)).await? {
                return Err(ApiError::DuplicateCategoryName);
            }
        }

        let changes = CategoryChanges {
            name,
            content: non_empty(input.content),
            link: input.link,
        };
        self.categories.update(existing.category.id, &changes).await
    }
}

// ── DeleteCategory ───────────────────────────────────────────────────────────

pub struct DeleteCategoryUseCase<C: CategoryRepository> {
    pub categories: C,
}

impl<C: CategoryRepository> DeleteCategoryUseCase<C> {
    /// Grants referencing the category are deleted with it, atomically.
    pub async fn execute(&self, id: i32) -> Result<(), ApiError> {
        let existing = self
            .categories
            .find_by_id(id)
            .await?
            .ok_or(ApiError::CategoryNotFound)?;
        self.categories.delete_with_grants(existing.category.id).await
    }
}
