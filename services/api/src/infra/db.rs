use std::collections::HashMap;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    IntoActiveModel as _, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use palisade_api_schema::{categories, employees, user_category_permissions, user_logins, users};

use crate::domain::repository::{
    CategoryRepository, EmployeeRepository, LoginEventRepository, PermissionRepository,
    UserRepository,
};
use crate::domain::types::{
    Category, CategoryChanges, CategoryWithCreator, Employee, EmployeeFields, GrantDetail,
    LoginEvent, NewCategory, NewLoginEvent, NewUser, User, UserChanges,
};
use crate::error::ApiError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(
                Condition::any()
                    .add(users::Column::Username.eq(identifier))
                    .add(users::Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .context("find user by identifier")?;
        Ok(model.map(user_from_model))
    }

    async fn username_taken(&self, username: &str, exclude: Option<i32>) -> Result<bool, ApiError> {
        let mut query = users::Entity::find().filter(users::Column::Username.eq(username));
        if let Some(id) = exclude {
            query = query.filter(users::Column::Id.ne(id));
        }
        let count = query.count(&self.db).await.context("check username taken")?;
        Ok(count > 0)
    }

    async fn email_taken(&self, email: &str, exclude: Option<i32>) -> Result<bool, ApiError> {
        let mut query = users::Entity::find().filter(users::Column::Email.eq(email));
        if let Some(id) = exclude {
            query = query.filter(users::Column::Id.ne(id));
        }
        let count = query.count(&self.db).await.context("check email taken")?;
        Ok(count > 0)
    }

    async fn create(&self, user: &NewUser) -> Result<User, ApiError> {
        let model = users::ActiveModel {
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            full_name: Set(user.full_name.clone()),
            role: Set(user.role.clone()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| translate_unique_violation(e, "create user"))?;
        Ok(user_from_model(model))
    }

    async fn update(&self, id: i32, changes: &UserChanges) -> Result<(), ApiError> {
        let mut am = users::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref username) = changes.username {
            am.username = Set(username.clone());
        }
        if let Some(ref email) = changes.email {
            am.email = Set(email.clone());
        }
        if let Some(ref password_hash) = changes.password_hash {
            am.password_hash = Set(password_hash.clone());
        }
        if let Some(ref full_name) = changes.full_name {
            am.full_name = Set(Some(full_name.clone()));
        }
        if let Some(ref role) = changes.role {
            am.role = Set(role.clone());
        }
        am.update(&self.db)
            .await
            .map_err(|e| translate_unique_violation(e, "update user"))?;
        Ok(())
    }

    async fn delete_with_logins(&self, id: i32) -> Result<(), ApiError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    user_logins::Entity::delete_many()
                        .filter(user_logins::Column::UserId.eq(id))
                        .exec(txn)
                        .await?;
                    users::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(())
                })
            })
            .await
            .context("delete user with login history")?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, ApiError> {
        let models = users::Entity::find()
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn list_non_admin(&self) -> Result<Vec<User>, ApiError> {
        let models = users::Entity::find()
            .filter(users::Column::Role.ne("admin"))
            .all(&self.db)
            .await
            .context("list non-admin users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }
}

// The unique indexes on username/email are the final arbiter for the
// check-then-insert race at registration and update; map their violations
// onto the same duplicate errors the pre-checks produce.
fn translate_unique_violation(err: sea_orm::DbErr, op: &'static str) -> ApiError {
    match err.sql_err() {
        Some(sea_orm::SqlErr::UniqueConstraintViolation(detail))
            if detail.contains("idx_users_username") =>
        {
            ApiError::DuplicateUsername
        }
        Some(sea_orm::SqlErr::UniqueConstraintViolation(detail))
            if detail.contains("idx_users_email") =>
        {
            ApiError::DuplicateEmail
        }
        _ => ApiError::Internal(anyhow::Error::new(err).context(op)),
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        full_name: model.full_name,
        role: model.role,
        created_at: model.created_at,
    }
}

// ── Login event repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbLoginEventRepository {
    pub db: DatabaseConnection,
}

impl LoginEventRepository for DbLoginEventRepository {
    async fn record(&self, event: &NewLoginEvent) -> Result<(), ApiError> {
        user_logins::ActiveModel {
            user_id: Set(event.user_id),
            login_time: Set(event.login_time),
            ip_address: Set(event.ip_address.clone()),
            user_agent: Set(event.user_agent.clone()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("record login event")?;
        Ok(())
    }

    async fn list_for_user(&self, user_id: i32) -> Result<Vec<LoginEvent>, ApiError> {
        let models = user_logins::Entity::find()
            .filter(user_logins::Column::UserId.eq(user_id))
            .order_by_desc(user_logins::Column::LoginTime)
            .all(&self.db)
            .await
            .context("list login events")?;
        Ok(models.into_iter().map(login_event_from_model).collect())
    }
}

fn login_event_from_model(model: user_logins::Model) -> LoginEvent {
    LoginEvent {
        id: model.id,
        user_id: model.user_id,
        login_time: model.login_time,
        ip_address: model.ip_address,
        user_agent: model.user_agent,
    }
}

// ── Category repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCategoryRepository {
    pub db: DatabaseConnection,
}

impl CategoryRepository for DbCategoryRepository {
    async fn list_all(&self) -> Result<Vec<CategoryWithCreator>, ApiError> {
        let models = categories::Entity::find()
            .all(&self.db)
            .await
            .context("list categories")?;
        attach_creators(&self.db, models).await
    }

    async fn list_granted_to(&self, user_id: i32) -> Result<Vec<CategoryWithCreator>, ApiError> {
        let granted_ids: Vec<i32> = user_category_permissions::Entity::find()
            .filter(user_category_permissions::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .context("list grant rows for user")?
            .into_iter()
            .map(|grant| grant.category_id)
            .collect();
        let models = categories::Entity::find()
            .filter(categories::Column::Id.is_in(granted_ids))
            .all(&self.db)
            .await
            .context("list granted categories")?;
        attach_creators(&self.db, models).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<CategoryWithCreator>, ApiError> {
        let model = match categories::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find category by id")?
        {
            Some(model) => model,
            None => return Ok(None),
        };
        let creator = users::Entity::find_by_id(model.created_by_user_id)
            .one(&self.db)
            .await
            .context("find category creator")?;
        Ok(Some(CategoryWithCreator {
            category: category_from_model(model),
            creator_username: creator.map(|u| u.username),
        }))
    }

    async fn name_taken(&self, name: &str, exclude: Option<i32>) -> Result<bool, ApiError> {
        use sea_orm::sea_query::{Expr, Func};

        // Category names are compared case-insensitively, unlike usernames.
        let mut query = categories::Entity::find().filter(
            Expr::expr(Func::lower(Expr::col(categories::Column::Name))).eq(name.to_lowercase()),
        );
        if let Some(id) = exclude {
            query = query.filter(categories::Column::Id.ne(id));
        }
        let count = query
            .count(&self.db)
            .await
            .context("check category name taken")?;
        Ok(count > 0)
    }

    async fn create(&self, category: &NewCategory) -> Result<Category, ApiError> {
        let model = categories::ActiveModel {
            name: Set(category.name.clone()),
            content: Set(category.content.clone()),
            link: Set(category.link.clone()),
            created_by_user_id: Set(category.created_by_user_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create category")?;
        Ok(category_from_model(model))
    }

    async fn update(&self, id: i32, changes: &CategoryChanges) -> Result<(), ApiError> {
        let mut am = categories::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref name) = changes.name {
            am.name = Set(name.clone());
        }
        if let Some(ref content) = changes.content {
            am.content = Set(content.clone());
        }
        if let Some(ref link) = changes.link {
            am.link = Set(link.clone());
        }
        am.updated_at = Set(Some(Utc::now()));
        am.update(&self.db).await.context("update category")?;
        Ok(())
    }

    async fn delete_with_grants(&self, id: i32) -> Result<(), ApiError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    user_category_permissions::Entity::delete_many()
                        .filter(user_category_permissions::Column::CategoryId.eq(id))
                        .exec(txn)
                        .await?;
                    categories::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(())
                })
            })
            .await
            .context("delete category with grants")?;
        Ok(())
    }

    async fn filter_existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, ApiError> {
        let models = categories::Entity::find()
            .filter(categories::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("filter existing category ids")?;
        Ok(models.into_iter().map(|m| m.id).collect())
    }
}

async fn attach_creators(
    db: &DatabaseConnection,
    models: Vec<categories::Model>,
) -> Result<Vec<CategoryWithCreator>, ApiError> {
    let creator_ids: Vec<i32> = models.iter().map(|m| m.created_by_user_id).collect();
    let usernames: HashMap<i32, String> = users::Entity::find()
        .filter(users::Column::Id.is_in(creator_ids))
        .all(db)
        .await
        .context("resolve category creators")?
        .into_iter()
        .map(|u| (u.id, u.username))
        .collect();
    Ok(models
        .into_iter()
        .map(|m| {
            let creator_username = usernames.get(&m.created_by_user_id).cloned();
            CategoryWithCreator {
                category: category_from_model(m),
                creator_username,
            }
        })
        .collect())
}

fn category_from_model(model: categories::Model) -> Category {
    Category {
        id: model.id,
        name: model.name,
        content: model.content,
        link: model.link,
        created_by_user_id: model.created_by_user_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Permission repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPermissionRepository {
    pub db: DatabaseConnection,
}

impl PermissionRepository for DbPermissionRepository {
    async fn has_grant(&self, user_id: i32, category_id: i32) -> Result<bool, ApiError> {
        let count = user_category_permissions::Entity::find()
            .filter(user_category_permissions::Column::UserId.eq(user_id))
            .filter(user_category_permissions::Column::CategoryId.eq(category_id))
            .count(&self.db)
            .await
            .context("check grant")?;
        Ok(count > 0)
    }

    async fn replace_for_user(
        &self,
        user_id: i32,
        category_ids: &[i32],
        granted_by: i32,
        granted_at: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        let category_ids = category_ids.to_vec();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    user_category_permissions::Entity::delete_many()
                        .filter(user_category_permissions::Column::UserId.eq(user_id))
                        .exec(txn)
                        .await?;
                    for category_id in category_ids {
                        user_category_permissions::ActiveModel {
                            user_id: Set(user_id),
                            category_id: Set(category_id),
                            granted_at: Set(granted_at),
                            granted_by_user_id: Set(granted_by),
                            ..Default::default()
                        }
                        .insert(txn)
                        .await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("replace grants for user")?;
        Ok(())
    }

    async fn revoke(&self, user_id: i32, category_id: i32) -> Result<bool, ApiError> {
        let result = user_category_permissions::Entity::delete_many()
            .filter(user_category_permissions::Column::UserId.eq(user_id))
            .filter(user_category_permissions::Column::CategoryId.eq(category_id))
            .exec(&self.db)
            .await
            .context("revoke grant")?;
        Ok(result.rows_affected > 0)
    }

    async fn list_for_user(&self, user_id: i32) -> Result<Vec<GrantDetail>, ApiError> {
        let grants = user_category_permissions::Entity::find()
            .filter(user_category_permissions::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .context("list grants for user")?;

        let category_ids: Vec<i32> = grants.iter().map(|g| g.category_id).collect();
        let category_names: HashMap<i32, String> = categories::Entity::find()
            .filter(categories::Column::Id.is_in(category_ids))
            .all(&self.db)
            .await
            .context("resolve grant categories")?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let granter_ids: Vec<i32> = grants.iter().map(|g| g.granted_by_user_id).collect();
        let granter_names: HashMap<i32, String> = users::Entity::find()
            .filter(users::Column::Id.is_in(granter_ids))
            .all(&self.db)
            .await
            .context("resolve granters")?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        Ok(grants
            .into_iter()
            .map(|grant| GrantDetail {
                category_id: grant.category_id,
                // The category FK cascades grant deletion, so the name is
                // present for any live grant; default guards a torn read.
                category_name: category_names
                    .get(&grant.category_id)
                    .cloned()
                    .unwrap_or_default(),
                granted_at: grant.granted_at,
                granted_by_username: granter_names.get(&grant.granted_by_user_id).cloned(),
            })
            .collect())
    }
}

// ── Employee repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEmployeeRepository {
    pub db: DatabaseConnection,
}

impl EmployeeRepository for DbEmployeeRepository {
    async fn list(&self) -> Result<Vec<Employee>, ApiError> {
        let models = employees::Entity::find()
            .all(&self.db)
            .await
            .context("list employees")?;
        Ok(models.into_iter().map(employee_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, ApiError> {
        let model = employees::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find employee by id")?;
        Ok(model.map(employee_from_model))
    }

    async fn create(&self, employee: &Employee) -> Result<(), ApiError> {
        employees::ActiveModel {
            id: Set(employee.id),
            name: Set(employee.name.clone()),
            email: Set(employee.email.clone()),
            phone: Set(employee.phone.clone()),
            salary: Set(employee.salary),
        }
        .insert(&self.db)
        .await
        .context("create employee")?;
        Ok(())
    }

    async fn update(&self, id: Uuid, fields: &EmployeeFields) -> Result<bool, ApiError> {
        let existing = employees::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find employee for update")?;
        match existing {
            Some(row) => {
                let mut employee = row.into_active_model();
                employee.name = Set(fields.name.clone());
                employee.email = Set(fields.email.clone());
                employee.phone = Set(fields.phone.clone());
                employee.salary = Set(fields.salary);
                employee
                    .update(&self.db)
                    .await
                    .context("update employee")?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = employees::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete employee")?;
        Ok(result.rows_affected > 0)
    }
}

fn employee_from_model(model: employees::Model) -> Employee {
    Employee {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        salary: model.salary,
    }
}
