use sea_orm::entity::prelude::*;

/// User account record.
///
/// `username` and `email` carry unique indexes; `role` is a free-form string
/// defaulting to `"user"`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub role: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_logins::Entity")]
    UserLogins,
    #[sea_orm(has_many = "super::categories::Entity")]
    Categories,
    #[sea_orm(has_many = "super::user_category_permissions::Entity")]
    UserCategoryPermissions,
}

impl Related<super::user_logins::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserLogins.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl Related<super::user_category_permissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserCategoryPermissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
