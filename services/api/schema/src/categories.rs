use sea_orm::entity::prelude::*;

/// Category record. Name uniqueness is enforced case-insensitively at the
/// application layer, not by the database.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub link: Option<String>,
    pub created_by_user_id: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedByUserId",
        to = "super::users::Column::Id"
    )]
    CreatedByUser,
    #[sea_orm(has_many = "super::user_category_permissions::Entity")]
    UserCategoryPermissions,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreatedByUser.def()
    }
}

impl Related<super::user_category_permissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserCategoryPermissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
