use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserCategoryPermissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserCategoryPermissions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserCategoryPermissions::UserId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserCategoryPermissions::CategoryId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserCategoryPermissions::GrantedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserCategoryPermissions::GrantedByUserId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                UserCategoryPermissions::Table,
                                UserCategoryPermissions::UserId,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        // Deleting a category removes its grants; deleting a
                        // user never silently removes grant rows (restrict).
                        ForeignKey::create()
                            .from(
                                UserCategoryPermissions::Table,
                                UserCategoryPermissions::CategoryId,
                            )
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                UserCategoryPermissions::Table,
                                UserCategoryPermissions::GrantedByUserId,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(UserCategoryPermissions::Table)
                    .col(UserCategoryPermissions::UserId)
                    .col(UserCategoryPermissions::CategoryId)
                    .unique()
                    .name("idx_user_category_permissions_user_id_category_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(UserCategoryPermissions::Table)
                    .col(UserCategoryPermissions::CategoryId)
                    .name("idx_user_category_permissions_category_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(UserCategoryPermissions::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum UserCategoryPermissions {
    Table,
    Id,
    UserId,
    CategoryId,
    GrantedAt,
    GrantedByUserId,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
}
