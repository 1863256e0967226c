use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserLogins::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserLogins::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserLogins::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(UserLogins::LoginTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserLogins::IpAddress).string())
                    .col(ColumnDef::new(UserLogins::UserAgent).string())
                    .foreign_key(
                        // Restrict, not cascade: audit rows are removed
                        // explicitly inside the delete-user transaction.
                        ForeignKey::create()
                            .from(UserLogins::Table, UserLogins::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(UserLogins::Table)
                    .col(UserLogins::UserId)
                    .name("idx_user_logins_user_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserLogins::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserLogins {
    Table,
    Id,
    UserId,
    LoginTime,
    IpAddress,
    UserAgent,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
