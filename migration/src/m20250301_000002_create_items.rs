use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Items::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Items::Name).string().not_null())
                    .col(ColumnDef::new(Items::Price).big_integer().not_null())
                    .col(ColumnDef::new(Items::Description).string().null())
                    .col(ColumnDef::new(Items::Status).string().not_null().default("ON_SALE"))
                    .col(ColumnDef::new(Items::UserId).string().not_null())
                    .col(ColumnDef::new(Items::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Items::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_items_user_id")
                            .from(Items::Table, Items::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Owner lookups back every conditional write
        manager
            .create_index(
                Index::create()
                    .name("idx_items_user_id")
                    .table(Items::Table)
                    .col(Items::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Items {
    Table,
    Id,
    Name,
    Price,
    Description,
    Status,
    UserId,
    CreatedAt,
    UpdatedAt,
}
