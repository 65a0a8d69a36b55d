use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Contact {
    Table,
    Id,
    UserId,
    Name,
    Province,
    City,
    Address,
    PostalCode,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Contact::Table)
                .if_not_exists()
                .col(ColumnDef::new(Contact::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Contact::UserId).uuid().not_null())
                .col(ColumnDef::new(Contact::Name).string_len(100).not_null())
                .col(ColumnDef::new(Contact::Province).string_len(50).null())
                .col(ColumnDef::new(Contact::City).string_len(50).null())
                .col(ColumnDef::new(Contact::Address).string_len(200).null())
                .col(ColumnDef::new(Contact::PostalCode).string_len(20).null())
                .col(ColumnDef::new(Contact::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .col(ColumnDef::new(Contact::UpdatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_contact_owner")
                        .from(Contact::Table, Contact::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        // owner-scoped lookups always filter on user_id first
        m.create_index(
            Index::create()
                .name("idx_contact_owner")
                .table(Contact::Table)
                .col(Contact::UserId)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(Contact::Table).if_exists().to_owned()).await
    }
}
