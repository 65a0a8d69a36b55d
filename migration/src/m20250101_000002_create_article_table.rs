use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Article {
    Table,
    Id,
    Title,
    Content,
    AuthorId,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Article::Table)
                .if_not_exists()
                .col(ColumnDef::new(Article::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Article::Title).string_len(255).not_null())
                .col(ColumnDef::new(Article::Content).text().null())
                .col(ColumnDef::new(Article::AuthorId).uuid().not_null())
                .col(ColumnDef::new(Article::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .col(ColumnDef::new(Article::UpdatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_article_author")
                        .from(Article::Table, Article::AuthorId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_article_author")
                .table(Article::Table)
                .col(Article::AuthorId)
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_article_title")
                .table(Article::Table)
                .col(Article::Title)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(Article::Table).if_exists().to_owned()).await
    }
}
