use crate::db::{ilike_contains, page, postgres_service::PostgresService};
use crate::types::article::{ArticleQuery, AuthorStats, RArticleCreate, RArticleUpdate};
use crate::types::error::AppError;
use crate::utils::token;
use chrono::Utc;
use entity::article::{ActiveModel as ArticleActive, Column, Entity as Article, Model as ArticleModel};
use entity::user::{Column as UserColumn, Entity as User, Model as UserModel, Relation as UserRelation};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, JoinType, ModelTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

/*
 Articles are readable by every authenticated user but only their author may
 change them. Mutations look the row up by (id, author_id) in one query, so a
 foreign article and a missing one both come back as NotFound.
 */
impl PostgresService {
    pub async fn list_articles(&self, query: ArticleQuery) -> Result<Vec<ArticleModel>, AppError> {
        let (offset, limit) = page(query.skip, query.limit);
        let mut finder = Article::find();

        if let Some(author_id) = query.author_id {
            finder = finder.filter(Column::AuthorId.eq(author_id));
        }
        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            finder = finder.filter(ilike_contains(Column::Title, search));
        }

        Ok(finder
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn create_article(&self, author_id: Uuid, payload: RArticleCreate) -> Result<ArticleModel, AppError> {
        let now = Utc::now();
        Ok(ArticleActive {
            id: Set(token::new_id()),
            title: Set(payload.title),
            content: Set(payload.content),
            author_id: Set(author_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.database_connection)
        .await?)
    }

    pub async fn get_article(&self, id: Uuid) -> Result<ArticleModel, AppError> {
        Ok(Article::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Article does not exist".into()))?)
    }

    pub async fn get_article_with_author(&self, id: Uuid) -> Result<(ArticleModel, UserModel), AppError> {
        let article = self.get_article(id).await?;
        let author = article
            .find_related(User)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Author does not exist".into()))?;
        Ok((article, author))
    }

    async fn get_owned_article(&self, id: Uuid, requester: Uuid) -> Result<ArticleModel, AppError> {
        let found = Article::find_by_id(id)
            .filter(Column::AuthorId.eq(requester))
            .one(&self.database_connection)
            .await?;
        found.ok_or_else(|| {
            tracing::debug!(%id, %requester, "article missing or not owned by requester");
            AppError::NotFound
        })
    }

    pub async fn update_article(&self, id: Uuid, patch: RArticleUpdate, requester: Uuid) -> Result<ArticleModel, AppError> {
        let mut am: ArticleActive = self.get_owned_article(id, requester).await?.into();
        if let Some(v) = patch.title { am.title = Set(v); }
        if let Some(v) = patch.content { am.content = Set(Some(v)); }
        am.updated_at = Set(Utc::now());
        Ok(am.update(&self.database_connection).await?)
    }

    pub async fn delete_article(&self, id: Uuid, requester: Uuid) -> Result<(), AppError> {
        let article = self.get_owned_article(id, requester).await?;
        article.delete(&self.database_connection).await?;
        Ok(())
    }

    /// One row per user, authors without articles included with a zero count.
    pub async fn author_stats(&self) -> Result<Vec<AuthorStats>, AppError> {
        Ok(User::find()
            .select_only()
            .column_as(UserColumn::Id, "author_id")
            .column(UserColumn::Username)
            .column(UserColumn::Email)
            .column(UserColumn::AvatarUrl)
            .column_as(Expr::col((Article, Column::Id)).count(), "article_count")
            .join(JoinType::LeftJoin, UserRelation::Article.def())
            .group_by(UserColumn::Id)
            .group_by(UserColumn::Username)
            .group_by(UserColumn::Email)
            .group_by(UserColumn::AvatarUrl)
            .order_by_asc(UserColumn::Username)
            .into_model::<AuthorStats>()
            .all(&self.database_connection)
            .await?)
    }
}
