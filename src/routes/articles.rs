use actix_web::{delete, get, post, put, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::db::postgres_service::PostgresService;
use crate::types::article::{
    ArticleDetailRes, ArticleQuery, ArticleRes, AuthorStats, RArticleCreate, RArticleUpdate,
};
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::identity::CurrentUser;

#[get("")]
pub async fn list(
    _user: CurrentUser,
    db: web::Data<Arc<PostgresService>>,
    query: web::Query<ArticleQuery>,
) -> ApiResult<Vec<ArticleRes>> {
    let articles = db.list_articles(query.into_inner()).await?;
    Ok(ApiResponse::Ok(articles.into_iter().map(ArticleRes::from).collect()))
}

#[post("")]
pub async fn create(
    user: CurrentUser,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RArticleCreate>,
) -> ApiResult<ArticleRes> {
    body.validate()?;
    let article = db.create_article(user.id, body.into_inner()).await?;
    Ok(ApiResponse::Created(article.into()))
}

#[get("/author/stats")]
pub async fn author_stats(
    _user: CurrentUser,
    db: web::Data<Arc<PostgresService>>,
) -> ApiResult<Vec<AuthorStats>> {
    Ok(ApiResponse::Ok(db.author_stats().await?))
}

#[get("/{id}")]
pub async fn detail(
    _user: CurrentUser,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<Uuid>,
) -> ApiResult<ArticleDetailRes> {
    let (article, author) = db.get_article_with_author(path.into_inner()).await?;
    Ok(ApiResponse::Ok(ArticleDetailRes {
        article: article.into(),
        author: author.into(),
    }))
}

#[put("/{id}")]
pub async fn update(
    user: CurrentUser,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<Uuid>,
    body: web::Json<RArticleUpdate>,
) -> ApiResult<ArticleRes> {
    body.validate()?;
    let article = db
        .update_article(path.into_inner(), body.into_inner(), user.id)
        .await?;
    Ok(ApiResponse::Ok(article.into()))
}

#[delete("/{id}")]
pub async fn remove(
    user: CurrentUser,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<Uuid>,
) -> ApiResult<()> {
    db.delete_article(path.into_inner(), user.id).await?;
    Ok(ApiResponse::NoContent)
}
