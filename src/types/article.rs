use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::types::user::UserRes;

pub const DEFAULT_PAGE_LIMIT: u64 = 100;

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct RArticleCreate {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,
    pub content: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, Validate)]
pub struct RArticleUpdate {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct ArticleQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
    pub author_id: Option<Uuid>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ArticleRes {
    pub id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::article::Model> for ArticleRes {
    fn from(m: entity::article::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            content: m.content,
            author_id: m.author_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ArticleDetailRes {
    #[serde(flatten)]
    pub article: ArticleRes,
    pub author: UserRes,
}

#[derive(Serialize, Deserialize, Debug, Clone, FromQueryResult)]
pub struct AuthorStats {
    pub author_id: Uuid,
    pub username: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub article_count: i64,
}
