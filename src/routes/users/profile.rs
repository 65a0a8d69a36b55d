use actix_web::{get, put, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::db::postgres_service::PostgresService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{RUserUpdate, UserRes};
use crate::utils::identity::CurrentUser;

#[get("/me")]
pub async fn get_me(user: CurrentUser) -> ApiResult<UserRes> {
    Ok(ApiResponse::Ok(user.0.into()))
}

#[put("/me")]
pub async fn update_me(
    user: CurrentUser,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RUserUpdate>,
) -> ApiResult<UserRes> {
    body.validate()?;
    let updated = db.update_user(&user.id, body.into_inner()).await?;
    Ok(ApiResponse::Ok(updated.into()))
}

/// Any authenticated user may read any profile.
#[get("/{id}")]
pub async fn get_user(
    _user: CurrentUser,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<Uuid>,
) -> ApiResult<UserRes> {
    let user = db.get_user_by_id(&path.into_inner()).await?;
    Ok(ApiResponse::Ok(user.into()))
}
