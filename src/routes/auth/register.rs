use actix_web::{post, web};
use std::sync::Arc;
use validator::Validate;

use crate::db::postgres_service::PostgresService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{DBUserCreate, RUserRegister, UserRes};
use crate::utils::password;

#[post("/register")]
pub async fn register(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RUserRegister>,
) -> ApiResult<UserRes> {
    let body = body.into_inner();
    body.validate()?;

    let password_hash = password::hash(&body.password)?;
    let user = db
        .create_user(DBUserCreate {
            username: body.username,
            email: body.email,
            password_hash,
            birthday: body.birthday,
        })
        .await?;

    tracing::info!(user_id = %user.id, "registered user");
    Ok(ApiResponse::Created(user.into()))
}
