use actix_web::{post, web};
use entity::user::Model as UserModel;
use std::sync::Arc;
use validator::Validate;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult, MessageRes};
use crate::types::user::{RChangePassword, RResetPassword, RVerifyBirthday};
use crate::utils::password;

#[post("/change-password")]
pub async fn change_password(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RChangePassword>,
) -> ApiResult<MessageRes> {
    body.validate()?;

    let user = match db.find_user_by_username(&body.username).await? {
        Some(user) if password::verify(&body.old_password, &user.password_hash) => user,
        _ => return Err(AppError::BadRequest("incorrect username or old password".into())),
    };

    let digest = password::hash(&body.new_password)?;
    db.set_user_password_hash(&user.id, digest).await?;

    Ok(ApiResponse::Ok(MessageRes::new("password changed")))
}

/// The stored birthday stands in for the old password. Unknown user, no
/// birthday on file and a wrong date are indistinguishable to the caller.
async fn user_matching_birthday(
    db: &PostgresService,
    username: &str,
    birthday: chrono::NaiveDate,
) -> Result<UserModel, AppError> {
    match db.find_user_by_username(username).await? {
        Some(user) if user.birthday == Some(birthday) => Ok(user),
        _ => {
            tracing::warn!(%username, "birthday check failed");
            Err(AppError::BadRequest("incorrect username or birthday".into()))
        }
    }
}

#[post("/verify-birthday")]
pub async fn verify_birthday(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RVerifyBirthday>,
) -> ApiResult<MessageRes> {
    user_matching_birthday(&db, &body.username, body.birthday).await?;
    Ok(ApiResponse::Ok(MessageRes::new("birthday verified")))
}

#[post("/reset-password")]
pub async fn reset_password(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RResetPassword>,
) -> ApiResult<MessageRes> {
    body.validate()?;

    let user = user_matching_birthday(&db, &body.username, body.birthday).await?;
    let digest = password::hash(&body.new_password)?;
    db.set_user_password_hash(&user.id, digest).await?;

    Ok(ApiResponse::Ok(MessageRes::new("password reset")))
}
