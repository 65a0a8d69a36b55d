use actix_web::{post, web};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::token::{LoginForm, TokenRes, TokenType};
use crate::utils::{password, token::TokenIssuer};

/// OAuth2 password-form login: `username` + `password`, form encoded.
#[post("/login")]
pub async fn login(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    tokens: web::Data<TokenIssuer>,
    form: web::Form<LoginForm>,
) -> ApiResult<TokenRes> {
    let user = match db.find_user_by_username(&form.username).await? {
        Some(user) if password::verify(&form.password, &user.password_hash) => user,
        _ => {
            tracing::warn!(username = %form.username, "failed login");
            return Err(AppError::Unauthorized);
        }
    };

    let access_token = tokens.issue_default(&user.username)?;

    Ok(ApiResponse::Ok(TokenRes {
        access_token,
        token_type: TokenType::Bearer,
    }))
}
