use std::sync::Arc;

use actix_web::{dev::Payload, http::header::Header, web, FromRequest, HttpMessage, HttpRequest};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use entity::user::Model as UserModel;
use futures_util::future::LocalBoxFuture;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::token::{Claims, IdentityError};
use crate::utils::token::TokenIssuer;

/// Bearer token -> user row. Fails if the token does not validate or if its
/// subject has been deleted since issuance. A failed lookup is `Lookup`, not
/// `UserNotFound`.
pub async fn resolve_identity(
    db: &PostgresService,
    tokens: &TokenIssuer,
    bearer: &str,
) -> Result<UserModel, IdentityError> {
    let claims = tokens.validate(bearer)?;
    resolve_subject(db, &claims).await
}

pub async fn resolve_subject(db: &PostgresService, claims: &Claims) -> Result<UserModel, IdentityError> {
    match db.find_user_by_username(&claims.sub).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => {
            tracing::debug!(subject = %claims.sub, "token subject no longer exists");
            Err(IdentityError::UserNotFound)
        }
        Err(e) => {
            tracing::error!("identity lookup failed: {e}");
            Err(IdentityError::Lookup)
        }
    }
}

/// The authenticated caller, extracted per request.
///
/// Routes behind the bearer middleware already carry validated [`Claims`] in
/// the request extensions; elsewhere the Authorization header is validated here.
pub struct CurrentUser(pub UserModel);

impl std::ops::Deref for CurrentUser {
    type Target = UserModel;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        let db = req.app_data::<web::Data<Arc<PostgresService>>>().cloned();
        let tokens = req.app_data::<web::Data<TokenIssuer>>().cloned();
        let bearer = if claims.is_none() {
            Authorization::<Bearer>::parse(req)
                .ok()
                .map(|auth| auth.into_scheme().token().to_string())
        } else {
            None
        };

        Box::pin(async move {
            let db = db.ok_or_else(|| AppError::Internal("database handle not configured".into()))?;
            let user = match (claims, bearer) {
                (Some(claims), _) => resolve_subject(&db, &claims).await?,
                (None, Some(bearer)) => {
                    let tokens = tokens.ok_or_else(|| AppError::Internal("token issuer not configured".into()))?;
                    resolve_identity(&db, &tokens, &bearer).await?
                }
                (None, None) => return Err(AppError::Unauthorized),
            };
            Ok(CurrentUser(user))
        })
    }
}
