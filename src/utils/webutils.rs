use actix_cors::Cors;
use actix_web::{dev::ServiceRequest, error::ErrorUnauthorized, web, HttpMessage};
use actix_web_httpauth::extractors::bearer::BearerAuth;

use crate::types::error::AppError;
use crate::utils::token::TokenIssuer;

/// Bearer middleware validator: checks signature and expiry, then stashes the
/// claims on the request for [`crate::utils::identity::CurrentUser`].
pub async fn validate_token(req: ServiceRequest, credentials: BearerAuth) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    let tokens = match req.app_data::<web::Data<TokenIssuer>>() {
        Some(tokens) => tokens.clone(),
        None => return Err((ErrorUnauthorized("Token issuer not configured"), req)),
    };

    match tokens.validate(credentials.token()) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            Ok(req)
        }
        Err(e) => {
            tracing::debug!("rejected bearer token: {e}");
            Err((AppError::Unauthorized.into(), req))
        }
    }
}

/// CORS for the browser frontend. An empty list or `*` allows any origin;
/// methods and headers are always open.
pub fn build_cors(origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        tracing::debug!("CORS: allowing any origin");
        cors = cors.allow_any_origin();
    } else {
        for origin in origins {
            cors = cors.allowed_origin(origin);
        }
        tracing::debug!("CORS: allowed origins {:?}", origins);
    }
    cors
}

/// Extractor configs turning body/query/path parse failures (bad dates,
/// missing fields, malformed ids) into 400s with the parser's message.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

pub fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}
