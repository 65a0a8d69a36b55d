use crate::utils::webutils::{form_config, json_config, path_config, query_config, validate_token};
use actix_web::web;

pub mod articles;
pub mod auth;
pub mod contacts;
pub mod health;
pub mod users;

pub const API_V1_PREFIX: &str = "/api/v1";

/// Routes only; the caller registers the `PostgresService`, `TokenIssuer` and
/// `AvatarStorage` app data.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let user_auth = actix_web_httpauth::middleware::HttpAuthentication::bearer(validate_token);

    cfg.app_data(json_config())
        .app_data(form_config())
        .app_data(query_config())
        .app_data(path_config());

    cfg.service(
        web::scope("/health").service(health::health)
    );
    cfg.service(
        web::scope(API_V1_PREFIX)
            .service(
                web::scope("/auth")
                    .service(auth::register::register)
                    .service(auth::login::login)
                    .service(auth::password::change_password)
                    .service(auth::password::verify_birthday)
                    .service(auth::password::reset_password)
            )
            .service(
                web::scope("/articles")
                    .service(articles::list)
                    .service(articles::create)
                    .service(articles::author_stats)
                    .service(articles::detail)
                    .service(articles::update)
                    .service(articles::remove)
                    .wrap(user_auth.clone())
            )
            .service(
                web::scope("/contacts")
                    .service(contacts::list)
                    .service(contacts::create)
                    .service(contacts::detail)
                    .service(contacts::update)
                    .service(contacts::remove)
                    .wrap(user_auth.clone())
            )
            .service(
                web::scope("/users")
                    .service(users::profile::get_me)
                    .service(users::profile::update_me)
                    .service(users::avatar::upload_avatar)
                    .service(users::profile::get_user)
                    .wrap(user_auth)
            )
    );
}
