use actix_web::{middleware::Logger, web, App, HttpServer};
use folio_api::config::EnvConfig;
use folio_api::db::postgres_service::PostgresService;
use folio_api::routes::configure_routes;
use folio_api::utils::{storage::AvatarStorage, token::TokenIssuer, webutils::build_cors};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    let config = EnvConfig::from_env();
    let addr = format!("0.0.0.0:{}", config.port);

    let postgres_service =
        Arc::new(PostgresService::new(&config.db_url).await.map_err(std::io::Error::other)?);
    let tokens = web::Data::new(TokenIssuer::from_config(&config.jwt));
    let storage =
        web::Data::new(AvatarStorage::from_config(&config.storage).map_err(std::io::Error::other)?);
    let cors_origins = config.cors_origins.clone();

    tracing::info!("Starting server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&cors_origins))
            .wrap(Logger::default())
            .app_data(web::Data::new(Arc::clone(&postgres_service)))
            .app_data(tokens.clone())
            .app_data(storage.clone())
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}
