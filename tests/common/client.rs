use actix_web::{web, App};
use chrono::Duration;
use object_store::memory::InMemory;
use std::sync::Arc;
use folio_api::{
    db::postgres_service::PostgresService,
    types::{error::AppError, user::DBUserCreate},
    utils::{password, storage::AvatarStorage, token::TokenIssuer},
};
use uuid::Uuid;

pub const TEST_SECRET: &[u8] = b"integration-test-secret";
pub const PUBLIC_URL: &str = "http://localhost:9000";
pub const BUCKET: &str = "avatars";

pub struct TestClient {
    pub db: Arc<PostgresService>,
    pub tokens: TokenIssuer,
    pub storage: AvatarStorage,
}

impl TestClient {
    pub fn new(db: Arc<PostgresService>) -> Self {
        TestClient {
            db,
            tokens: TokenIssuer::new(TEST_SECRET, Duration::minutes(30)),
            storage: AvatarStorage::new(Arc::new(InMemory::new()), BUCKET, PUBLIC_URL),
        }
    }

    pub fn create_app(&self) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(Arc::clone(&self.db)))
            .app_data(web::Data::new(self.tokens.clone()))
            .app_data(web::Data::new(self.storage.clone()))
            .configure(folio_api::routes::configure_routes)
    }

    /// Inserts a user straight into the database and hands back a bearer token for it.
    pub async fn create_test_user(&self, username: Option<&str>) -> Result<(Uuid, String), AppError> {
        let random_id = Uuid::new_v4();
        let username = username
            .map(str::to_string)
            .unwrap_or_else(|| format!("user-{}", &random_id.simple().to_string()[..12]));

        let user = self.db.create_user(DBUserCreate {
            username: username.clone(),
            email: format!("{}@test.com", username),
            password_hash: password::hash("password").expect("Failed to hash password"),
            birthday: None,
        }).await?;

        let access_token = self.tokens.issue_default(&user.username).expect("Failed to issue token");

        Ok((user.id, access_token))
    }
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
