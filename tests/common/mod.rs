#![allow(dead_code)]

use std::sync::Arc;
use testcontainers_modules::postgres::Postgres;
use testcontainers_modules::testcontainers::{runners::AsyncRunner, ContainerAsync};
use folio_api::db::postgres_service::PostgresService;

pub mod client;

pub struct TestContext {
    pub db: Arc<PostgresService>,
    pub db_url: String,
    pub _container: ContainerAsync<Postgres>,
}

impl TestContext {
    pub async fn new() -> TestContext {
        let _ = env_logger::builder().is_test(true).try_init();

        let postgres = Postgres::default();
        let container = postgres.start().await.expect("Failed to start postgres container");

        let host = container.get_host().await.expect("Failed to get host");
        let port = container.get_host_port_ipv4(5432).await.expect("Failed to get port");

        let db_url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

        let db = Arc::new(
            PostgresService::new(&db_url)
                .await
                .expect("Failed to initialize PostgresService")
        );

        TestContext {
            db,
            db_url,
            _container: container,
        }
    }
}

// Test data helpers
pub mod test_data {
    use chrono::NaiveDate;
    use folio_api::types::user::RUserRegister;

    pub fn alice() -> RUserRegister {
        RUserRegister {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "pw123".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 5, 17),
        }
    }

    pub fn bob() -> RUserRegister {
        RUserRegister {
            username: "bob".to_string(),
            email: "b@x.com".to_string(),
            password: "hunter22".to_string(),
            birthday: None,
        }
    }
}
