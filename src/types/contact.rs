use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct RContactCreate {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(max = 50))]
    pub province: Option<String>,
    #[validate(length(max = 50))]
    pub city: Option<String>,
    #[validate(length(max = 200))]
    pub address: Option<String>,
    #[validate(length(max = 20))]
    pub postal_code: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, Validate)]
pub struct RContactUpdate {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 50))]
    pub province: Option<String>,
    #[validate(length(max = 50))]
    pub city: Option<String>,
    #[validate(length(max = 200))]
    pub address: Option<String>,
    #[validate(length(max = 20))]
    pub postal_code: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct ContactQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ContactRes {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub province: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::contact::Model> for ContactRes {
    fn from(m: entity::contact::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            name: m.name,
            province: m.province,
            city: m.city,
            address: m.address,
            postal_code: m.postal_code,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
