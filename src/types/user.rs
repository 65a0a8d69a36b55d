use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct RUserRegister {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,
    #[validate(email(message = "invalid email address"), length(max = 100))]
    pub email: String,
    #[validate(length(min = 1, max = 128, message = "password must not be empty"))]
    pub password: String,
    pub birthday: Option<NaiveDate>,
}

/// Row-level insert payload; `password_hash` is already digested.
pub struct DBUserCreate {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub birthday: Option<NaiveDate>,
}

/// Partial profile update. Absent fields are left untouched.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Validate)]
pub struct RUserUpdate {
    #[validate(email(message = "invalid email address"), length(max = 100))]
    pub email: Option<String>,
    pub birthday: Option<NaiveDate>,
    #[validate(length(max = 255))]
    pub avatar_url: Option<String>,
    pub balance: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct RChangePassword {
    pub username: String,
    pub old_password: String,
    #[validate(length(min = 1, max = 128, message = "password must not be empty"))]
    pub new_password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RVerifyBirthday {
    pub username: String,
    pub birthday: NaiveDate,
}

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct RResetPassword {
    pub username: String,
    pub birthday: NaiveDate,
    #[validate(length(min = 1, max = 128, message = "password must not be empty"))]
    pub new_password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserRes {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
    pub avatar_url: Option<String>,
    pub balance: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::user::Model> for UserRes {
    fn from(m: entity::user::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            email: m.email,
            birthday: m.birthday,
            avatar_url: m.avatar_url,
            balance: m.balance,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
