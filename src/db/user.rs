use crate::db::postgres_service::PostgresService;
use crate::{
    types::{error::AppError, user::{DBUserCreate, RUserUpdate}},
    utils::token,
};
use chrono::Utc;
use entity::user::{ActiveModel as UserActive, Column, Entity as User, Model as UserModel};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

/// A write that lost a race against the `username`/`email` unique keys reports
/// the same duplicate error as the up-front checks.
fn map_write_err(err: DbErr) -> AppError {
    if let Some(SqlErr::UniqueConstraintViolation(msg)) = err.sql_err() {
        if msg.contains("email") {
            return AppError::DuplicateEmail;
        }
        if msg.contains("username") {
            return AppError::DuplicateUsername;
        }
    }
    err.into()
}

async fn exists_where<C: ConnectionTrait>(conn: &C, column: Column, value: &str) -> Result<bool, AppError> {
    Ok(User::find().filter(column.eq(value)).count(conn).await? > 0)
}

impl PostgresService {
    pub async fn user_exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        exists_where(&self.database_connection, Column::Email, email).await
    }

    pub async fn user_exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        exists_where(&self.database_connection, Column::Username, username).await
    }

    pub async fn get_user_by_id(&self, id: &Uuid) -> Result<UserModel, AppError> {
        Ok(User::find_by_id(*id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<UserModel>, AppError> {
        Ok(User::find()
            .filter(Column::Username.eq(username))
            .one(&self.database_connection)
            .await?)
    }

    /// Registration: uniqueness is checked (username first) before anything is
    /// written; a concurrent registration that slips past the checks is caught
    /// by the unique keys and reported the same way.
    pub async fn create_user(&self, payload: DBUserCreate) -> Result<UserModel, AppError> {
        let txn = self.database_connection.begin().await?;
        if exists_where(&txn, Column::Username, &payload.username).await? {
            return Err(AppError::DuplicateUsername);
        }
        if exists_where(&txn, Column::Email, &payload.email).await? {
            return Err(AppError::DuplicateEmail);
        }
        let uid = token::new_id();
        let now = Utc::now();

        let user = UserActive {
            id: Set(uid),
            username: Set(payload.username),
            email: Set(payload.email),
            password_hash: Set(payload.password_hash),
            birthday: Set(payload.birthday),
            avatar_url: Set(None),
            balance: Set(0.0),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(map_write_err)?;

        txn.commit().await.map_err(map_write_err)?;
        Ok(user)
    }

    /// Applies only the fields present in `patch`.
    pub async fn update_user(&self, user_id: &Uuid, patch: RUserUpdate) -> Result<UserModel, AppError> {
        let current = self.get_user_by_id(user_id).await?;

        if let Some(email) = &patch.email {
            if *email != current.email && self.user_exists_by_email(email).await? {
                return Err(AppError::DuplicateEmail);
            }
        }

        let mut am: UserActive = current.into();
        if let Some(v) = patch.email { am.email = Set(v); }
        if let Some(v) = patch.birthday { am.birthday = Set(Some(v)); }
        if let Some(v) = patch.avatar_url { am.avatar_url = Set(Some(v)); }
        if let Some(v) = patch.balance { am.balance = Set(v); }
        am.updated_at = Set(Utc::now());
        am.update(&self.database_connection).await.map_err(map_write_err)
    }

    pub async fn set_user_password_hash(&self, user_id: &Uuid, password_hash: String) -> Result<(), AppError> {
        let mut am: UserActive = self.get_user_by_id(user_id).await?.into();
        am.password_hash = Set(password_hash);
        am.updated_at = Set(Utc::now());
        Ok(am.update(&self.database_connection).await.map(|_| ())?)
    }

    pub async fn set_user_avatar(&self, user_id: &Uuid, avatar_url: String) -> Result<UserModel, AppError> {
        let mut am: UserActive = self.get_user_by_id(user_id).await?.into();
        am.avatar_url = Set(Some(avatar_url));
        am.updated_at = Set(Utc::now());
        Ok(am.update(&self.database_connection).await?)
    }

    pub async fn delete_user(&self, user_id: &Uuid) -> Result<(), AppError> {
        let res = User::delete_by_id(*user_id).exec(&self.database_connection).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
