use actix_web::{delete, get, post, put, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::db::postgres_service::PostgresService;
use crate::types::contact::{ContactQuery, ContactRes, RContactCreate, RContactUpdate};
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::identity::CurrentUser;

#[get("")]
pub async fn list(
    user: CurrentUser,
    db: web::Data<Arc<PostgresService>>,
    query: web::Query<ContactQuery>,
) -> ApiResult<Vec<ContactRes>> {
    let contacts = db.list_contacts(user.id, query.into_inner()).await?;
    Ok(ApiResponse::Ok(contacts.into_iter().map(ContactRes::from).collect()))
}

#[post("")]
pub async fn create(
    user: CurrentUser,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RContactCreate>,
) -> ApiResult<ContactRes> {
    body.validate()?;
    let contact = db.create_contact(user.id, body.into_inner()).await?;
    Ok(ApiResponse::Created(contact.into()))
}

#[get("/{id}")]
pub async fn detail(
    user: CurrentUser,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<Uuid>,
) -> ApiResult<ContactRes> {
    let contact = db.get_contact(path.into_inner(), user.id).await?;
    Ok(ApiResponse::Ok(contact.into()))
}

#[put("/{id}")]
pub async fn update(
    user: CurrentUser,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<Uuid>,
    body: web::Json<RContactUpdate>,
) -> ApiResult<ContactRes> {
    body.validate()?;
    let contact = db
        .update_contact(path.into_inner(), body.into_inner(), user.id)
        .await?;
    Ok(ApiResponse::Ok(contact.into()))
}

#[delete("/{id}")]
pub async fn remove(
    user: CurrentUser,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<Uuid>,
) -> ApiResult<()> {
    db.delete_contact(path.into_inner(), user.id).await?;
    Ok(ApiResponse::NoContent)
}
