use actix_multipart::Multipart;
use actix_web::{post, web};
use bytes::BytesMut;
use futures_util::TryStreamExt;
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::UserRes;
use crate::utils::identity::CurrentUser;
use crate::utils::storage::AvatarStorage;

pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

struct UploadedFile {
    filename: Option<String>,
    content_type: String,
    data: BytesMut,
}

/// Pulls the `file` part out of the form; other parts are drained and ignored.
async fn read_file_part(mut payload: Multipart) -> Result<UploadedFile, AppError> {
    let bad = |e: actix_multipart::MultipartError| AppError::Validation(format!("invalid multipart body: {e}"));

    while let Some(mut field) = payload.try_next().await.map_err(bad)? {
        let is_file = field
            .content_disposition()
            .and_then(|cd| cd.get_name())
            .map(|name| name == "file")
            .unwrap_or(false);
        if !is_file {
            while field.try_next().await.map_err(bad)?.is_some() {}
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);
        let content_type = field
            .content_type()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_default();

        let mut data = BytesMut::new();
        while let Some(chunk) = field.try_next().await.map_err(bad)? {
            if data.len() + chunk.len() > MAX_AVATAR_BYTES {
                return Err(AppError::Validation("avatar exceeds 5 MiB".into()));
            }
            data.extend_from_slice(&chunk);
        }

        return Ok(UploadedFile { filename, content_type, data });
    }

    Err(AppError::Validation("missing `file` part".into()))
}

#[post("/avatar")]
pub async fn upload_avatar(
    user: CurrentUser,
    db: web::Data<Arc<PostgresService>>,
    storage: web::Data<AvatarStorage>,
    payload: Multipart,
) -> ApiResult<UserRes> {
    let file = read_file_part(payload).await?;
    if !file.content_type.starts_with("image/") {
        return Err(AppError::Validation("only image files can be uploaded".into()));
    }

    let key = AvatarStorage::object_key(file.filename.as_deref());
    let url = storage.upload(&key, &file.content_type, file.data.freeze()).await?;
    let updated = db.set_user_avatar(&user.id, url).await?;

    Ok(ApiResponse::Ok(updated.into()))
}
