use std::sync::Arc;

use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path as ObjectStorePath;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions};

use crate::config::StorageConfig;
use crate::types::error::AppError;
use crate::utils::token::new_id;

/// Avatar blobs in an S3-compatible bucket, addressed by public URL.
#[derive(Clone)]
pub struct AvatarStorage {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    public_url: String,
}

impl AvatarStorage {
    pub fn new(store: Arc<dyn ObjectStore>, bucket: impl Into<String>, public_url: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(cfg: &StorageConfig) -> Result<Self, AppError> {
        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&cfg.bucket)
            .with_region(&cfg.region)
            .with_access_key_id(&cfg.access_key)
            .with_secret_access_key(&cfg.secret_key);

        // MinIO and friends need path-style requests and usually plain http
        if let Some(endpoint) = &cfg.endpoint {
            builder = builder
                .with_endpoint(endpoint)
                .with_virtual_hosted_style_request(false)
                .with_allow_http(endpoint.starts_with("http://"));
        }

        let store = builder
            .build()
            .map_err(|e| AppError::Upstream(format!("S3: {e}")))?;

        Ok(Self::new(Arc::new(store), cfg.bucket.clone(), cfg.public_url.clone()))
    }

    /// `<uuid>.<ext>`, keeping the uploaded file's extension when it has one.
    pub fn object_key(filename: Option<&str>) -> String {
        let ext = filename
            .and_then(|f| f.rsplit_once('.'))
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));
        match ext {
            Some(ext) => format!("{}.{}", new_id(), ext.to_ascii_lowercase()),
            None => new_id().to_string(),
        }
    }

    pub fn public_url_for(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_url, self.bucket, key)
    }

    /// Writes the blob and returns its public URL.
    pub async fn upload(&self, key: &str, content_type: &str, data: Bytes) -> Result<String, AppError> {
        let location = ObjectStorePath::from(key);

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        let opts = PutOptions {
            attributes,
            ..Default::default()
        };

        let size = data.len();
        self.store
            .put_opts(&location, data.into(), opts)
            .await
            .map_err(|e| {
                tracing::error!("avatar upload to {key} failed: {e}");
                AppError::Upstream(format!("avatar upload failed: {e}"))
            })?;

        tracing::info!(key, size, "avatar stored");
        Ok(self.public_url_for(key))
    }

    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }
}
