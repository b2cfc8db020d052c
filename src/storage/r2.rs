use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::catalog::{CatalogError, CatalogResult, ObjectStore};
use crate::config::StorageConfig;

/// Build an S3 client pointed at the configured R2 endpoint.
///
/// Credentials and region are explicit, so nothing is resolved from the
/// network at start-up.
pub async fn build_s3_client(config: &StorageConfig) -> Client {
    let credentials = Credentials::new(
        &config.access_key_id,
        &config.secret_access_key,
        None,
        None,
        "newsdesk-api",
    );

    let shared_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .credentials_provider(credentials)
        .load()
        .await;

    let builder = aws_sdk_s3::config::Builder::from(&shared_config)
        .endpoint_url(config.endpoint_url())
        .force_path_style(true);

    Client::from_conf(builder.build())
}

/// Cloudflare R2 bucket (or any S3-compatible one).
#[derive(Clone)]
pub struct R2ObjectStore {
    client: Client,
    bucket: String,
}

impl R2ObjectStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub async fn from_config(config: &StorageConfig) -> Self {
        Self::new(build_s3_client(config).await, config.bucket.clone())
    }
}

#[async_trait]
impl ObjectStore for R2ObjectStore {
    async fn put_file(&self, key: &str, path: &Path, content_type: &str) -> CatalogResult<()> {
        let body = ByteStream::from_path(path).await.map_err(|e| {
            tracing::error!(stage = "r2.put", path = %path.display(), error = %e, "cannot read staged file");
            CatalogError::upload(e)
        })?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(stage = "r2.put", key, error = %e, "put_object failed");
                CatalogError::Upload(format!("Failed to upload object: {e}"))
            })?;

        Ok(())
    }

    async fn presign_put(&self, key: &str, expires_in: Duration) -> CatalogResult<String> {
        let presign_cfg = PresigningConfig::builder()
            .expires_in(expires_in)
            .build()
            .map_err(|e| CatalogError::Upload(format!("Failed to create presign config: {e}")))?;

        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presign_cfg)
            .await
            .map_err(|e| CatalogError::Upload(format!("Failed to generate presigned URL: {e}")))?;

        Ok(presigned.uri().to_string())
    }

    async fn delete(&self, key: &str) -> CatalogResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(stage = "r2.delete", key, error = %e, "delete_object failed");
                CatalogError::Upload(format!("Failed to delete object: {e}"))
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> StorageConfig {
        StorageConfig {
            account_id: "acct".to_string(),
            bucket: "newsdesk".to_string(),
            public_url: "https://cdn.example.com".to_string(),
            access_key_id: "key".to_string(),
            secret_access_key: "secret".to_string(),
            region: "auto".to_string(),
            endpoint: Some("http://127.0.0.1:9000".to_string()),
            presign_expiry_hours: 1,
        }
    }

    #[tokio::test]
    async fn presigned_url_targets_bucket_and_key() {
        let store = R2ObjectStore::from_config(&storage()).await;
        let url = store.presign_put("7-123", Duration::from_secs(600)).await.unwrap();
        assert!(url.starts_with("http://127.0.0.1:9000/newsdesk/7-123"));
        assert!(url.contains("X-Amz-Expires=600"));
    }
}
