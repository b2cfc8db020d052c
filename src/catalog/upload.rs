use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::error::{CatalogError, CatalogResult};
use super::gate::AuthenticatedUser;

/// Every direct upload is stored with this content type.
pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Remote object storage keyed by object name within one bucket.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_file(&self, key: &str, path: &Path, content_type: &str) -> CatalogResult<()>;

    async fn presign_put(&self, key: &str, expires_in: Duration) -> CatalogResult<String>;

    async fn delete(&self, key: &str) -> CatalogResult<()>;
}

/// A staged file waiting for upload. Lives for one upload call only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUploadRequest {
    /// Remote object key.
    pub name: String,
    /// Local staged copy.
    pub path: PathBuf,
}

impl FileUploadRequest {
    /// `{author}-{unix nanos}`. Unique per author in practice, not checked.
    pub fn object_key(author_id: i64, at: DateTime<Utc>) -> String {
        let nanos = at
            .timestamp_nanos_opt()
            .unwrap_or_else(|| at.timestamp_micros().saturating_mul(1_000));
        format!("{}-{}", author_id, nanos)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresignedUpload {
    pub key: String,
    pub url: String,
    pub expires_in_secs: u64,
}

/// Stages uploads on local disk, pushes them to object storage and removes
/// the local copy afterwards.
///
/// Staged -> Uploaded -> Reconciled. A failed put leaves the staged file in
/// place; a failed local delete after a good put is logged and the URL is
/// still returned.
#[derive(Clone)]
pub struct UploadCoordinator {
    store: Arc<dyn ObjectStore>,
    base_url: String,
    temp_dir: PathBuf,
    presign_expiry: Duration,
}

impl UploadCoordinator {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        base_url: impl Into<String>,
        temp_dir: impl Into<PathBuf>,
        presign_expiry: Duration,
    ) -> Self {
        Self {
            store,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            temp_dir: temp_dir.into(),
            presign_expiry,
        }
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }

    /// Writes `bytes` under a fresh local name and pairs it with a new
    /// object key for `author`.
    pub async fn stage(
        &self,
        author: &AuthenticatedUser,
        original_name: &str,
        bytes: &[u8],
    ) -> CatalogResult<FileUploadRequest> {
        tokio::fs::create_dir_all(&self.temp_dir).await.map_err(|e| {
            tracing::error!(stage = "upload.stage", dir = %self.temp_dir.display(), error = %e, "cannot create temp dir");
            CatalogError::upload(e)
        })?;

        let path = self.temp_dir.join(local_name(original_name));
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            tracing::error!(stage = "upload.stage", path = %path.display(), error = %e, "cannot write staged file");
            CatalogError::upload(e)
        })?;

        Ok(FileUploadRequest {
            name: FileUploadRequest::object_key(author.user_id(), Utc::now()),
            path,
        })
    }

    /// Direct flow: put the staged file, then remove it. Returns the public URL.
    pub async fn upload(&self, request: &FileUploadRequest) -> CatalogResult<String> {
        self.store
            .put_file(&request.name, &request.path, IMAGE_CONTENT_TYPE)
            .await
            .map_err(|e| {
                tracing::error!(stage = "upload.put", key = %request.name, error = %e, "remote put failed");
                e
            })?;

        let url = self.public_url(&request.name);
        self.release(request).await;

        tracing::info!(key = %request.name, "image uploaded");
        Ok(url)
    }

    /// Removes the staged file. A failure leaves an orphan in the temp dir
    /// and is only logged.
    pub async fn release(&self, request: &FileUploadRequest) {
        if let Err(e) = tokio::fs::remove_file(&request.path).await {
            tracing::warn!(
                stage = "upload.reconcile",
                path = %request.path.display(),
                error = %e,
                "staged file was not removed"
            );
        }
    }

    /// Presigned flow: nothing is staged, the caller uploads straight to storage.
    pub async fn presign(&self, key: &str) -> CatalogResult<PresignedUpload> {
        let url = self.store.presign_put(key, self.presign_expiry).await.map_err(|e| {
            tracing::error!(stage = "upload.presign", key, error = %e, "presign failed");
            e
        })?;
        Ok(PresignedUpload {
            key: key.to_string(),
            url,
            expires_in_secs: self.presign_expiry.as_secs(),
        })
    }

    /// Compensation for an upload whose database write did not go through.
    pub async fn discard(&self, key: &str) -> CatalogResult<()> {
        self.store.delete(key).await.map_err(|e| {
            tracing::error!(stage = "upload.discard", key, error = %e, "remote object left orphaned");
            e
        })
    }
}

fn local_name(original_name: &str) -> String {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()));

    match extension {
        Some(ext) => format!("{}.{}", Uuid::new_v4().simple(), ext.to_ascii_lowercase()),
        None => Uuid::new_v4().simple().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::gate::{require, Identity};
    use crate::testing::MemoryObjectStore;
    use chrono::TimeZone;

    fn coordinator(store: Arc<MemoryObjectStore>, dir: &Path) -> UploadCoordinator {
        UploadCoordinator::new(store, "https://cdn.example.com/", dir, Duration::from_secs(2 * 3600))
    }

    fn author() -> AuthenticatedUser {
        require(&Identity::new(7)).unwrap()
    }

    #[test]
    fn object_key_is_author_and_nanos() {
        let at = Utc.timestamp_opt(1_700_000_000, 123).unwrap();
        assert_eq!(FileUploadRequest::object_key(7, at), "7-1700000000000000123");
    }

    #[test]
    fn local_name_keeps_only_safe_extension() {
        assert!(local_name("photo.JPG").ends_with(".jpg"));
        assert!(!local_name("../../etc/passwd").contains('/'));
        assert!(!local_name("weird.ex/t").contains('/'));
    }

    #[tokio::test]
    async fn direct_upload_removes_staged_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryObjectStore::default());
        let uploads = coordinator(store.clone(), dir.path());

        let staged = uploads.stage(&author(), "cat.jpg", b"jpeg bytes").await.unwrap();
        assert!(staged.path.exists());
        assert!(staged.name.starts_with("7-"));

        let url = uploads.upload(&staged).await.unwrap();
        assert_eq!(url, format!("https://cdn.example.com/{}", staged.name));
        assert!(!staged.path.exists());
        assert_eq!(store.object(&staged.name).as_deref(), Some(&b"jpeg bytes"[..]));
        assert_eq!(store.content_type(&staged.name).as_deref(), Some(IMAGE_CONTENT_TYPE));
    }

    #[tokio::test]
    async fn failed_put_keeps_staged_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryObjectStore::failing());
        let uploads = coordinator(store, dir.path());

        let staged = uploads.stage(&author(), "cat.jpg", b"jpeg bytes").await.unwrap();
        let err = uploads.upload(&staged).await.unwrap_err();
        assert!(matches!(err, CatalogError::Upload(_)));
        assert!(staged.path.exists());
    }

    #[tokio::test]
    async fn presign_does_not_stage() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryObjectStore::default());
        let uploads = coordinator(store, &dir.path().join("never"));

        let presigned = uploads.presign("7-1").await.unwrap();
        assert_eq!(presigned.key, "7-1");
        assert_eq!(presigned.expires_in_secs, 7200);
        assert!(presigned.url.contains("7-1"));
        assert!(!dir.path().join("never").exists());
    }

    #[tokio::test]
    async fn release_drops_staged_file_without_uploading() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryObjectStore::default());
        let uploads = coordinator(store.clone(), dir.path());

        let staged = uploads.stage(&author(), "cat.jpg", b"jpeg bytes").await.unwrap();
        uploads.release(&staged).await;
        assert!(!staged.path.exists());
        assert!(store.object(&staged.name).is_none());

        // a second release only logs
        uploads.release(&staged).await;
    }

    #[tokio::test]
    async fn discard_removes_remote_object() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryObjectStore::default());
        let uploads = coordinator(store.clone(), dir.path());

        let staged = uploads.stage(&author(), "a.png", b"x").await.unwrap();
        uploads.upload(&staged).await.unwrap();
        uploads.discard(&staged.name).await.unwrap();
        assert!(store.object(&staged.name).is_none());
    }
}
