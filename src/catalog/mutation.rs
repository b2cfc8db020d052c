use std::sync::Arc;

use super::error::{CatalogError, CatalogResult};
use super::gate::{self, Identity};
use super::model::{ContentDraft, ContentRequest};
use super::store::ContentStore;
use super::upload::{FileUploadRequest, UploadCoordinator};
use super::validation;

/// Write side of the catalog.
///
/// Every operation passes the identity through the gate before anything
/// else. Ownership is not checked: any authenticated caller may edit or
/// delete any content.
#[derive(Clone)]
pub struct ContentMutationService {
    store: Arc<dyn ContentStore>,
}

impl ContentMutationService {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Returns the id of the new row.
    pub async fn create(&self, identity: Identity, request: ContentRequest) -> CatalogResult<i64> {
        let author = gate::require(&identity)?;
        validation::validate(&request)?;

        let draft = ContentDraft::from(request);
        let id = self
            .store
            .insert(&draft, author.user_id())
            .await
            .map_err(|e| {
                tracing::error!(stage = "mutation.create", error = %e, "insert failed");
                e
            })?;

        tracing::info!(content_id = id, author_id = author.user_id(), "content created");
        Ok(id)
    }

    /// Overwrites the row's fields. An absent `image` keeps the stored one;
    /// the original author and creation time are never changed.
    pub async fn edit(&self, identity: Identity, id: i64, request: ContentRequest) -> CatalogResult<()> {
        let editor = gate::require(&identity)?;
        validation::validate(&request)?;

        let draft = ContentDraft::from(request);
        let touched = self.store.update(id, &draft).await.map_err(|e| {
            tracing::error!(stage = "mutation.edit", id, error = %e, "update failed");
            e
        })?;

        if touched == 0 {
            return Err(CatalogError::NotFound(format!("content {} not found", id)));
        }

        tracing::info!(content_id = id, editor_id = editor.user_id(), "content updated");
        Ok(())
    }

    /// Deleting an id that does not exist is not an error.
    pub async fn delete(&self, identity: Identity, id: i64) -> CatalogResult<()> {
        let caller = gate::require(&identity)?;
        self.store.delete(id).await.map_err(|e| {
            tracing::error!(stage = "mutation.delete", id, error = %e, "delete failed");
            e
        })?;

        tracing::info!(content_id = id, caller_id = caller.user_id(), "content deleted");
        Ok(())
    }

    /// Uploads a staged image and points the content row at it.
    ///
    /// If the row does not exist the staged file is released without
    /// uploading. If the row cannot be updated after the upload succeeded,
    /// the remote object is deleted again.
    pub async fn attach_image(
        &self,
        identity: Identity,
        id: i64,
        staged: &FileUploadRequest,
        uploads: &UploadCoordinator,
    ) -> CatalogResult<String> {
        gate::require(&identity)?;

        let missing = match self.store.find_by_id(id).await {
            Ok(Some(_)) => None,
            Ok(None) => Some(CatalogError::NotFound(format!("content {} not found", id))),
            Err(e) => {
                tracing::error!(stage = "mutation.attach_image", id, error = %e, "lookup failed");
                Some(e)
            }
        };
        if let Some(e) = missing {
            uploads.release(staged).await;
            return Err(e);
        }

        let url = uploads.upload(staged).await?;

        let written = match self.store.update_image(id, &url).await {
            Ok(0) => Err(CatalogError::NotFound(format!("content {} not found", id))),
            Ok(_) => Ok(()),
            Err(e) => Err(e),
        };

        if let Err(e) = written {
            tracing::error!(stage = "mutation.attach_image", id, key = %staged.name, error = %e, "rolling back upload");
            if let Err(discard_err) = uploads.discard(&staged.name).await {
                tracing::error!(stage = "mutation.attach_image", key = %staged.name, error = %discard_err, "rollback failed");
            }
            return Err(e);
        }

        Ok(url)
    }
}
