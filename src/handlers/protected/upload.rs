// handlers/protected/upload.rs - image uploads to object storage

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Path, Request, State},
    Extension,
};
use serde::{Deserialize, Serialize};

use crate::catalog::{gate, CatalogError, FileUploadRequest, Identity, PresignedUpload};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::server::AppState;

use super::super::{parse_content_id, parse_json};

const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize)]
pub struct UploadedImage {
    pub url_image: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PresignRequest {
    /// Object key to sign for. Generated from the caller when absent.
    #[serde(default)]
    pub key: Option<String>,
}

/// Pulls the `image` part out of a multipart body as (file name, bytes).
/// Called only after the gate, so anonymous callers never see body errors.
async fn read_image(state: &AppState, request: Request) -> Result<(String, Bytes), ApiError> {
    let mut multipart = Multipart::from_request(request, state).await?;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            break;
        }
        return Ok((file_name, bytes));
    }
    Err(CatalogError::invalid_parameter(IMAGE_FIELD, "is required").into())
}

/// POST /api/admin/contents/upload-image - 201 with `url_image`
pub async fn upload_image(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    request: Request,
) -> ApiResult<UploadedImage> {
    let author = gate::require(&identity)?;
    let (file_name, bytes) = read_image(&state, request).await?;

    let staged = state.uploads.stage(&author, &file_name, &bytes).await?;
    let url_image = state.uploads.upload(&staged).await?;

    Ok(ApiResponse::created(UploadedImage { url_image }))
}

/// POST /api/admin/contents/presign - signed PUT URL for a direct upload
pub async fn presign(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    body: Bytes,
) -> ApiResult<PresignedUpload> {
    let author = gate::require(&identity)?;
    let request: PresignRequest = if body.is_empty() {
        PresignRequest::default()
    } else {
        parse_json(&body)?
    };

    let key = match request.key.filter(|k| !k.trim().is_empty()) {
        Some(key) => key,
        None => FileUploadRequest::object_key(author.user_id(), chrono::Utc::now()),
    };

    let presigned = state.uploads.presign(&key).await?;
    Ok(ApiResponse::success(presigned))
}

/// POST /api/admin/contents/:contentID/image - upload and attach in one call
pub async fn attach_image(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(content_id): Path<String>,
    request: Request,
) -> ApiResult<UploadedImage> {
    let author = gate::require(&identity)?;
    let id = parse_content_id(&content_id)?;
    let (file_name, bytes) = read_image(&state, request).await?;

    let staged = state.uploads.stage(&author, &file_name, &bytes).await?;
    let url_image = state
        .mutations
        .attach_image(identity, id, &staged, &state.uploads)
        .await?;

    Ok(ApiResponse::success(UploadedImage { url_image }))
}
