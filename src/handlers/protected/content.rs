// handlers/protected/content.rs - content CRUD for authenticated callers

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    Extension,
};
use serde_json::{json, Value};

use crate::catalog::{gate, ContentRequest, ContentResponse, Identity, ListingMode, QuerySpec};
use crate::middleware::{ApiResponse, ApiResult};
use crate::server::AppState;

use super::super::{parse_content_id, parse_json};

/// GET /api/admin/contents - every status, optional `status` filter
pub async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Vec<ContentResponse>> {
    gate::require(&identity)?;
    let wanted = QuerySpec::normalize(&params, ListingMode::Admin, &state.listing_defaults)?;
    let listing = state.contents.list(&wanted).await?;
    let pagination = listing.pagination();
    let items = listing.items.into_iter().map(ContentResponse::from).collect();
    Ok(ApiResponse::paginated(items, pagination))
}

/// GET /api/admin/contents/:contentID
pub async fn get(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(content_id): Path<String>,
) -> ApiResult<ContentResponse> {
    gate::require(&identity)?;
    let id = parse_content_id(&content_id)?;
    let content = state.contents.get_by_id(id).await?;
    Ok(ApiResponse::success(content.into()))
}

/// POST /api/admin/contents - 201 with the new id
pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    body: Bytes,
) -> ApiResult<Value> {
    gate::require(&identity)?;
    let request: ContentRequest = parse_json(&body)?;
    let id = state.mutations.create(identity, request).await?;
    Ok(ApiResponse::created(json!({ "id": id })))
}

/// PUT /api/admin/contents/:contentID
pub async fn update(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(content_id): Path<String>,
    body: Bytes,
) -> ApiResult<Value> {
    gate::require(&identity)?;
    let id = parse_content_id(&content_id)?;
    let request: ContentRequest = parse_json(&body)?;
    state.mutations.edit(identity, id, request).await?;
    Ok(ApiResponse::success(json!({ "id": id })))
}

/// DELETE /api/admin/contents/:contentID
pub async fn delete(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(content_id): Path<String>,
) -> ApiResult<Value> {
    gate::require(&identity)?;
    let id = parse_content_id(&content_id)?;
    state.mutations.delete(identity, id).await?;
    Ok(ApiResponse::success(json!({ "id": id })))
}
