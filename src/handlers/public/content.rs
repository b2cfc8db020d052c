// handlers/public/content.rs - published content for the front end

use std::collections::HashMap;

use axum::extract::{Path, Query, State};

use crate::catalog::{ContentResponse, ListingMode, QuerySpec};
use crate::middleware::{ApiResponse, ApiResult};
use crate::server::AppState;

use super::super::parse_content_id;

/// GET /api/fe/contents - published content only
///
/// Query: `page`, `limit` (default 6), `orderBy`, `orderType`, `search`,
/// `categoryID`. Any `status` parameter is ignored.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Vec<ContentResponse>> {
    let wanted = QuerySpec::normalize(&params, ListingMode::Public, &state.listing_defaults)?;
    let listing = state.contents.list(&wanted).await?;
    let pagination = listing.pagination();
    let items = listing.items.into_iter().map(ContentResponse::from).collect();
    Ok(ApiResponse::paginated(items, pagination))
}

/// GET /api/fe/contents/:contentID
pub async fn get(State(state): State<AppState>, Path(content_id): Path<String>) -> ApiResult<ContentResponse> {
    let id = parse_content_id(&content_id)?;
    let content = state.contents.get_by_id(id).await?;
    Ok(ApiResponse::success(content.into()))
}
