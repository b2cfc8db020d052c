// handlers/protected/user.rs - the caller's own account

use axum::{body::Bytes, extract::State, Extension};
use serde_json::{json, Value};

use crate::catalog::{gate, Identity};
use crate::middleware::{ApiResult, IntoApiResponse};
use crate::server::AppState;
use crate::services::{UpdatePasswordRequest, UserProfile};

use super::super::parse_json;

/// GET /api/admin/users/profile
pub async fn profile(State(state): State<AppState>, Extension(identity): Extension<Identity>) -> ApiResult<UserProfile> {
    let profile = state.users.profile(identity).await?;
    Ok(profile.into_api_response())
}

/// PUT /api/admin/users/update-password
pub async fn update_password(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    body: Bytes,
) -> ApiResult<Value> {
    gate::require(&identity)?;
    let request: UpdatePasswordRequest = parse_json(&body)?;
    state.users.update_password(identity, request).await?;
    Ok(json!({ "message": "password updated" }).into_api_response())
}
