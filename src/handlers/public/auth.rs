// handlers/public/auth.rs - POST /api/login

use axum::{body::Bytes, extract::State};

use crate::middleware::{ApiResponse, ApiResult};
use crate::server::AppState;
use crate::services::{LoginRequest, LoginResponse};

use super::super::parse_json;

/// POST /api/login - exchange email and password for a signed token
///
/// ```json
/// { "email": "admin@mail.com", "password": "admin123" }
/// ```
pub async fn login_post(State(state): State<AppState>, body: Bytes) -> ApiResult<LoginResponse> {
    let request: LoginRequest = parse_json(&body)?;
    let response = state.users.login(request).await?;
    Ok(ApiResponse::success(response))
}
