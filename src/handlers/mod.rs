// handlers/mod.rs - Two-tier handler layout
//
// Public (no identity required) -> Protected (identity passed to the gate).
// Every route runs behind the identity middleware; protected handlers hand
// the resolved Identity to the catalog, which rejects the anonymous one.

pub mod protected;
pub mod public;

use axum::{extract::State, Json};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::catalog::CatalogError;
use crate::error::ApiError;
use crate::server::AppState;

/// GET /health - database ping
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.health.ping().await.map_err(|e| {
        tracing::warn!(stage = "health", error = %e, "database ping failed");
        ApiError::service_unavailable("database unavailable")
    })?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
            "database": "ok"
        }
    })))
}

/// Parses a request body that was read as raw bytes. Runs after the gate,
/// so unauthenticated callers never get a body error.
pub(crate) fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::from(CatalogError::invalid_parameter("body", e.to_string())))
}

pub(crate) fn parse_content_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::from(CatalogError::invalid_parameter("contentID", "must be an integer")))
}
