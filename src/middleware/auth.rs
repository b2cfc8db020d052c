use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::validate_jwt;
use crate::catalog::Identity;
use crate::server::AppState;

/// Resolves the caller's [`Identity`] from the bearer token and stores it in
/// the request extensions.
///
/// Never rejects a request: a missing or bad token yields
/// [`Identity::ANONYMOUS`], and the handler's gate decides what that means.
pub async fn identity_middleware(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let identity = match extract_jwt_from_headers(request.headers()) {
        Ok(token) => match validate_jwt(&token, &state.jwt_secret) {
            Ok(claims) => claims.identity(),
            Err(e) => {
                tracing::debug!(error = %e, "token rejected, continuing without identity");
                Identity::ANONYMOUS
            }
        },
        Err(msg) => {
            tracing::debug!(reason = msg, "no usable token, continuing without identity");
            Identity::ANONYMOUS
        }
    };

    request.extensions_mut().insert(identity);
    next.run(request).await
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, &'static str> {
    let auth_header = headers.get("authorization").ok_or("Missing Authorization header")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        Some(_) => Err("Empty JWT token"),
        None => Err("Authorization header must use Bearer token format"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_token_is_extracted() {
        assert_eq!(extract_jwt_from_headers(&headers("Bearer abc.def")).unwrap(), "abc.def");
    }

    #[test]
    fn other_schemes_are_ignored() {
        assert!(extract_jwt_from_headers(&headers("Basic abc")).is_err());
        assert!(extract_jwt_from_headers(&headers("Bearer   ")).is_err());
        assert!(extract_jwt_from_headers(&HeaderMap::new()).is_err());
    }
}
