//! Admin token guard for the operator endpoints.
//!
//! Reads the token from:
//! - `Authorization: Bearer <token>` header
//! - `X-API-Key: <token>` header
//!
//! The presented token is SHA-256 hashed and compared against the hash of
//! `FOLIO_ADMIN_TOKEN` held in [`AppState`]. When no admin token is
//! configured the guard lets every request through.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sha2::{Digest, Sha256};

use crate::http::error::AppError;
use crate::state::AppState;

/// Marker for requests allowed to run operator actions.
pub struct AdminGuard;

impl FromRequestParts<AppState> for AdminGuard {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.admin_token_hash.as_deref() else {
            return Ok(AdminGuard);
        };

        let token = extract_token(parts)?;
        if hash_token(&token) == expected {
            Ok(AdminGuard)
        } else {
            tracing::warn!(path = %parts.uri.path(), "Rejected operator request: invalid admin token");
            Err(AppError::Unauthorized("Invalid admin token.".to_string()))
        }
    }
}

/// Extract the token from request headers.
fn extract_token(parts: &Parts) -> Result<String, AppError> {
    if let Some(auth) = parts.headers.get("authorization") {
        let auth_str = auth.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid Authorization header encoding".to_string())
        })?;
        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.trim().to_string());
        }
    }

    if let Some(token) = parts.headers.get("x-api-key") {
        let token_str = token.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid X-API-Key header encoding".to_string())
        })?;
        return Ok(token_str.trim().to_string());
    }

    Err(AppError::Unauthorized(
        "Missing admin token. Provide via 'Authorization: Bearer <token>' or 'X-API-Key: <token>' header.".to_string(),
    ))
}

/// SHA-256 of a token (lowercase hex).
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    format!("{:x}", digest)
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/api/chatbot/refresh-cache");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_hash_token_is_hex_sha256() {
        assert_eq!(
            hash_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_extract_bearer_and_api_key() {
        let p = parts(&[("authorization", "Bearer  secret-1 ")]);
        assert_eq!(extract_token(&p).unwrap(), "secret-1");

        let p = parts(&[("x-api-key", "secret-2")]);
        assert_eq!(extract_token(&p).unwrap(), "secret-2");
    }

    #[test]
    fn test_extract_missing_token() {
        let p = parts(&[("authorization", "Basic dXNlcjpwYXNz")]);
        assert!(matches!(extract_token(&p), Err(AppError::Unauthorized(_))));
    }
}
