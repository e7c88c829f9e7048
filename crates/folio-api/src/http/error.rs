//! Application error type mapping to HTTP status codes and envelope format.

use axum::response::{IntoResponse, Response};

use folio_types::error::{ChatError, KnowledgeError, RepositoryError};

use super::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Chat(ChatError),
    Knowledge(KnowledgeError),
    Repository(RepositoryError),
    Unauthorized(String),
    Validation(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<KnowledgeError> for AppError {
    fn from(e: KnowledgeError) -> Self {
        AppError::Knowledge(e)
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Repository(e)
    }
}

impl AppError {
    fn code_and_message(&self) -> (&'static str, String) {
        match self {
            AppError::Chat(e @ (ChatError::EmptyMessage | ChatError::MessageTooLong { .. })) => {
                ("VALIDATION_ERROR", e.to_string())
            }
            // Generation and log failures are recovered inside the service.
            AppError::Chat(e) => ("INTERNAL_ERROR", e.to_string()),
            AppError::Knowledge(e) => ("STORE_UNAVAILABLE", e.to_string()),
            AppError::Repository(e) => ("STORE_UNAVAILABLE", e.to_string()),
            AppError::Unauthorized(msg) => ("UNAUTHORIZED", msg.clone()),
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = self.code_and_message();
        if code == "STORE_UNAVAILABLE" {
            tracing::warn!(error = %message, "Request failed on data store");
        }
        ApiResponse::error(code, &message, String::new(), 0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use folio_types::knowledge::Collection;

    use super::*;

    #[test]
    fn test_validation_errors_are_400() {
        let resp = AppError::from(ChatError::EmptyMessage).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = AppError::from(ChatError::MessageTooLong { max: 2000 }).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_store_failure_is_503() {
        let err = KnowledgeError::StoreUnavailable {
            collection: Collection::Projects,
            reason: RepositoryError::Connection("timeout".into()),
        };
        let resp = AppError::from(err).into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_unauthorized_is_401() {
        let resp = AppError::Unauthorized("missing token".into()).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
