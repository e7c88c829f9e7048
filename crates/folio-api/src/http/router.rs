//! Axum router configuration with middleware.
//!
//! Routes live under `/api/`. Middleware: CORS (origins from config) and
//! request tracing.

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    let chatbot_routes = Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/suggestions", get(handlers::suggestions::suggestions))
        .route("/refresh-cache", post(handlers::cache::refresh_cache))
        .route("/cache", get(handlers::cache::cache_status))
        .route("/history/{session_id}", get(handlers::history::history));

    Router::new()
        .route("/api/health", get(handlers::health::health))
        .nest("/api/chatbot", chatbot_routes)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Empty list allows any origin. Unparseable entries are skipped.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.is_empty() {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(origins))
}
