//! Operator endpoints for the knowledge cache.

use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;

use folio_core::knowledge::cache::CacheStatus;
use folio_types::knowledge::{SnapshotCounts, SnapshotOrigin};

use crate::http::error::AppError;
use crate::http::extractors::auth::AdminGuard;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSummary {
    pub refreshed_at: DateTime<Utc>,
    pub origin: SnapshotOrigin,
    /// True when this call joined a refresh already in flight.
    pub coalesced: bool,
    pub counts: SnapshotCounts,
}

/// POST /api/chatbot/refresh-cache - Reload the knowledge base.
///
/// A store failure answers 503 and leaves the previous snapshot in place.
pub async fn refresh_cache(
    State(state): State<AppState>,
    _guard: AdminGuard,
) -> Result<ApiResponse<RefreshSummary>, AppError> {
    let timer = RequestTimer::start();

    let outcome = state.chatbot.refresh_cache().await?;
    let snapshot = &outcome.snapshot;

    Ok(timer
        .success(RefreshSummary {
            refreshed_at: snapshot.loaded_at,
            origin: snapshot.origin,
            coalesced: outcome.coalesced,
            counts: snapshot.counts(),
        })
        .with_link("status", "/api/chatbot/cache"))
}

/// GET /api/chatbot/cache - Current snapshot metadata.
pub async fn cache_status(
    State(state): State<AppState>,
    _guard: AdminGuard,
) -> ApiResponse<CacheStatus> {
    RequestTimer::start()
        .success(state.chatbot.cache_status())
        .with_link("refresh", "/api/chatbot/refresh-cache")
}
