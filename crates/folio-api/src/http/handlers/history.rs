//! Session history.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use serde::Serialize;

use folio_types::llm::Message;

use crate::http::error::AppError;
use crate::http::extractors::query::HistoryQuery;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionHistory {
    pub session_id: String,
    /// Oldest first, alternating user and assistant.
    pub history: Vec<Message>,
}

/// GET /api/chatbot/history/{session_id}?limit=N - Last N turns (default 10, max 50).
///
/// A limit that is not a positive integer falls back to 10.
pub async fn history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<ApiResponse<SessionHistory>, AppError> {
    let timer = RequestTimer::start();
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;

    let history = state.chatbot.history(&session_id, query.limit()).await?;

    Ok(timer.success(SessionHistory {
        session_id,
        history,
    }))
}
