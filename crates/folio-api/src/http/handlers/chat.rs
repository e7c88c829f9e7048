//! Chat handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use folio_types::chat::{ChatReply, ChatRequest};

use crate::http::error::AppError;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// POST /api/chatbot/chat - Answer one visitor message.
///
/// Generation failures still answer 200 with `status: "fallback"`; only an
/// empty, oversized or malformed request is rejected.
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<ApiResponse<ChatReply>, AppError> {
    let timer = RequestTimer::start();
    let Json(request) = body.map_err(|e| AppError::Validation(e.body_text()))?;

    let reply = state.chatbot.chat(request).await?;

    Ok(timer
        .success(reply)
        .with_link("suggestions", "/api/chatbot/suggestions"))
}
