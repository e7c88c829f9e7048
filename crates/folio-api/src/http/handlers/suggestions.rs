//! Conversation starters.

use axum::extract::{Query, State};
use serde::Serialize;

use folio_types::chat::Language;

use crate::http::extractors::query::SuggestionsQuery;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SuggestionList {
    pub language: &'static str,
    pub suggestions: &'static [&'static str],
}

/// GET /api/chatbot/suggestions?lang=fr|en|de - Unknown codes get French.
pub async fn suggestions(
    State(state): State<AppState>,
    Query(query): Query<SuggestionsQuery>,
) -> ApiResponse<SuggestionList> {
    let language = Language::from_code(query.lang.as_deref());
    RequestTimer::start().success(SuggestionList {
        language: language.code(),
        suggestions: state.chatbot.suggestions(language),
    })
}
