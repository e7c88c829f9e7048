//! Query parameter extractors.

use serde::Deserialize;

/// `?lang=` on the suggestions endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct SuggestionsQuery {
    pub lang: Option<String>,
}

/// Turns returned when `?limit=` is absent or not a positive integer.
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// `?limit=` on the history endpoint, kept raw so a bad value falls back
/// to the default instead of rejecting the request.
#[derive(Debug, Deserialize, Default)]
pub struct HistoryQuery {
    pub limit: Option<String>,
}

impl HistoryQuery {
    pub fn limit(&self) -> u32 {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
    }
}
