//! SQLite storage layer.
//!
//! Local backend for the knowledge base and conversation log, with WAL mode
//! and split read/write connection pools.

pub mod conversation;
pub mod knowledge;
pub mod pool;

use chrono::{DateTime, NaiveDate, Utc};

use folio_types::error::RepositoryError;

// ---------------------------------------------------------------------------
// Column helpers shared by the repositories
// ---------------------------------------------------------------------------

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, RepositoryError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| RepositoryError::Decode(format!("invalid date '{s}': {e}")))
}

pub(crate) fn parse_optional_date(s: Option<&str>) -> Result<Option<NaiveDate>, RepositoryError> {
    s.filter(|s| !s.is_empty()).map(parse_date).transpose()
}

pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Decode(format!("invalid datetime: {e}")))
}

pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Decode a JSON text array column.
pub(crate) fn parse_string_list(column: &str, s: &str) -> Result<Vec<String>, RepositoryError> {
    serde_json::from_str(s)
        .map_err(|e| RepositoryError::Decode(format!("invalid {column} array: {e}")))
}
