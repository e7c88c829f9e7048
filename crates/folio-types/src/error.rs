use thiserror::Error;

use crate::knowledge::Collection;
use crate::llm::LlmError;

/// Errors from repository operations (used by trait definitions in folio-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("row decode error: {0}")]
    Decode(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors from loading the knowledge base.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    /// One of the four collection fetches failed; the whole load is void.
    #[error("knowledge store unavailable ({collection}): {reason}")]
    StoreUnavailable {
        collection: Collection,
        reason: RepositoryError,
    },
}

impl KnowledgeError {
    /// The collection whose fetch failed.
    pub fn collection(&self) -> Collection {
        match self {
            KnowledgeError::StoreUnavailable { collection, .. } => *collection,
        }
    }
}

/// Errors related to chat operations.
///
/// Only `EmptyMessage` and `MessageTooLong` ever reach the HTTP caller;
/// the other variants are recovered internally and only logged.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("message exceeds {max} characters")]
    MessageTooLong { max: usize },

    #[error("generation failed: {0}")]
    GenerationFailed(#[from] LlmError),

    #[error("conversation log write failed: {0}")]
    LogWriteFailed(#[source] RepositoryError),
}
