//! ConversationRepository trait definition.
//!
//! Append-only conversation log. Follows the same RPITIT pattern as
//! `KnowledgeRepository`.

use folio_types::chat::ConversationTurn;
use folio_types::error::RepositoryError;

/// Repository trait for the conversation log.
///
/// Implementations live in folio-infra (`SupabaseConversationRepository`,
/// `SqliteConversationRepository`). Turns are never updated or deleted.
pub trait ConversationRepository: Send + Sync {
    /// Append one turn.
    fn save_turn(
        &self,
        turn: &ConversationTurn,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// The most recent `limit` turns of a session, newest first.
    fn recent_turns(
        &self,
        session_id: &str,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<ConversationTurn>, RepositoryError>> + Send;
}
