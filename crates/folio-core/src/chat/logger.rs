//! Fire-and-forget conversation logging.

use std::sync::Arc;

use tracing::{debug, warn};

use folio_types::chat::ConversationTurn;
use folio_types::error::ChatError;

use super::repository::ConversationRepository;

/// Persists turns on detached tasks.
///
/// `dispatch` returns immediately and keeps no handle: a failed write is
/// logged and dropped, with no retry and no queue.
pub struct ConversationLogger<C: ConversationRepository + 'static> {
    repo: Arc<C>,
}

impl<C: ConversationRepository + 'static> ConversationLogger<C> {
    pub fn new(repo: Arc<C>) -> Self {
        Self { repo }
    }

    /// Spawn the write. Must be called from within a tokio runtime.
    pub fn dispatch(&self, turn: ConversationTurn) {
        let repo = Arc::clone(&self.repo);
        tokio::spawn(async move {
            match repo.save_turn(&turn).await {
                Ok(()) => {
                    debug!(session_id = %turn.session_id, "Conversation turn saved");
                }
                Err(e) => {
                    let err = ChatError::LogWriteFailed(e);
                    warn!(
                        session_id = %turn.session_id,
                        error = %err,
                        "Dropping conversation turn"
                    );
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;

    use super::*;
    use crate::test_support::MockConversationRepository;

    fn turn(session: &str) -> ConversationTurn {
        ConversationTurn {
            session_id: session.to_string(),
            user_message: "Bonjour".to_string(),
            bot_response: "Bonjour !".to_string(),
            response_time_ms: 12,
            context: serde_json::json!({"status": "generated"}),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn dispatch_persists_in_background() {
        let repo = Arc::new(MockConversationRepository::default());
        let logger = ConversationLogger::new(Arc::clone(&repo));

        logger.dispatch(turn("s-1"));
        tokio::time::sleep(Duration::from_millis(20)).await;

        let turns = repo.turns();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].session_id, "s-1");
    }

    #[tokio::test]
    async fn failed_write_is_swallowed() {
        let repo = Arc::new(MockConversationRepository::failing());
        let logger = ConversationLogger::new(Arc::clone(&repo));

        logger.dispatch(turn("s-2"));
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(repo.turns().is_empty());
    }
}
