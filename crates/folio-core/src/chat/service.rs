//! Chatbot service orchestrating the full request path.
//!
//! ChatbotService coordinates the SnapshotCache, PromptComposer,
//! ResponseGenerator and ConversationLogger. It also fronts the operator
//! actions (cache refresh and status) and the session history lookup.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use folio_types::chat::{ChatReply, ChatRequest, ConversationTurn, Language};
use folio_types::config::ChatConfig;
use folio_types::error::{ChatError, KnowledgeError, RepositoryError};
use folio_types::llm::Message;

use crate::knowledge::cache::{CacheStatus, RefreshOutcome, SnapshotCache};
use crate::knowledge::repository::KnowledgeRepository;
use crate::prompt::composer::PromptComposer;
use crate::prompt::suggestions;

use super::generator::ResponseGenerator;
use super::logger::ConversationLogger;
use super::repository::ConversationRepository;

/// Upper bound on turns returned by [`ChatbotService::history`].
pub const MAX_HISTORY_TURNS: u32 = 50;

/// Generic over `KnowledgeRepository` and `ConversationRepository` to keep
/// folio-core independent of folio-infra.
pub struct ChatbotService<K: KnowledgeRepository, C: ConversationRepository + 'static> {
    cache: Arc<SnapshotCache<K>>,
    composer: PromptComposer,
    generator: ResponseGenerator,
    logger: ConversationLogger<C>,
    conversations: Arc<C>,
    max_message_chars: usize,
}

impl<K: KnowledgeRepository, C: ConversationRepository + 'static> ChatbotService<K, C> {
    pub fn new(
        cache: Arc<SnapshotCache<K>>,
        generator: ResponseGenerator,
        conversations: Arc<C>,
        config: &ChatConfig,
    ) -> Self {
        Self {
            cache,
            composer: PromptComposer::from_config(config),
            generator,
            logger: ConversationLogger::new(Arc::clone(&conversations)),
            conversations,
            max_message_chars: config.max_message_chars,
        }
    }

    /// Answer one chat message.
    ///
    /// Only invalid input is an error. Generation failures come back as a
    /// fallback reply with `status: fallback`. The turn is logged on a
    /// detached task after the reply is built.
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatReply, ChatError> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if message.chars().count() > self.max_message_chars {
            return Err(ChatError::MessageTooLong {
                max: self.max_message_chars,
            });
        }
        let session_id = request.session().to_string();

        // The snapshot handle is dropped before the completion call.
        let (messages, snapshot_origin) = {
            let snapshot = self.cache.get();
            let messages =
                self.composer
                    .compose(&snapshot, message, &request.conversation_history);
            (messages, snapshot.origin)
        };
        debug!(
            session_id = %session_id,
            messages = messages.len(),
            origin = %snapshot_origin,
            "Prompt composed"
        );

        let generation = self.generator.generate(messages).await;

        let reply = ChatReply {
            reply: generation.reply,
            latency_ms: generation.latency_ms,
            status: generation.status,
            usage: generation.usage,
        };

        let mut context = serde_json::json!({
            "status": reply.status,
            "model": generation.model,
            "snapshot_origin": snapshot_origin,
        });
        if let Some(usage) = reply.usage {
            context["usage"] = serde_json::json!(usage);
        }
        if let Some(failure) = generation.failure {
            context["error"] = serde_json::Value::String(failure);
        }

        self.logger.dispatch(ConversationTurn {
            session_id,
            user_message: message.to_string(),
            bot_response: reply.reply.clone(),
            response_time_ms: reply.latency_ms,
            context,
            created_at: Utc::now(),
        });

        Ok(reply)
    }

    /// Static conversation starters. No I/O.
    pub fn suggestions(&self, language: Language) -> &'static [&'static str] {
        suggestions::suggestions(language)
    }

    /// Operator-triggered reload of the knowledge base.
    pub async fn refresh_cache(&self) -> Result<RefreshOutcome, KnowledgeError> {
        info!("Knowledge refresh requested");
        self.cache.refresh().await
    }

    pub fn cache_status(&self) -> CacheStatus {
        self.cache.status()
    }

    /// The last `limit` turns of a session, oldest first, flattened into
    /// user/assistant messages. `limit` is clamped to 1..=50.
    pub async fn history(
        &self,
        session_id: &str,
        limit: u32,
    ) -> Result<Vec<Message>, RepositoryError> {
        let limit = limit.clamp(1, MAX_HISTORY_TURNS);
        let mut turns = self.conversations.recent_turns(session_id, limit).await?;
        turns.reverse();
        Ok(turns.into_iter().flat_map(ConversationTurn::into_messages).collect())
    }
}
