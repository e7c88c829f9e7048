//! Application state wiring all services together.
//!
//! `ChatbotService` is generic over its repositories; AppState pins it to the
//! backend-selecting stores from folio-infra.

use std::sync::Arc;

use anyhow::Context;
use secrecy::ExposeSecret;

use folio_core::chat::generator::{ResponseGenerator, fallback_reply_for};
use folio_core::chat::service::ChatbotService;
use folio_core::knowledge::cache::SnapshotCache;
use folio_core::knowledge::loader::KnowledgeLoader;
use folio_core::llm::box_provider::BoxLlmProvider;
use folio_infra::config::Secrets;
use folio_infra::llm::create_provider;
use folio_infra::store::{ConversationStore, KnowledgeStore, open_stores};
use folio_types::config::FolioConfig;

use crate::http::extractors::auth::hash_token;

pub type ConcreteChatbotService = ChatbotService<KnowledgeStore, ConversationStore>;

pub type ConcreteSnapshotCache = SnapshotCache<KnowledgeStore>;

/// Shared application state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub chatbot: Arc<ConcreteChatbotService>,
    /// SHA-256 hex of `FOLIO_ADMIN_TOKEN`; `None` leaves operator routes open.
    pub admin_token_hash: Option<Arc<str>>,
}

impl AppState {
    pub fn new(chatbot: Arc<ConcreteChatbotService>, admin_token: Option<&str>) -> Self {
        Self {
            chatbot,
            admin_token_hash: admin_token.map(|t| Arc::from(hash_token(t))),
        }
    }

    /// Build the provider, open the stores, and warm the knowledge cache.
    ///
    /// The first cache load never fails: an unreachable store yields the
    /// degraded snapshot and the server still starts.
    pub async fn init(config: &FolioConfig, secrets: &Secrets) -> anyhow::Result<Self> {
        let provider = create_provider(&config.llm, secrets.openai_api_key.as_ref())
            .context("OPENAI_API_KEY must be set to serve chat requests")?;
        warn_on_token_limits(&provider, config);
        let generator = response_generator(provider, config);

        let (knowledge, conversations) = open_stores(&config.store, secrets)
            .await
            .context("failed to open data store")?;
        let cache = Arc::new(snapshot_cache(knowledge, config));
        let snapshot = cache.load().await;
        tracing::info!(
            origin = %snapshot.origin,
            skills = snapshot.counts().skills,
            projects = snapshot.counts().projects,
            "Knowledge cache warmed"
        );

        let chatbot = ChatbotService::new(cache, generator, Arc::new(conversations), &config.chat);

        if secrets.admin_token.is_none() {
            tracing::warn!(
                "FOLIO_ADMIN_TOKEN is not set; cache refresh and status are unauthenticated"
            );
        }

        Ok(Self::new(
            Arc::new(chatbot),
            secrets.admin_token.as_ref().map(|t| t.expose_secret()),
        ))
    }
}

/// An unloaded snapshot cache over `knowledge`.
pub fn snapshot_cache(knowledge: KnowledgeStore, config: &FolioConfig) -> ConcreteSnapshotCache {
    SnapshotCache::new(KnowledgeLoader::new(knowledge, config.personal.clone()))
}

/// The generator whose fallback reply names the configured owner.
pub fn response_generator(provider: BoxLlmProvider, config: &FolioConfig) -> ResponseGenerator {
    ResponseGenerator::new(provider, &config.llm)
        .with_fallback_reply(fallback_reply_for(first_name(&config.personal.name)))
}

/// "Samuel FOTSO" -> "Samuel".
fn first_name(full_name: &str) -> &str {
    full_name.split_whitespace().next().unwrap_or(full_name)
}

fn warn_on_token_limits(provider: &BoxLlmProvider, config: &FolioConfig) {
    let max_output = provider.capabilities().max_output_tokens;
    if config.llm.max_tokens > max_output {
        tracing::warn!(
            configured = config.llm.max_tokens,
            max_output,
            model = %config.llm.model,
            "llm.max_tokens exceeds the model's output limit"
        );
    }
}

#[cfg(test)]
mod tests {
    use folio_core::llm::provider::LlmProvider;
    use folio_types::chat::ReplyStatus;
    use folio_types::llm::{
        CompletionRequest, CompletionResponse, LlmError, Message, ProviderCapabilities,
    };

    use super::*;

    struct DownProvider {
        capabilities: ProviderCapabilities,
    }

    impl LlmProvider for DownProvider {
        fn name(&self) -> &str {
            "down"
        }

        fn capabilities(&self) -> &ProviderCapabilities {
            &self.capabilities
        }

        async fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            Err(LlmError::Network("unreachable".into()))
        }
    }

    fn down() -> BoxLlmProvider {
        BoxLlmProvider::new(DownProvider {
            capabilities: ProviderCapabilities {
                max_context_tokens: 16_385,
                max_output_tokens: 4_096,
            },
        })
    }

    #[tokio::test]
    async fn fallback_reply_uses_configured_owner() {
        let mut config = FolioConfig::default();
        config.personal.name = "Ada Lovelace".to_string();

        let generation = response_generator(down(), &config)
            .generate(vec![Message::user("Bonjour")])
            .await;

        assert_eq!(generation.status, ReplyStatus::Fallback);
        assert!(generation.reply.contains("contacter Ada directement"));
        assert!(!generation.reply.contains("Samuel"));
    }

    #[tokio::test]
    async fn default_owner_keeps_default_fallback() {
        let generation = response_generator(down(), &FolioConfig::default())
            .generate(vec![Message::user("Bonjour")])
            .await;
        assert_eq!(generation.reply, folio_core::chat::generator::FALLBACK_REPLY);
    }

    #[test]
    fn first_name_of_full_name() {
        assert_eq!(first_name("Samuel FOTSO"), "Samuel");
        assert_eq!(first_name("Ada"), "Ada");
        assert_eq!(first_name(""), "");
    }
}
