//! Response generator: one completion attempt per request.
//!
//! Any provider error, or an empty completion, is replaced by a fixed
//! fallback reply; the caller always gets text back. Output length and
//! temperature come from configuration, never from the request.

use std::time::Instant;

use tracing::{Instrument, Span, error, field, info_span};

use folio_observe::genai_attrs;
use folio_types::chat::ReplyStatus;
use folio_types::config::LlmConfig;
use folio_types::error::ChatError;
use folio_types::llm::{CompletionRequest, CompletionResponse, LlmError, Message, Usage};

use crate::llm::box_provider::BoxLlmProvider;

/// Reply used whenever generation fails.
pub const FALLBACK_REPLY: &str = "Désolé, je rencontre actuellement des difficultés techniques. \
N'hésitez pas à contacter Samuel directement via le formulaire de contact pour toute question. 😊";

/// [`FALLBACK_REPLY`] naming `owner` instead of the default owner.
pub fn fallback_reply_for(owner: &str) -> String {
    format!(
        "Désolé, je rencontre actuellement des difficultés techniques. \
N'hésitez pas à contacter {owner} directement via le formulaire de contact pour toute question. 😊"
    )
}

/// Outcome of one generation attempt.
#[derive(Debug, Clone)]
pub struct Generation {
    pub reply: String,
    pub latency_ms: u64,
    pub status: ReplyStatus,
    pub usage: Option<Usage>,
    pub model: String,
    /// Why the fallback was used, for logs and the turn context.
    pub failure: Option<String>,
}

pub struct ResponseGenerator {
    provider: BoxLlmProvider,
    model: String,
    max_tokens: u32,
    temperature: f64,
    fallback_reply: String,
}

impl ResponseGenerator {
    pub fn new(provider: BoxLlmProvider, config: &LlmConfig) -> Self {
        Self {
            provider,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            fallback_reply: FALLBACK_REPLY.to_string(),
        }
    }

    /// Override the fallback text (e.g. to name a different owner).
    pub fn with_fallback_reply(mut self, reply: impl Into<String>) -> Self {
        self.fallback_reply = reply.into();
        self
    }

    /// Send `messages` to the provider once.
    pub async fn generate(&self, messages: Vec<Message>) -> Generation {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: Some(self.temperature),
        };

        let span = info_span!(
            "gen_ai.chat",
            gen_ai.operation.name = genai_attrs::OP_CHAT,
            gen_ai.provider.name = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
            gen_ai.response.id = field::Empty,
            gen_ai.response.finish_reasons = field::Empty,
            gen_ai.usage.input_tokens = field::Empty,
            gen_ai.usage.output_tokens = field::Empty,
            "error.type" = field::Empty,
        );

        let start = Instant::now();
        let result = self
            .provider
            .complete(&request)
            .instrument(span.clone())
            .await
            .and_then(non_empty);
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(response) => {
                record_response(&span, &response);
                Generation {
                    reply: response.content,
                    latency_ms,
                    status: ReplyStatus::Generated,
                    usage: Some(response.usage),
                    model: response.model,
                    failure: None,
                }
            }
            Err(err) => {
                span.record(genai_attrs::ERROR_TYPE, error_type(&err));
                let err = ChatError::GenerationFailed(err);
                error!(
                    model = %self.model,
                    latency_ms,
                    error = %err,
                    "Completion failed, using fallback reply"
                );
                Generation {
                    reply: self.fallback_reply.clone(),
                    latency_ms,
                    status: ReplyStatus::Fallback,
                    usage: None,
                    model: self.model.clone(),
                    failure: Some(err.to_string()),
                }
            }
        }
    }
}

fn non_empty(response: CompletionResponse) -> Result<CompletionResponse, LlmError> {
    if response.content.trim().is_empty() {
        Err(LlmError::EmptyCompletion)
    } else {
        Ok(response)
    }
}

fn record_response(span: &Span, response: &CompletionResponse) {
    span.record(genai_attrs::GEN_AI_RESPONSE_ID, response.id.as_str());
    span.record(
        genai_attrs::GEN_AI_RESPONSE_FINISH_REASONS,
        response.stop_reason.to_string().as_str(),
    );
    span.record(
        genai_attrs::GEN_AI_USAGE_INPUT_TOKENS,
        response.usage.input_tokens,
    );
    span.record(
        genai_attrs::GEN_AI_USAGE_OUTPUT_TOKENS,
        response.usage.output_tokens,
    );
}

fn error_type(err: &LlmError) -> &'static str {
    match err {
        LlmError::Provider { .. } => "provider",
        LlmError::Deserialization(_) => "deserialization",
        LlmError::RateLimited => "rate_limited",
        LlmError::Overloaded(_) => "overloaded",
        LlmError::AuthenticationFailed => "authentication",
        LlmError::Network(_) => "network",
        LlmError::InvalidRequest(_) => "invalid_request",
        LlmError::EmptyCompletion => "empty_completion",
    }
}
