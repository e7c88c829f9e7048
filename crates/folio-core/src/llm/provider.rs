//! LlmProvider trait definition.
//!
//! This is the core abstraction that every completion backend implements.
//! Uses RPITIT for `complete`; see `BoxLlmProvider` for dynamic dispatch.

use folio_types::llm::{CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities};

/// Trait for LLM provider backends (OpenAI and OpenAI-compatible endpoints).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
///
/// Implementations live in folio-infra (e.g., `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Context and output limits of the backend.
    fn capabilities(&self) -> &ProviderCapabilities;

    /// Send a completion request and receive the full response.
    ///
    /// A single attempt: implementations must not retry.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
