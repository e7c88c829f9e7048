//! Configuration and defaults for OpenAI-compatible providers.

use std::time::Duration;

use secrecy::SecretString;

use folio_types::llm::ProviderCapabilities;

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    pub api_key: SecretString,
    /// Default model when a request leaves it empty.
    pub model: String,
    pub capabilities: ProviderCapabilities,
    /// Upper bound on one completion call.
    pub timeout: Duration,
}

impl OpenAiCompatConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// OpenAI default configuration.
///
/// Base URL: `https://api.openai.com/v1`. Capabilities follow the model
/// family; unknown models get the conservative `gpt-3.5-turbo` limits.
pub fn openai_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: "https://api.openai.com/v1".into(),
        api_key,
        model: model.into(),
        capabilities: capabilities_for_model(model),
        timeout: Duration::from_secs(30),
    }
}

fn capabilities_for_model(model: &str) -> ProviderCapabilities {
    if model.starts_with("gpt-4o") || model.starts_with("gpt-4.1") {
        ProviderCapabilities {
            max_context_tokens: 128_000,
            max_output_tokens: 16_384,
        }
    } else {
        ProviderCapabilities {
            max_context_tokens: 16_385,
            max_output_tokens: 4_096,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_openai_defaults() {
        let config = openai_defaults(SecretString::from("sk-test".to_string()), "gpt-3.5-turbo");
        assert_eq!(config.provider_name, "openai");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.api_key.expose_secret(), "sk-test");
        assert_eq!(config.capabilities.max_output_tokens, 4_096);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_gpt4o_capabilities() {
        let config = openai_defaults(SecretString::from("k".to_string()), "gpt-4o-mini");
        assert_eq!(config.capabilities.max_context_tokens, 128_000);
    }

    #[test]
    fn test_with_timeout() {
        let config = openai_defaults(SecretString::from("k".to_string()), "gpt-3.5-turbo")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
