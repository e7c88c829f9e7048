//! LLM provider implementations.
//!
//! Contains the concrete implementation of the [`LlmProvider`] trait
//! defined in `folio-core` for OpenAI and OpenAI-compatible endpoints,
//! plus a factory ([`create_provider`]) that builds it from [`LlmConfig`].
//!
//! [`LlmProvider`]: folio_core::llm::provider::LlmProvider

pub mod openai_compat;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use folio_core::llm::box_provider::BoxLlmProvider;
use folio_types::config::LlmConfig;
use folio_types::llm::LlmError;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::{OpenAiCompatConfig, openai_defaults};

/// Create a [`BoxLlmProvider`] from configuration and the API key.
///
/// `base_url` in the config switches to a generic OpenAI-compatible endpoint.
///
/// # Errors
///
/// Returns [`LlmError::AuthenticationFailed`] when no API key is available.
pub fn create_provider(
    config: &LlmConfig,
    api_key: Option<&SecretString>,
) -> Result<BoxLlmProvider, LlmError> {
    let key = api_key
        .map(|k| SecretString::from(k.expose_secret().to_owned()))
        .ok_or(LlmError::AuthenticationFailed)?;
    let timeout = Duration::from_secs(config.timeout_secs);

    let provider_config = match config.base_url.as_deref() {
        Some(base_url) => OpenAiCompatConfig {
            provider_name: "openai_compatible".to_string(),
            base_url: base_url.to_string(),
            ..openai_defaults(key, &config.model)
        },
        None => openai_defaults(key, &config.model),
    };

    Ok(BoxLlmProvider::new(OpenAiCompatibleProvider::new(
        provider_config.with_timeout(timeout),
    )))
}
