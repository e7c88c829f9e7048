//! Configuration types for folio.
//!
//! `FolioConfig` represents `folio.toml`. Every field has a default, so an
//! empty or missing file yields a working local configuration. Secrets
//! (API keys, store credentials, the admin token) never live here; they
//! are read from the environment by the infra layer.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::knowledge::PersonalInfo;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    /// Static personal-info block included in every prompt.
    #[serde(default)]
    pub personal: PersonalInfo,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins. Empty means any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
        }
    }
}

/// Which data store backs the knowledge base and conversation log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Supabase PostgREST endpoint (`SUPABASE_URL` + service role key).
    #[default]
    Supabase,
    /// Local SQLite database file.
    Sqlite,
}

/// Data store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// SQLite database path. Relative paths resolve against the working directory.
    #[serde(default = "default_sqlite_path")]
    pub sqlite_path: PathBuf,
    /// Per-request timeout for the Supabase backend.
    #[serde(default = "default_store_timeout")]
    pub request_timeout_secs: u64,
}

fn default_sqlite_path() -> PathBuf {
    PathBuf::from("folio.db")
}

fn default_store_timeout() -> u64 {
    10
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            sqlite_path: default_sqlite_path(),
            request_timeout_secs: default_store_timeout(),
        }
    }
}

/// Completion API settings. Not user-controllable at request time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_model")]
    pub model: String,
    /// Override for OpenAI-compatible endpoints. `None` uses the OpenAI API.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Upper bound on one completion call.
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f64 {
    0.3
}

fn default_llm_timeout() -> u64 {
    30
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

/// Prompt shaping and input limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Number of prior turns (user message plus reply) forwarded to the model.
    #[serde(default = "default_history_window")]
    pub history_window: usize,
    /// Entries kept per collection in the condensed knowledge block.
    #[serde(default = "default_condensed_entries")]
    pub condensed_entries: usize,
    /// Maximum user message length, in characters. Longer history entries
    /// are cut to this length before forwarding.
    #[serde(default = "default_max_message_chars")]
    pub max_message_chars: usize,
}

fn default_history_window() -> usize {
    2
}

fn default_condensed_entries() -> usize {
    3
}

fn default_max_message_chars() -> usize {
    2000
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
            condensed_entries: default_condensed_entries(),
            max_message_chars: default_max_message_chars(),
        }
    }
}
