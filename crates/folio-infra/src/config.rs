//! Configuration loading for folio.
//!
//! `folio.toml` is optional: a missing or malformed file falls back to
//! [`FolioConfig::default()`]. Credentials never live in the file; they come
//! from the environment (optionally seeded from a `.env` file) as
//! [`Secrets`].

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use folio_types::config::FolioConfig;

/// Environment variable naming an alternate config file.
pub const CONFIG_ENV: &str = "FOLIO_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "folio.toml";

const DOTENV_FILE: &str = ".env";

/// Seed the process environment from `./.env` if present.
///
/// Call before [`config_path`] and [`Secrets::from_env`] so both see the
/// file's values. Variables already set in the environment win.
pub fn load_dotenv() {
    load_dotenv_from(Path::new(DOTENV_FILE));
}

/// Like [`load_dotenv`], from an explicit file.
pub fn load_dotenv_from(path: &Path) {
    match dotenvy::from_path(path) {
        Ok(()) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(err) => tracing::debug!("No environment file at {}: {err}", path.display()),
    }
}

/// Resolve the config file path: `--config`, then `FOLIO_CONFIG`, then
/// `./folio.toml`.
pub fn config_path(cli_override: Option<PathBuf>) -> PathBuf {
    cli_override
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Load configuration from `path`.
///
/// - If the file does not exist, returns [`FolioConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_config(path: &Path) -> FolioConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return FolioConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return FolioConfig::default();
        }
    };

    match toml::from_str::<FolioConfig>(&content) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", path.display());
            config
        }
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            FolioConfig::default()
        }
    }
}

/// Credentials read from the environment.
///
/// Each value is wrapped in [`SecretString`]; Debug output is redacted.
#[derive(Debug, Default)]
pub struct Secrets {
    /// `OPENAI_API_KEY`
    pub openai_api_key: Option<SecretString>,
    /// `SUPABASE_URL` (not secret, but deployment-specific)
    pub supabase_url: Option<String>,
    /// `SUPABASE_SERVICE_ROLE_KEY`
    pub supabase_service_key: Option<SecretString>,
    /// `FOLIO_ADMIN_TOKEN`; when unset the operator endpoints are open.
    pub admin_token: Option<SecretString>,
}

impl Secrets {
    /// Read secrets from the process environment. Run [`load_dotenv`] first
    /// to pick up a `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            openai_api_key: get("OPENAI_API_KEY").map(SecretString::from),
            supabase_url: get("SUPABASE_URL"),
            supabase_service_key: get("SUPABASE_SERVICE_ROLE_KEY").map(SecretString::from),
            admin_token: get("FOLIO_ADMIN_TOKEN").map(SecretString::from),
        }
    }
}
