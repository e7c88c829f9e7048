//! Backend selection.
//!
//! `KnowledgeStore` and `ConversationStore` wrap the Supabase and SQLite
//! repositories behind one concrete type each, so the service and HTTP state
//! stay monomorphic whichever backend the config names.

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use folio_core::chat::repository::ConversationRepository;
use folio_core::knowledge::repository::KnowledgeRepository;
use folio_types::chat::ConversationTurn;
use folio_types::config::{StoreBackend, StoreConfig};
use folio_types::error::RepositoryError;
use folio_types::knowledge::{Certification, Experience, Project, Skill};

use crate::config::Secrets;
use crate::sqlite::conversation::SqliteConversationRepository;
use crate::sqlite::knowledge::SqliteKnowledgeRepository;
use crate::sqlite::pool::{DatabasePool, database_url};
use crate::supabase::SupabaseClient;
use crate::supabase::conversation::SupabaseConversationRepository;
use crate::supabase::knowledge::SupabaseKnowledgeRepository;

pub enum KnowledgeStore {
    Supabase(SupabaseKnowledgeRepository),
    Sqlite(SqliteKnowledgeRepository),
}

pub enum ConversationStore {
    Supabase(SupabaseConversationRepository),
    Sqlite(SqliteConversationRepository),
}

impl KnowledgeRepository for KnowledgeStore {
    async fn list_skills(&self) -> Result<Vec<Skill>, RepositoryError> {
        match self {
            Self::Supabase(repo) => repo.list_skills().await,
            Self::Sqlite(repo) => repo.list_skills().await,
        }
    }

    async fn list_experiences(&self) -> Result<Vec<Experience>, RepositoryError> {
        match self {
            Self::Supabase(repo) => repo.list_experiences().await,
            Self::Sqlite(repo) => repo.list_experiences().await,
        }
    }

    async fn list_projects(&self) -> Result<Vec<Project>, RepositoryError> {
        match self {
            Self::Supabase(repo) => repo.list_projects().await,
            Self::Sqlite(repo) => repo.list_projects().await,
        }
    }

    async fn list_certifications(&self) -> Result<Vec<Certification>, RepositoryError> {
        match self {
            Self::Supabase(repo) => repo.list_certifications().await,
            Self::Sqlite(repo) => repo.list_certifications().await,
        }
    }
}

impl ConversationRepository for ConversationStore {
    async fn save_turn(&self, turn: &ConversationTurn) -> Result<(), RepositoryError> {
        match self {
            Self::Supabase(repo) => repo.save_turn(turn).await,
            Self::Sqlite(repo) => repo.save_turn(turn).await,
        }
    }

    async fn recent_turns(
        &self,
        session_id: &str,
        limit: u32,
    ) -> Result<Vec<ConversationTurn>, RepositoryError> {
        match self {
            Self::Supabase(repo) => repo.recent_turns(session_id, limit).await,
            Self::Sqlite(repo) => repo.recent_turns(session_id, limit).await,
        }
    }
}

/// Open both stores for the configured backend.
///
/// Supabase needs `SUPABASE_URL` and `SUPABASE_SERVICE_ROLE_KEY`; SQLite
/// creates the database file (and its parent directory) if missing and runs
/// migrations.
pub async fn open_stores(
    config: &StoreConfig,
    secrets: &Secrets,
) -> Result<(KnowledgeStore, ConversationStore), RepositoryError> {
    match config.backend {
        StoreBackend::Supabase => {
            let url = secrets.supabase_url.as_deref().ok_or_else(|| {
                RepositoryError::Connection("SUPABASE_URL is not set".to_string())
            })?;
            let key = secrets
                .supabase_service_key
                .as_ref()
                .map(|k| SecretString::from(k.expose_secret().to_owned()))
                .ok_or_else(|| {
                    RepositoryError::Connection("SUPABASE_SERVICE_ROLE_KEY is not set".to_string())
                })?;

            let client = Arc::new(SupabaseClient::new(
                url,
                key,
                Duration::from_secs(config.request_timeout_secs),
            )?);
            tracing::info!(url = %url, "Using Supabase store");

            Ok((
                KnowledgeStore::Supabase(SupabaseKnowledgeRepository::new(Arc::clone(&client))),
                ConversationStore::Supabase(SupabaseConversationRepository::new(client)),
            ))
        }
        StoreBackend::Sqlite => {
            let path = &config.sqlite_path;
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    RepositoryError::Connection(format!(
                        "failed to create {}: {e}",
                        parent.display()
                    ))
                })?;
            }

            let pool = DatabasePool::new(&database_url(path))
                .await
                .map_err(|e| RepositoryError::Connection(e.to_string()))?;
            tracing::info!(path = %path.display(), "Using SQLite store");

            Ok((
                KnowledgeStore::Sqlite(SqliteKnowledgeRepository::new(pool.clone())),
                ConversationStore::Sqlite(SqliteConversationRepository::new(pool)),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[tokio::test]
    async fn open_sqlite_stores_creates_nested_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            backend: StoreBackend::Sqlite,
            sqlite_path: dir.path().join("data").join("folio.db"),
            ..Default::default()
        };

        let (knowledge, conversations) = open_stores(&config, &Secrets::default()).await.unwrap();
        assert!(knowledge.list_skills().await.unwrap().is_empty());

        conversations
            .save_turn(&ConversationTurn {
                session_id: "s-1".to_string(),
                user_message: "Bonjour".to_string(),
                bot_response: "Bonjour !".to_string(),
                response_time_ms: 5,
                context: serde_json::json!({}),
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        assert_eq!(conversations.recent_turns("s-1", 5).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn open_supabase_without_credentials_fails() {
        let config = StoreConfig::default();
        let result = open_stores(&config, &Secrets::default()).await;
        assert!(matches!(result, Err(RepositoryError::Connection(_))));
    }

    #[tokio::test]
    async fn open_supabase_with_credentials() {
        let secrets = Secrets::from_lookup(|k| match k {
            "SUPABASE_URL" => Some("https://abc.supabase.co".to_string()),
            "SUPABASE_SERVICE_ROLE_KEY" => Some("service".to_string()),
            _ => None,
        });
        let (knowledge, _) = open_stores(&StoreConfig::default(), &secrets).await.unwrap();
        assert!(matches!(knowledge, KnowledgeStore::Supabase(_)));
    }
}
