//! SQLite conversation log implementation.
//!
//! Inserts go through the single-connection writer; history lookups use the
//! reader pool.

use folio_core::chat::repository::ConversationRepository;
use folio_types::chat::ConversationTurn;
use folio_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `ConversationRepository`.
pub struct SqliteConversationRepository {
    pool: DatabasePool,
}

impl SqliteConversationRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct ConversationRow {
    session_id: String,
    user_message: String,
    bot_response: String,
    response_time_ms: i64,
    context: String,
    created_at: String,
}

impl ConversationRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            session_id: row.try_get("session_id")?,
            user_message: row.try_get("user_message")?,
            bot_response: row.try_get("bot_response")?,
            response_time_ms: row.try_get("response_time_ms")?,
            context: row.try_get("context")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_domain(self) -> Result<ConversationTurn, RepositoryError> {
        let context = serde_json::from_str(&self.context)
            .map_err(|e| RepositoryError::Decode(format!("invalid context json: {e}")))?;

        Ok(ConversationTurn {
            session_id: self.session_id,
            user_message: self.user_message,
            bot_response: self.bot_response,
            response_time_ms: self.response_time_ms.max(0) as u64,
            context,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

impl ConversationRepository for SqliteConversationRepository {
    async fn save_turn(&self, turn: &ConversationTurn) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO chatbot_conversations (session_id, user_message, bot_response, response_time_ms, context, created_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&turn.session_id)
        .bind(&turn.user_message)
        .bind(&turn.bot_response)
        .bind(turn.response_time_ms as i64)
        .bind(turn.context.to_string())
        .bind(format_datetime(&turn.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn recent_turns(
        &self,
        session_id: &str,
        limit: u32,
    ) -> Result<Vec<ConversationTurn>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM chatbot_conversations WHERE session_id = ? ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(session_id)
        .bind(limit as i64)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut turns = Vec::with_capacity(rows.len());
        for row in &rows {
            let turn_row =
                ConversationRow::from_row(row).map_err(|e| RepositoryError::Decode(e.to_string()))?;
            turns.push(turn_row.into_domain()?);
        }

        Ok(turns)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::sqlite::pool::database_url;

    async fn test_repo() -> SqliteConversationRepository {
        let dir = tempfile::tempdir().unwrap();
        let url = database_url(&dir.path().join("test.db"));
        let pool = DatabasePool::new(&url).await.unwrap();
        std::mem::forget(dir);
        SqliteConversationRepository::new(pool)
    }

    fn turn(session: &str, message: &str, minutes_ago: i64) -> ConversationTurn {
        ConversationTurn {
            session_id: session.to_string(),
            user_message: message.to_string(),
            bot_response: format!("re: {message}"),
            response_time_ms: 420,
            context: serde_json::json!({"status": "generated", "model": "gpt-3.5-turbo"}),
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[tokio::test]
    async fn test_save_and_read_back() {
        let repo = test_repo().await;
        let original = turn("s-1", "Bonjour", 0);
        repo.save_turn(&original).await.unwrap();

        let turns = repo.recent_turns("s-1", 10).await.unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].user_message, "Bonjour");
        assert_eq!(turns[0].bot_response, "re: Bonjour");
        assert_eq!(turns[0].response_time_ms, 420);
        assert_eq!(turns[0].context["model"], "gpt-3.5-turbo");
        assert_eq!(turns[0].created_at, original.created_at);
    }

    #[tokio::test]
    async fn test_recent_turns_newest_first_and_limited() {
        let repo = test_repo().await;
        repo.save_turn(&turn("s-1", "first", 3)).await.unwrap();
        repo.save_turn(&turn("s-1", "second", 2)).await.unwrap();
        repo.save_turn(&turn("s-1", "third", 1)).await.unwrap();
        repo.save_turn(&turn("s-2", "other", 0)).await.unwrap();

        let turns = repo.recent_turns("s-1", 2).await.unwrap();
        let messages: Vec<&str> = turns.iter().map(|t| t.user_message.as_str()).collect();
        assert_eq!(messages, vec!["third", "second"]);
    }

    #[tokio::test]
    async fn test_unknown_session_is_empty() {
        let repo = test_repo().await;
        repo.save_turn(&turn("s-1", "hello", 0)).await.unwrap();
        assert!(repo.recent_turns("nobody", 10).await.unwrap().is_empty());
    }
}
