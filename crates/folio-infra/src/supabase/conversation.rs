//! Supabase conversation log (`chatbot_conversations`).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use folio_core::chat::repository::ConversationRepository;
use folio_types::chat::ConversationTurn;
use folio_types::error::RepositoryError;

use super::SupabaseClient;

const TABLE: &str = "chatbot_conversations";

pub struct SupabaseConversationRepository {
    client: Arc<SupabaseClient>,
}

impl SupabaseConversationRepository {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

#[derive(Serialize)]
struct NewConversationRow<'a> {
    session_id: &'a str,
    user_message: &'a str,
    bot_response: &'a str,
    response_time_ms: u64,
    context: &'a serde_json::Value,
    created_at: DateTime<Utc>,
}

impl<'a> From<&'a ConversationTurn> for NewConversationRow<'a> {
    fn from(turn: &'a ConversationTurn) -> Self {
        Self {
            session_id: &turn.session_id,
            user_message: &turn.user_message,
            bot_response: &turn.bot_response,
            response_time_ms: turn.response_time_ms,
            context: &turn.context,
            created_at: turn.created_at,
        }
    }
}

#[derive(Deserialize)]
struct ConversationRow {
    session_id: String,
    user_message: String,
    bot_response: String,
    #[serde(default)]
    response_time_ms: Option<i64>,
    #[serde(default)]
    context: Option<serde_json::Value>,
    created_at: DateTime<Utc>,
}

impl ConversationRow {
    fn into_domain(self) -> ConversationTurn {
        ConversationTurn {
            session_id: self.session_id,
            user_message: self.user_message,
            bot_response: self.bot_response,
            response_time_ms: self.response_time_ms.unwrap_or(0).max(0) as u64,
            context: self
                .context
                .unwrap_or_else(|| serde_json::Value::Object(Default::default())),
            created_at: self.created_at,
        }
    }
}

fn history_params(session_id: &str, limit: u32) -> [(&'static str, String); 4] {
    [
        (
            "select",
            "session_id,user_message,bot_response,response_time_ms,context,created_at".to_string(),
        ),
        ("session_id", format!("eq.{session_id}")),
        ("order", "created_at.desc".to_string()),
        ("limit", limit.to_string()),
    ]
}

impl ConversationRepository for SupabaseConversationRepository {
    async fn save_turn(&self, turn: &ConversationTurn) -> Result<(), RepositoryError> {
        self.client
            .insert(TABLE, &NewConversationRow::from(turn))
            .await
    }

    async fn recent_turns(
        &self,
        session_id: &str,
        limit: u32,
    ) -> Result<Vec<ConversationTurn>, RepositoryError> {
        let rows: Vec<ConversationRow> = self
            .client
            .select(TABLE, &history_params(session_id, limit))
            .await?;
        Ok(rows.into_iter().map(ConversationRow::into_domain).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_body_shape() {
        let turn = ConversationTurn {
            session_id: "anonymous".to_string(),
            user_message: "Bonjour".to_string(),
            bot_response: "Bonjour !".to_string(),
            response_time_ms: 812,
            context: serde_json::json!({"status": "generated"}),
            created_at: Utc::now(),
        };

        let body = serde_json::to_value(NewConversationRow::from(&turn)).unwrap();
        assert_eq!(body["session_id"], "anonymous");
        assert_eq!(body["response_time_ms"], 812);
        assert_eq!(body["context"]["status"], "generated");
        assert!(body.get("id").is_none());
    }

    #[test]
    fn test_row_from_postgrest_json() {
        let row: ConversationRow = serde_json::from_value(serde_json::json!({
            "session_id": "s-1",
            "user_message": "Compétences ?",
            "bot_response": "Python.",
            "response_time_ms": null,
            "context": null,
            "created_at": "2024-05-01T10:15:30.123456+00:00"
        }))
        .unwrap();

        let turn = row.into_domain();
        assert_eq!(turn.response_time_ms, 0);
        assert!(turn.context.as_object().unwrap().is_empty());
    }

    #[test]
    fn test_history_params() {
        let params = history_params("visitor-7", 10);
        assert_eq!(params[1], ("session_id", "eq.visitor-7".to_string()));
        assert_eq!(params[2].1, "created_at.desc");
        assert_eq!(params[3].1, "10");
    }
}
