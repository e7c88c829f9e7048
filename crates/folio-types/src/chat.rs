//! Chat request/reply and conversation log types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::llm::{Message, Usage};

/// Session id used when the client does not send one.
pub const ANONYMOUS_SESSION: &str = "anonymous";

/// An end-user chat request as received at the HTTP boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Missing counts as empty and is rejected by validation.
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
    /// Prior turns, oldest first, as kept by the client.
    #[serde(default)]
    pub conversation_history: Vec<Message>,
}

impl ChatRequest {
    /// The session id, or `"anonymous"` when absent or blank.
    pub fn session(&self) -> &str {
        match self.session_id.as_deref() {
            Some(id) if !id.trim().is_empty() => id,
            _ => ANONYMOUS_SESSION,
        }
    }
}

/// Whether the reply came from the model or is the fixed fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStatus {
    Generated,
    Fallback,
}

/// The reply returned to the end user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub reply: String,
    pub latency_ms: u64,
    pub status: ReplyStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// One persisted request/reply pair in the conversation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub session_id: String,
    pub user_message: String,
    pub bot_response: String,
    pub response_time_ms: u64,
    /// Free-form metadata: reply status, model, token usage, snapshot origin.
    pub context: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl ConversationTurn {
    /// Expand the turn into its user and assistant messages, in that order.
    pub fn into_messages(self) -> [Message; 2] {
        [
            Message::user(self.user_message),
            Message::assistant(self.bot_response),
        ]
    }
}

/// Languages the suggestion table is defined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
    De,
}

impl Language {
    /// Resolve a language code. Unknown or missing codes fall back to French.
    ///
    /// Accepts region-qualified codes such as `en-US`.
    pub fn from_code(code: Option<&str>) -> Self {
        let Some(code) = code else {
            return Language::Fr;
        };
        let primary = code
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        match primary.as_str() {
            "en" => Language::En,
            "de" => Language::De,
            _ => Language::Fr,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
            Language::De => "de",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MessageRole;

    #[test]
    fn test_chat_request_from_client_json() {
        let json = r#"{
            "message": "Quelles sont ses compétences ?",
            "sessionId": "abc-123",
            "conversationHistory": [
                {"role": "user", "content": "Bonjour"},
                {"role": "assistant", "content": "Bonjour ! Comment puis-je aider ?"}
            ]
        }"#;
        let req: ChatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.session(), "abc-123");
        assert_eq!(req.conversation_history.len(), 2);
        assert_eq!(req.conversation_history[1].role, MessageRole::Assistant);
    }

    #[test]
    fn test_missing_session_is_anonymous() {
        let req: ChatRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert_eq!(req.session(), ANONYMOUS_SESSION);
        assert!(req.conversation_history.is_empty());

        let req = ChatRequest {
            message: "hi".to_string(),
            session_id: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(req.session(), ANONYMOUS_SESSION);
    }

    #[test]
    fn test_reply_serializes_camel_case() {
        let reply = ChatReply {
            reply: "ok".to_string(),
            latency_ms: 120,
            status: ReplyStatus::Fallback,
            usage: None,
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["latencyMs"], 120);
        assert_eq!(json["status"], "fallback");
        assert!(json.get("usage").is_none());
    }

    #[test]
    fn test_language_from_code() {
        assert_eq!(Language::from_code(Some("en")), Language::En);
        assert_eq!(Language::from_code(Some("de-AT")), Language::De);
        assert_eq!(Language::from_code(Some("EN_us")), Language::En);
        assert_eq!(Language::from_code(Some("es")), Language::Fr);
        assert_eq!(Language::from_code(Some("")), Language::Fr);
        assert_eq!(Language::from_code(None), Language::Fr);
    }

    #[test]
    fn test_turn_into_messages() {
        let turn = ConversationTurn {
            session_id: "s".to_string(),
            user_message: "question".to_string(),
            bot_response: "answer".to_string(),
            response_time_ms: 5,
            context: serde_json::json!({}),
            created_at: Utc::now(),
        };
        let [user, assistant] = turn.into_messages();
        assert_eq!(user, Message::user("question"));
        assert_eq!(assistant, Message::assistant("answer"));
    }
}
