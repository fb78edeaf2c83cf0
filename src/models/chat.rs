//! Inbound chat API types.
//!
//! These are the shapes the portfolio front-end sends to `/api/chat` and
//! receives back from it.

// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

/// Speaker of a conversation turn supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single turn of the visitor's conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatTurn>,
}

/// Successful reply from `POST /api/chat`.
///
/// Fresh completions carry `modelUsed`; cache hits carry `cached: true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
}

impl ChatReply {
    pub fn from_cache(text: String) -> Self {
        Self {
            text,
            cached: Some(true),
            model_used: None,
        }
    }

    pub fn from_model(text: String, model: String) -> Self {
        Self {
            text,
            cached: None,
            model_used: Some(model),
        }
    }

    pub fn is_cached(&self) -> bool {
        self.cached.unwrap_or(false)
    }
}

/// Content of the most recent user turn, or `""` when there is none.
pub fn latest_user_message(turns: &[ChatTurn]) -> &str {
    turns
        .iter()
        .rev()
        .find(|turn| turn.role == Role::User)
        .map(|turn| turn.content.as_str())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_user_message_skips_assistant_turns() {
        let turns = vec![
            ChatTurn::user("first"),
            ChatTurn::assistant("answer"),
            ChatTurn::user("second"),
            ChatTurn::assistant("another answer"),
        ];
        assert_eq!(latest_user_message(&turns), "second");
    }

    #[test]
    fn test_latest_user_message_empty_conversation() {
        assert_eq!(latest_user_message(&[]), "");
        assert_eq!(latest_user_message(&[ChatTurn::assistant("hi")]), "");
    }

    #[test]
    fn test_reply_serialization_shapes() {
        let fresh = serde_json::to_value(ChatReply::from_model("hi".into(), "m".into())).unwrap();
        assert_eq!(fresh, serde_json::json!({ "text": "hi", "modelUsed": "m" }));

        let cached = serde_json::to_value(ChatReply::from_cache("hi".into())).unwrap();
        assert_eq!(cached, serde_json::json!({ "text": "hi", "cached": true }));
    }

    #[test]
    fn test_rejects_unknown_role() {
        let body = r#"{"messages":[{"role":"system","content":"x"}]}"#;
        assert!(serde_json::from_str::<ChatRequest>(body).is_err());
    }
}
