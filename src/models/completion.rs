//! Upstream chat-completions wire types.
//!
//! The request mirrors the OpenAI-compatible `chat/completions` payload the
//! provider router accepts. The response side is parsed into a typed
//! [`Extraction`] so that a well-formed body lacking the expected fields is
//! distinguishable from a body that is not a completion at all.

// Author: kelexine (https://github.com/kelexine)

use super::chat::{ChatTurn, Role};
use serde::{Deserialize, Serialize};

/// Role of a message in the upstream payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl From<Role> for MessageRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => MessageRole::User,
            Role::Assistant => MessageRole::Assistant,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionMessage {
    pub role: MessageRole,
    pub content: String,
}

impl From<&ChatTurn> for CompletionMessage {
    fn from(turn: &ChatTurn) -> Self {
        Self {
            role: turn.role.into(),
            content: turn.content.clone(),
        }
    }
}

/// Body of one upstream attempt. Only `model` varies between candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<CompletionMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Same payload addressed to a different model.
    pub fn for_model(&self, model: &str) -> Self {
        Self {
            model: model.to_string(),
            ..self.clone()
        }
    }
}

/// Successful `chat/completions` response, reduced to what the relay reads.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Why a well-formed completion carried no usable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingText {
    NoChoices,
    NoMessage,
    NoContent,
    Blank,
}

impl MissingText {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissingText::NoChoices => "no choices",
            MissingText::NoMessage => "first choice has no message",
            MissingText::NoContent => "message has no content",
            MissingText::Blank => "content is blank",
        }
    }
}

/// Outcome of reading the first choice's text from a completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Text(String),
    Missing(MissingText),
}

impl CompletionResponse {
    pub fn extract(self) -> Extraction {
        let Some(choice) = self.choices.into_iter().next() else {
            return Extraction::Missing(MissingText::NoChoices);
        };
        let Some(message) = choice.message else {
            return Extraction::Missing(MissingText::NoMessage);
        };
        let Some(content) = message.content else {
            return Extraction::Missing(MissingText::NoContent);
        };

        let trimmed = content.trim();
        if trimmed.is_empty() {
            Extraction::Missing(MissingText::Blank)
        } else {
            Extraction::Text(trimmed.to_string())
        }
    }
}

/// Parse a raw success body. Errors mean the body is not a completion.
pub fn parse_completion(raw: &str) -> Result<Extraction, serde_json::Error> {
    serde_json::from_str::<CompletionResponse>(raw).map(CompletionResponse::extract)
}
