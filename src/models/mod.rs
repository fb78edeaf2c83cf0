//! Data models for the folio-relay API surface.
//!
//! - `chat`: the inbound `/api/chat` request and reply types.
//! - `completion`: the upstream `chat/completions` payload and the typed
//!   extraction of its reply text.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod chat;
pub mod completion;

pub use chat::{latest_user_message, ChatReply, ChatRequest, ChatTurn, Role};
pub use completion::{
    parse_completion, CompletionMessage, CompletionRequest, Extraction, MessageRole, MissingText,
};
