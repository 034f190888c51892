//! Chat backend client.
//!
//! The backend is an external service that turns a user message into a bot
//! reply. Aura only knows its wire format.

pub mod http;

pub use http::HttpBackend;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body POSTed to the backend for each accepted user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message text.
    pub message: String,

    /// Id of the session the message belongs to.
    pub session_id: String,
}

/// Successful backend answer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatReply {
    /// Bot reply text.
    pub response: String,

    /// Attribution for the reply, usually a list of document names.
    #[serde(default)]
    pub context_sources: Option<Value>,
}

/// Produces bot replies.
pub trait ChatBackend {
    /// Exchange one message for one reply.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or an
    /// unreadable response body.
    fn chat(&self, request: &ChatRequest) -> Result<ChatReply>;
}

impl<B: ChatBackend + ?Sized> ChatBackend for &B {
    fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        (**self).chat(request)
    }
}
