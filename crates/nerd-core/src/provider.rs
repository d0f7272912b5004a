//! Completion Provider Strategy
//!
//! Defines the interface the chat controller speaks to an external
//! text-generation backend through, allowing the Gemini client to be swapped
//! for a mock in tests without touching controller logic.

use async_trait::async_trait;

use crate::error::Result;
use crate::message::Message;

/// Everything one completion call needs
///
/// Built by the controller from the active session: the fixed system
/// instruction (embedding the current display name) plus the full ordered
/// message history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionRequest {
    /// System instruction sent alongside the transcript
    pub system_prompt: String,

    /// Ordered conversation transcript, oldest first
    pub transcript: Vec<Message>,
}

/// Strategy trait for completion backends
///
/// `?Send` because the frontend drives completions from a single-threaded
/// WASM event loop where the HTTP futures are not `Send`.
#[async_trait(?Send)]
pub trait CompletionProvider {
    /// Map a transcript to a single reply
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}
