//! # nerd-gemini
//!
//! Completion provider for the Nerd AI chat client, backed by the Google
//! generative-language REST API.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nerd_gemini::{GeminiClient, GeminiConfig};
//!
//! let client = GeminiClient::new(GeminiConfig::new(api_key));
//! controller.send(&client, "what is a lifetime?").await;
//! ```

pub mod gemini;

pub use gemini::{GeminiClient, GeminiConfig};

// Re-export core types for convenience
pub use nerd_core::{
    ChatController, ChatError, CompletionProvider, CompletionRequest, Message, Result, Role,
};
