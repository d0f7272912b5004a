//! # nerd-core
//!
//! Chat-session state management for the Nerd AI client: the session model,
//! the persistent-store contract, and the controller state machine that
//! serializes requests to an external completion provider.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    ChatController                        │
//! │  ┌────────────┐  ┌──────────────┐  ┌──────────────────┐  │
//! │  │  Sessions  │  │   KvStore    │  │ CompletionProvider│ │
//! │  │  (model)   │──│ (persistence)│──│   (strategy)     │  │
//! │  └────────────┘  └──────────────┘  └──────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The `KvStore` and `CompletionProvider` traits keep the controller free of
//! any storage backend or HTTP client, so both are swappable in tests.

pub mod controller;
pub mod error;
pub mod message;
pub mod provider;
pub mod session;
pub mod store;

pub use controller::{ChatController, Submission};
pub use error::{ChatError, Result};
pub use message::{Message, Role};
pub use provider::{CompletionProvider, CompletionRequest};
pub use session::{ChatId, ChatSession, derive_title};
pub use store::{KvStore, MemoryStore};
