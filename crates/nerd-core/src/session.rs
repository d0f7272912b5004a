//! Chat Sessions
//!
//! One persisted conversation thread with its own message log and title.

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// Title given to a session before its first user message arrives
pub const DEFAULT_TITLE: &str = "New Conversation";

/// Titles derived from the first user message are cut at this many characters
const TITLE_MAX_CHARS: usize = 30;

/// Unique session identifier: creation timestamp in milliseconds
///
/// Callers creating sessions must keep ids unique within a collection;
/// [`crate::controller::ChatController`] bumps past the current maximum when
/// two sessions would land in the same millisecond.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(i64);

impl ChatId {
    /// Id for a session created now
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp_millis())
    }

    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// The next ordinal after this one
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single chat session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    /// Unique identifier
    pub id: ChatId,

    /// Short display title
    pub title: String,

    /// Ordered message transcript
    pub messages: Vec<Message>,
}

impl ChatSession {
    /// Create a session opened by a single assistant greeting
    ///
    /// The greeting depends on whether the user's display name is known;
    /// an empty `user_name` means the session opens by asking for one.
    pub fn new(id: ChatId, user_name: &str) -> Self {
        Self {
            id,
            title: DEFAULT_TITLE.into(),
            messages: vec![Message::assistant(opening_message(user_name))],
        }
    }

    /// Append a message to the transcript
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Whether any user message has been appended yet
    pub fn has_user_message(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.role == crate::message::Role::User)
    }
}

/// Greeting text for a freshly created session
fn opening_message(user_name: &str) -> String {
    if user_name.is_empty() {
        "Hey there! I'm Nerd, your personal AI companion. Quaigraine asked me to help \
         you learn. To make things a bit more friendly, what's your name?"
            .into()
    } else {
        format!("Alright {user_name}, let's start a fresh topic! What's on your mind?")
    }
}

/// Derive a session title from its first user message
///
/// Truncated to 30 characters with a `"..."` marker when the original text
/// was longer.
pub fn derive_title(first_user_text: &str) -> String {
    let mut title: String = first_user_text.chars().take(TITLE_MAX_CHARS).collect();
    if first_user_text.chars().count() > TITLE_MAX_CHARS {
        title.push_str("...");
    }
    title
}
