//! Chat Controller
//!
//! Owns the session collection, the active-session id, the display name,
//! and the in-flight flag. All collection mutations persist synchronously
//! through the [`KvStore`] the controller was constructed with.
//!
//! The single suspension point (the completion round trip) lives outside
//! the controller: [`ChatController::submit`] hands back a
//! [`CompletionRequest`] and [`ChatController::resolve`] folds the outcome
//! into the active session. [`ChatController::send`] drives both phases
//! when holding the controller across an await is possible.

use crate::message::Message;
use crate::provider::{CompletionProvider, CompletionRequest};
use crate::session::{ChatId, ChatSession, derive_title};
use crate::store::{self, KvStore};

/// Outcome of one submit action
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    /// Blank input, or a request is already in flight
    Ignored,

    /// Input was taken as the display name; no completion call is made
    NameCaptured,

    /// A user message was appended; the caller owes the controller one
    /// [`ChatController::resolve`] with this request's outcome
    Pending(CompletionRequest),
}

/// Chat session state machine
pub struct ChatController<S: KvStore> {
    store: S,
    user_name: String,
    chats: Vec<ChatSession>,
    active_id: Option<ChatId>,
    loading: bool,
    /// Session the in-flight request was submitted from; replies resolve
    /// here even when the user switches chats mid-request
    pending_chat: Option<ChatId>,
    /// Highest id handed out so far; replacements must not reuse the id of
    /// a session deleted in the same millisecond
    last_issued: Option<ChatId>,
}

impl<S: KvStore> ChatController<S> {
    /// Boot: seed state from the store
    ///
    /// Selects the most recent persisted session, or synthesizes one when
    /// none exist (the collection is never empty after construction).
    pub fn new(store: S) -> Self {
        let user_name = store::load_user_name(&store);
        let chats = store::load_chats(&store);
        let active_id = chats.first().map(|c| c.id);
        let last_issued = chats.iter().map(|c| c.id).max();

        let mut controller = Self {
            store,
            user_name,
            chats,
            active_id,
            loading: false,
            pending_chat: None,
            last_issued,
        };
        if controller.chats.is_empty() {
            controller.new_chat();
        }
        controller
    }

    /// Current display name; empty when not yet collected
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// All sessions, most recently created first
    pub fn chats(&self) -> &[ChatSession] {
        &self.chats
    }

    /// Id of the active session
    pub fn active_id(&self) -> Option<ChatId> {
        self.active_id
    }

    /// The active session, if the id resolves
    pub fn active_session(&self) -> Option<&ChatSession> {
        let id = self.active_id?;
        self.chats.iter().find(|c| c.id == id)
    }

    /// Whether a completion request is in flight
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Create a session, prepend it, and make it active
    pub fn new_chat(&mut self) {
        let session = ChatSession::new(self.fresh_id(), &self.user_name);
        self.active_id = Some(session.id);
        self.chats.insert(0, session);
        self.persist();
    }

    /// Remove a session by id
    ///
    /// Deleting the active session activates the new first element; deleting
    /// the last session synthesizes a replacement.
    pub fn delete_chat(&mut self, id: ChatId) {
        let before = self.chats.len();
        self.chats.retain(|c| c.id != id);
        if self.chats.len() == before {
            return;
        }

        if self.active_id == Some(id) {
            match self.chats.first() {
                Some(first) => {
                    self.active_id = Some(first.id);
                    self.persist();
                }
                None => self.new_chat(),
            }
        } else {
            self.persist();
        }
    }

    /// Make an existing session active; unknown ids are ignored
    pub fn select_chat(&mut self, id: ChatId) {
        if self.chats.iter().any(|c| c.id == id) {
            self.active_id = Some(id);
        }
    }

    /// Handle one user submission
    ///
    /// Blank input and submissions while a request is in flight are silently
    /// ignored. While the display name is unknown the text is taken as the
    /// name (after alias substitution) and no completion call is made.
    /// Otherwise the text is appended to the active session and the
    /// controller enters the loading sub-state until [`Self::resolve`] runs.
    pub fn submit(&mut self, raw: &str) -> Submission {
        let text = raw.trim();
        if text.is_empty() || self.loading {
            return Submission::Ignored;
        }

        if self.user_name.is_empty() {
            self.capture_name(text);
            return Submission::NameCaptured;
        }

        let idx = self.active_index_or_heal();
        let first_user_message = !self.chats[idx].has_user_message();
        self.chats[idx].push(Message::user(raw));
        if first_user_message {
            self.chats[idx].title = derive_title(raw);
        }

        let request = CompletionRequest {
            system_prompt: system_prompt(&self.user_name),
            transcript: self.chats[idx].messages.clone(),
        };
        self.persist();
        self.loading = true;
        self.pending_chat = Some(self.chats[idx].id);
        Submission::Pending(request)
    }

    /// Fold a completion outcome back into the session it was submitted from
    ///
    /// Failures become the fixed fallback assistant message; either way the
    /// loading sub-state ends. The reply lands in the originating session
    /// even when another chat was selected or created mid-request; only when
    /// that session was deleted does it fall back to the active one.
    /// Outcomes arriving with no request in flight are discarded.
    pub fn resolve(&mut self, outcome: crate::error::Result<String>) {
        if !self.loading {
            return;
        }
        self.loading = false;

        let content = match outcome {
            Ok(reply) => reply,
            Err(err) => {
                tracing::error!("completion request failed: {err}");
                fallback_message(&self.user_name)
            }
        };
        let origin = self.pending_chat.take();
        let idx = match origin.and_then(|id| self.chats.iter().position(|c| c.id == id)) {
            Some(idx) => idx,
            None => self.active_index_or_heal(),
        };
        self.chats[idx].push(Message::assistant(content));
        self.persist();
    }

    /// Submit and, when a completion is owed, await and resolve it
    pub async fn send<P: CompletionProvider>(&mut self, provider: &P, raw: &str) {
        if let Submission::Pending(request) = self.submit(raw) {
            let outcome = provider.complete(&request).await;
            self.resolve(outcome);
        }
    }

    fn capture_name(&mut self, text: &str) {
        let nickname = apply_alias(text);
        self.user_name = nickname.clone();
        store::save_user_name(&self.store, &nickname);

        let greeting = format!(
            "Hey {nickname}! It's so nice to meet you. What programming topic is on \
             your mind today?"
        );
        let idx = self.active_index_or_heal();
        self.chats[idx].push(Message::assistant(greeting));
        self.persist();
    }

    /// Index of the active session, repairing the active id when it does
    /// not resolve (falls back to the most recent session)
    fn active_index_or_heal(&mut self) -> usize {
        if self.chats.is_empty() {
            self.new_chat();
        }
        if let Some(id) = self.active_id {
            if let Some(idx) = self.chats.iter().position(|c| c.id == id) {
                return idx;
            }
        }
        tracing::warn!("active session id did not resolve, selecting most recent");
        self.active_id = Some(self.chats[0].id);
        0
    }

    /// Creation-timestamp id, bumped past every id issued so far so that
    /// sessions created (or deleted and replaced) in the same millisecond
    /// stay distinct
    fn fresh_id(&mut self) -> ChatId {
        let mut id = ChatId::now();
        if let Some(last) = self.last_issued {
            if last >= id {
                id = last.next();
            }
        }
        self.last_issued = Some(id);
        id
    }

    fn persist(&self) {
        store::save_chats(&self.store, &self.chats);
    }
}

/// Case-insensitive nickname substitutions applied to a submitted name
fn apply_alias(trimmed: &str) -> String {
    match trimmed.to_lowercase().as_str() {
        "derborah" => "Derby".into(),
        "blessing" => "lessy".into(),
        _ => trimmed.into(),
    }
}

/// Fixed tutor instruction sent with every completion request
fn system_prompt(user_name: &str) -> String {
    format!(
        "You are Nerd AI, a friendly and encouraging programming tutor. You were \
         created by Quaigraine. You are currently chatting with {user_name}. Always \
         address them by their name. Keep your tone patient, welcoming, and slightly \
         informal. Break down complex topics into simple, bite-sized pieces."
    )
}

/// Assistant message shown when the completion call fails
fn fallback_message(user_name: &str) -> String {
    format!(
        "Oh no, {user_name}! Something went wrong on my end. Please check the console \
         for errors."
    )
}
