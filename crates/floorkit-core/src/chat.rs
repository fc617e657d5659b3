//! Seams to the host chat application, plus in-memory implementations.
//!
//! # Design
//! - Host handles are shared references to live host state, so setters take `&self`.
//! - `?Send` async traits keep the same code usable on the browser's single thread.
//! - The in-memory host backs native tests and embedders without a browser.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::HostError;

/// The pair of flags that decides whether a floor is rendered and sent downstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Visibility {
    /// Host treats the message as a system message.
    pub is_system: bool,
    /// Host hides the message from the rendered conversation.
    pub is_hidden: bool,
}

impl Visibility {
    /// Flags set by a hide.
    pub const HIDDEN: Self = Self {
        is_system: true,
        is_hidden: true,
    };
    /// Flags set by an unhide.
    pub const SHOWN: Self = Self {
        is_system: false,
        is_hidden: false,
    };
}

/// One chat message as the host stores it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message text.
    #[serde(rename = "mes", default)]
    pub text: String,
    /// System-message flag.
    #[serde(default)]
    pub is_system: bool,
    /// Hidden flag.
    #[serde(default)]
    pub is_hidden: bool,
}

impl ChatMessage {
    /// Visible message with `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Current visibility flags.
    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        Visibility {
            is_system: self.is_system,
            is_hidden: self.is_hidden,
        }
    }
}

/// Live view of the host's current chat.
#[async_trait(?Send)]
pub trait ChatContext {
    /// Number of floors in the chat right now.
    fn floor_count(&self) -> usize;

    /// Text of `floor`, or `None` when it does not exist.
    fn message_text(&self, floor: usize) -> Option<String>;

    /// Visibility flags of `floor`, or `None` when it does not exist.
    fn visibility(&self, floor: usize) -> Option<Visibility>;

    /// Overwrite the visibility flags of `floor`; `false` when it does not exist.
    fn set_visibility(&self, floor: usize, visibility: Visibility) -> bool;

    /// Overwrite the text of `floor`; `false` when it does not exist.
    fn set_text(&self, floor: usize, text: &str) -> bool;

    /// Persist the chat through the host.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] when the host fails to save.
    async fn save_chat(&self) -> Result<(), HostError>;
}

/// Supplier of the chat context; `None` means the host has no chat available.
pub trait ChatHost {
    /// Context handle type.
    type Context: ChatContext;

    /// Fetch the current chat context.
    fn context(&self) -> Option<Self::Context>;
}

/// Fire-and-forget user notifications.
pub trait Notifier {
    /// Report a success.
    fn success(&self, message: &str);
    /// Report a failure.
    fn error(&self, message: &str);
}

/// Shared in-memory chat; clones observe the same messages.
#[derive(Debug, Clone, Default)]
pub struct InMemoryChat {
    messages: Rc<RefCell<Vec<ChatMessage>>>,
    saves: Rc<Cell<usize>>,
    fail_saves: Rc<Cell<bool>>,
}

impl InMemoryChat {
    /// Chat holding `messages`.
    #[must_use]
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages: Rc::new(RefCell::new(messages)),
            ..Self::default()
        }
    }

    /// Chat with one visible message per text.
    #[must_use]
    pub fn from_texts<I, T>(texts: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::new(texts.into_iter().map(ChatMessage::new).collect())
    }

    /// Parse a JSON array of host messages.
    ///
    /// # Errors
    ///
    /// Returns the JSON error when `raw` is not an array of messages.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        Ok(Self::new(serde_json::from_str(raw)?))
    }

    /// Copy of every message.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages.borrow().clone()
    }

    /// Append a message, as the host does when the conversation grows.
    pub fn push(&self, message: ChatMessage) {
        self.messages.borrow_mut().push(message);
    }

    /// Drop messages past `len`, as the host does when floors are deleted.
    pub fn truncate(&self, len: usize) {
        self.messages.borrow_mut().truncate(len);
    }

    /// Number of successful saves so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// Make subsequent saves fail.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }
}

#[async_trait(?Send)]
impl ChatContext for InMemoryChat {
    fn floor_count(&self) -> usize {
        self.messages.borrow().len()
    }

    fn message_text(&self, floor: usize) -> Option<String> {
        self.messages
            .borrow()
            .get(floor)
            .map(|message| message.text.clone())
    }

    fn visibility(&self, floor: usize) -> Option<Visibility> {
        self.messages.borrow().get(floor).map(ChatMessage::visibility)
    }

    fn set_visibility(&self, floor: usize, visibility: Visibility) -> bool {
        let mut messages = self.messages.borrow_mut();
        let Some(message) = messages.get_mut(floor) else {
            return false;
        };
        message.is_system = visibility.is_system;
        message.is_hidden = visibility.is_hidden;
        true
    }

    fn set_text(&self, floor: usize, text: &str) -> bool {
        let mut messages = self.messages.borrow_mut();
        let Some(message) = messages.get_mut(floor) else {
            return false;
        };
        message.text = text.to_string();
        true
    }

    async fn save_chat(&self) -> Result<(), HostError> {
        if self.fail_saves.get() {
            return Err(HostError::SaveFailed {
                detail: "save rejected".to_string(),
            });
        }
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

/// Host that always hands out the same in-memory chat, or none at all.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    chat: Option<InMemoryChat>,
}

impl MemoryHost {
    /// Host serving `chat`.
    #[must_use]
    pub const fn new(chat: InMemoryChat) -> Self {
        Self { chat: Some(chat) }
    }

    /// Host with no chat open.
    #[must_use]
    pub const fn without_chat() -> Self {
        Self { chat: None }
    }
}

impl ChatHost for MemoryHost {
    type Context = InMemoryChat;

    fn context(&self) -> Option<Self::Context> {
        self.chat.clone()
    }
}

/// A notification captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Success message.
    Success(String),
    /// Error message.
    Error(String),
}

/// Notifier that logs and keeps every message for later inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl RecordingNotifier {
    /// Empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notice in emission order.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    /// Most recent notice.
    #[must_use]
    pub fn last(&self) -> Option<Notice> {
        self.notices.borrow().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(text = message, "notify success");
        self.notices
            .borrow_mut()
            .push(Notice::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        tracing::warn!(text = message, "notify error");
        self.notices
            .borrow_mut()
            .push(Notice::Error(message.to_string()));
    }
}

impl<N: Notifier + ?Sized> Notifier for Rc<N> {
    fn success(&self, message: &str) {
        (**self).success(message);
    }

    fn error(&self, message: &str) {
        (**self).error(message);
    }
}
