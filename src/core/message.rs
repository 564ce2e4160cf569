//! # Messages
//!
//! The single chat entity and the append-only sequence that holds it.
//!
//! ```text
//! Conversation
//! └── messages: Vec<Message>     // insertion-ordered, never mutated
//!     ├── id: String             // rendering key (UUID v4)
//!     ├── content: String        // may contain '\n' paragraph breaks
//!     ├── sender: Sender         // User | Advisor
//!     └── timestamp: DateTime    // display only
//! ```

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Advisor,
}

/// One immutable unit of chat content.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
}

impl Message {
    fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            sender,
            timestamp: Local::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Sender::User, content)
    }

    pub fn advisor(content: impl Into<String>) -> Self {
        Self::new(Sender::Advisor, content)
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    /// Splits the content exactly at `\n` boundaries.
    ///
    /// Empty segments are kept, so the result always has
    /// `newline count + 1` entries.
    pub fn paragraphs(&self) -> Vec<&str> {
        self.content.split('\n').collect()
    }

    /// Localized `HH:MM` label for the message time.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

/// Append-only, insertion-ordered message sequence.
///
/// There is deliberately no API to remove or edit a message once pushed.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Starts a conversation with the advisor's greeting as the only message.
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::advisor(greeting)],
        }
    }

    /// Appends a message and returns a reference to it.
    pub fn push(&mut self, message: Message) -> &Message {
        let index = self.messages.len();
        self.messages.push(message);
        &self.messages[index]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}
