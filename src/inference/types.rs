use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// First message of every conversation.
pub const WELCOME_MESSAGE: &str = "I am the Legion AI Assistant. Describe a circuit or component, and I will generate the specifications and netlist for you.";

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "model")]
    Model,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Model => "Legion AI",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    /// Raw text; may embed fenced code blocks.
    pub content: String,
    pub created_at: DateTime<Local>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at: Local::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self::new(Role::Model, content)
    }
}

/// Append-only, chronological list of messages for one session.
///
/// Messages are never edited or removed, so callers only ever get shared
/// references. Role alternation is not enforced.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// Creates a conversation holding only the welcome message.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::model(WELCOME_MESSAGE)],
        }
    }

    /// Adds a message at the end and returns a reference to it.
    pub fn append(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false: the welcome message is never removed.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}
