//! The ordered message log of the active session.

use crate::types::Message;

/// Append-only sequence of chat turns, replaceable as a whole.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from existing messages (e.g. a stored session).
    pub fn from_messages(messages: Vec<Message>) -> Self {
        MessageLog { messages }
    }

    /// Add a message at the end.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Swap the entire log for `messages`.
    pub fn replace(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    /// The full ordered log.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether any message was written by the user.
    pub fn has_user_content(&self) -> bool {
        self.messages.iter().any(Message::is_user)
    }
}
