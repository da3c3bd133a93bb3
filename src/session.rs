//! Chat Session Manager - ordered, session-scoped message history
//!
//! Append-only within a session; no cross-session persistence. Unlike the
//! reference behavior, history is capped: once the cap is reached the oldest
//! messages are evicted so a long-lived session cannot grow without bound.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_MAX_MESSAGES: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    id: Uuid,
    messages: Vec<ChatMessage>,
    max_messages: usize,
}

impl ChatSession {
    pub fn new(max_messages: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            messages: Vec::new(),
            max_messages: max_messages.max(1),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
        if self.messages.len() > self.max_messages {
            let excess = self.messages.len() - self.max_messages;
            self.messages.drain(..excess);
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn reset(&mut self) {
        self.messages.clear();
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MESSAGES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_preserves_append_order() {
        let mut session = ChatSession::default();
        let m1 = ChatMessage::user("which parts are low in stock?");
        let m2 = ChatMessage::assistant("3 parts are below minimum stock.");
        session.append(m1.clone());
        session.append(m2.clone());
        assert_eq!(session.history(), &[m1, m2]);
    }

    #[test]
    fn reset_clears_history() {
        let mut session = ChatSession::default();
        session.append(ChatMessage::user("hello"));
        session.reset();
        assert!(session.history().is_empty());
        assert!(session.is_empty());
    }

    #[test]
    fn cap_evicts_oldest_messages() {
        let mut session = ChatSession::new(3);
        for i in 0..5 {
            session.append(ChatMessage::user(format!("message {}", i)));
        }
        let contents: Vec<&str> = session
            .history()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["message 2", "message 3", "message 4"]);
    }
}
