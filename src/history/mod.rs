//! Append-only conversation log.
//!
//! The log is the literal prompt history replayed to the model each turn:
//! system instructions, ingested file bodies, and the user/assistant
//! exchanges, in insertion order. Entries are never mutated or removed, and
//! growth is unbounded for the session's lifetime. Capping and summarization
//! are out of scope.

use crate::domain::{ConversationEntry, Role};

/// Session-scoped conversation log. Owned by the chat session and passed
/// explicitly to the components that need it; there is no process-global
/// state.
#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    entries: Vec<ConversationEntry>,
}

impl ConversationHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history seeded with a `system` instruction entry.
    pub fn with_system_prompt(prompt: &str) -> Self {
        let mut history = Self::new();
        history.push(Role::System, prompt.to_string());
        history
    }

    /// Append one entry. Always succeeds; order is semantically meaningful.
    pub fn push(&mut self, role: Role, content: String) {
        self.entries.push(ConversationEntry { role, content });
    }

    /// The full history in append order, used verbatim as the model call's
    /// input each turn.
    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
