use chrono::{DateTime, Utc};

use crate::model::ModelResponse;

/// One prompt paired with the response it produced. Entries are recorded
/// only for successful calls and are never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationEntry {
    pub prompt: String,
    pub response: ModelResponse,
    pub created_at: DateTime<Utc>,
}

impl ConversationEntry {
    pub fn new(prompt: impl Into<String>, response: ModelResponse) -> Self {
        Self {
            prompt: prompt.into(),
            response,
            created_at: Utc::now(),
        }
    }
}

/// Session-scoped conversation history. Insertion order is display order;
/// the sequence only grows until the session (or `/clear`) resets it.
pub struct ConversationState {
    entries: Vec<ConversationEntry>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: ConversationEntry) {
        self.entries.push(entry);
    }

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
