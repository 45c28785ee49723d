//! Review / edit session over generated content.
//!
//! The committed content stays untouched while an edit is open; the
//! editor binds to a shadow copy. Saving commits the shadow and
//! recomputes counts from the final text. Cancelling restores the
//! committed value byte for byte.

use crate::types::GeneratedContent;
use serde::Serialize;

/// Live character/word counts shown under the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveCounts {
    pub character_count: usize,
    pub word_count: usize,
}

impl LiveCounts {
    fn of(text: &str) -> Self {
        Self {
            character_count: text.chars().count(),
            word_count: text.split_whitespace().count(),
        }
    }
}

/// One generated content value plus an optional in-edit shadow copy.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    committed: GeneratedContent,
    draft: Option<String>,
}

impl ReviewSession {
    pub fn new(content: GeneratedContent) -> Self {
        Self {
            committed: content,
            draft: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Open the editor with a shadow copy of the committed message.
    pub fn begin_edit(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(self.committed.message.clone());
        }
    }

    /// Replace the shadow text; returns the live counts of the draft.
    pub fn update_draft(&mut self, text: String) -> LiveCounts {
        let counts = LiveCounts::of(&text);
        self.draft = Some(text);
        counts
    }

    /// Commit the shadow copy. Counts are recomputed from the saved
    /// text, never carried over.
    pub fn save(&mut self) -> &GeneratedContent {
        if let Some(draft) = self.draft.take() {
            self.committed.message = draft;
            self.committed.recount();
        }
        &self.committed
    }

    /// Discard the shadow copy; the committed value is untouched.
    pub fn cancel(&mut self) -> &GeneratedContent {
        self.draft = None;
        &self.committed
    }

    pub fn committed(&self) -> &GeneratedContent {
        &self.committed
    }

    /// Text currently shown: the draft while editing, else the
    /// committed message.
    pub fn current_text(&self) -> &str {
        self.draft.as_deref().unwrap_or(&self.committed.message)
    }
}
