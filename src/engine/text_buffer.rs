//! The typed-text buffer and its key-label edits.

use crate::engine::layout::{BACKSPACE, SPACE};

/// Append-or-delete text state mutated by accepted keystrokes.
///
/// SPACE appends a space, BACKSPACE removes the last character (a
/// no-op when empty), and every other key label is appended verbatim.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    content: String,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one accepted key label.
    pub fn apply(&mut self, label: &str) {
        match label {
            SPACE => self.content.push(' '),
            BACKSPACE => {
                self.content.pop();
            }
            _ => self.content.push_str(label),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn clear(&mut self) {
        self.content.clear();
    }
}

// ── Tests ──────────────────────────────────────────────────
