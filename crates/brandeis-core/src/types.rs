//! Core types for brandeis

use serde::{Deserialize, Serialize};

/// Represents a position in the raw document text.
///
/// All fields count characters, not bytes, so they can be matched against
/// what an editor shows for the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: usize,
    /// Column number (0-indexed)
    pub column: usize,
    /// Character offset from start
    pub offset: usize,
}

impl Position {
    /// Create a position from its parts.
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Return the position reached after scanning `text` from here.
    pub fn advance(self, text: &str) -> Self {
        let mut next = self;
        for c in text.chars() {
            next.offset += 1;
            if c == '\n' {
                next.line += 1;
                next.column = 0;
            } else {
                next.column += 1;
            }
        }
        next
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}, column {} (offset {})",
            self.line, self.column, self.offset
        )
    }
}
