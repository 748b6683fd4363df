//! Common lexer types: positions and the fatal lex errors.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A 1-based line/column location in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Compute the position of a byte offset. Columns count characters, not bytes; `\r\n`,
    /// `\r` and `\n` each end a line.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let before = source.get(..offset.min(source.len())).unwrap_or(source);
        let (mut line, mut column) = (1, 1);
        let mut chars = before.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\r' if chars.peek() == Some(&'\n') => {}
                '\r' | '\n' => {
                    line += 1;
                    column = 1;
                }
                _ => column += 1,
            }
        }
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Errors that abort the scan. Whatever was built before the error is kept.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum LexError {
    /// A `[` reached a line break or the end of input before its `]`.
    #[error("unterminated chord {fragment:?} at {position}")]
    UnterminatedChord { fragment: String, position: Position },

    /// A `{` reached the end of input before its `}`.
    #[error("unterminated directive {fragment:?} at {position}")]
    UnterminatedDirective { fragment: String, position: Position },
}

impl LexError {
    /// Where the unterminated construct started.
    pub fn position(&self) -> Position {
        match self {
            LexError::UnterminatedChord { position, .. }
            | LexError::UnterminatedDirective { position, .. } => *position,
        }
    }
}
