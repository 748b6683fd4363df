//! Lexer
//!
//!     This module turns song-sheet source text into a stream of semantic tokens.
//!
//! The Lexing Pipeline
//!
//!     1. Front-matter detection. See [frontmatter]. Runs once at offset zero; if a fenced
//!        block is found it becomes the first token and tokenization resumes right after it.
//!
//!     2. Core tokenization using logos. See [base_tokenization]. Characters are classified
//!        into delimiters, line breaks and plain runs, each with its byte range.
//!
//!     3. The tokenizer state machine. See [tokenizer]. Five states (text, comment, chord,
//!        directive, newline) read core tokens in context and emit Text, Chord, Directive,
//!        Comment and Newline tokens. Newline tokens carry their position in the current run
//!        of consecutive breaks, which is what the builder uses to spot blank lines.
//!
//!     Splitting classification (logos) from context (the state machine) keeps the logos lexer
//!     vanilla: `]` is always the same lexeme, and only the chord state gives it meaning.
//!
//! Errors
//!
//!     An unterminated chord or directive aborts the scan. The stream yields a single
//!     [LexError] and ends; tokens read before it have already been delivered.

pub mod base_tokenization;
pub mod common;
pub mod frontmatter;
pub mod tokenizer;

pub use common::{LexError, Position};
pub use frontmatter::{extract_frontmatter, Frontmatter};
pub use tokenizer::{tokenize, Tokenizer};
