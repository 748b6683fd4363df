//! Token types shared by the lexer, the builder and tooling.
//!
//! Token Layers
//!
//!     Core Tokens:
//!         Character-class lexemes produced by the logos lexer: the five delimiter characters
//!         (`#`, `{`, `}`, `[`, `]`), line breaks, and maximal runs of everything else. They
//!         carry no meaning by themselves: a `]` is plain text outside a chord. See [core].
//!
//!     Semantic Tokens:
//!         What the tokenizer state machine emits after reading core tokens in context: text,
//!         chords, directives, comments, newlines, and the opaque front-matter block. The
//!         builder only ever sees these. See [Token].

pub mod core;
pub mod formatting;

pub use self::core::CoreToken;
pub use formatting::detokenize;

use serde::Serialize;
use std::fmt;

/// A semantic token of the song-sheet markup.
///
/// Values keep their delimiters: a chord is stored as `"[C]"`, a directive as `"{t: Title}"`,
/// a comment as `"# text"`. Stripping them is up to the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Token {
    /// Fenced block at the very top of the source, both fences included.
    Frontmatter(String),
    Text(String),
    Chord(String),
    Directive(String),
    Comment(String),
    /// One logical line break. `raw` is the break as written (`\n`, `\r\n` or `\r`), `run` is
    /// its 1-based position in the current run of consecutive breaks.
    Newline { raw: String, run: usize },
}

impl Token {
    /// The source text this token was read from.
    pub fn source_text(&self) -> &str {
        match self {
            Token::Frontmatter(s)
            | Token::Text(s)
            | Token::Chord(s)
            | Token::Directive(s)
            | Token::Comment(s) => s,
            Token::Newline { raw, .. } => raw,
        }
    }

    pub fn is_newline(&self) -> bool {
        matches!(self, Token::Newline { .. })
    }

    /// Short name of the token kind, used in logs and debug dumps.
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Frontmatter(_) => "Frontmatter",
            Token::Text(_) => "Text",
            Token::Chord(_) => "Chord",
            Token::Directive(_) => "Directive",
            Token::Comment(_) => "Comment",
            Token::Newline { .. } => "Newline",
        }
    }
}

/// Strip the first and last character of a delimited value: `"[C]"` → `"C"`,
/// `"{t: x}"` → `"t: x"`. Values of one character or less are returned unchanged.
pub fn trim_delim(value: &str) -> &str {
    let mut chars = value.chars();
    match (chars.next(), chars.next_back()) {
        (Some(_), Some(_)) => chars.as_str(),
        _ => value,
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Newline { run, .. } => write!(f, "Newline#{run}"),
            other => write!(f, "{}({:?})", other.kind(), other.source_text()),
        }
    }
}
