//! Core lexemes produced by logos.
//!
//! The markup has exactly five significant characters plus line breaks, so the core lexer only
//! classifies characters: a delimiter, a line break, or a run of anything else. Whether a
//! delimiter opens a chord, closes a directive or is literal text is decided later by the
//! tokenizer state machine, which is the only place that knows the current context.

use logos::Logos;

#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum CoreToken {
    #[token("#")]
    Hash,

    #[token("{")]
    OpenBrace,

    #[token("}")]
    CloseBrace,

    #[token("[")]
    OpenBracket,

    #[token("]")]
    CloseBracket,

    // `\r\n` wins over `\r` by longest match, so a Windows break is one lexeme
    #[token("\r\n")]
    #[token("\n")]
    #[token("\r")]
    LineBreak,

    #[regex(r"[^#\[\]\{\}\r\n]+")]
    Run,
}

impl CoreToken {
    /// Delimiters that end a text run in the Text state.
    pub fn ends_text(&self) -> bool {
        matches!(
            self,
            CoreToken::Hash | CoreToken::OpenBrace | CoreToken::OpenBracket | CoreToken::LineBreak
        )
    }
}
