//! Detokenizer
//!
//!     Turns a token list back into source text. Every character of the input belongs to exactly
//!     one semantic token and every token keeps its delimiters, so for a token list produced
//!     without a front-matter token this is the exact inverse of tokenization. The one lossy
//!     spot is the blank lines that may precede a front-matter fence: the detector skips them.

use super::Token;

pub fn detokenize(tokens: &[Token]) -> String {
    tokens.iter().map(Token::source_text).collect()
}
