//! Base tokenization implementation for the chordpro lexer
//!
//! This module provides the raw tokenization using the logos lexer library.
//! This is the entry point where source strings become core token streams.

use crate::chordpro::token::CoreToken;
use logos::Logos;
use std::ops::Range;

/// Tokenize source text into core lexemes with their byte ranges.
///
/// `offset` is added to every range, so a caller lexing a suffix of the document (after a
/// front-matter block) still gets ranges relative to the whole source.
pub fn tokenize(source: &str, offset: usize) -> Vec<(CoreToken, Range<usize>)> {
    let mut lexer = CoreToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        // Run matches every non-delimiter character, so logos has nothing to reject
        if let Ok(token) = result {
            let span = lexer.span();
            tokens.push((token, span.start + offset..span.end + offset));
        }
    }

    tokens
}
