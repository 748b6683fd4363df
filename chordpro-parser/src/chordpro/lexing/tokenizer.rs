//! The tokenizer state machine
//!
//!     States are plain enum values and each one has a transition function that consumes core
//!     lexemes, queues the semantic tokens it recognised and returns the next state. The
//!     iterator drives the transitions in a loop, so there is no recursion between states.
//!
//!     Frontmatter ─► Text ◄──────────────┐
//!                     │ `#`  ─► Comment ─► Newline
//!                     │ `[`  ─► Chord ────┤
//!                     │ `{`  ─► Directive ┤
//!                     │ break ─► Newline ─┘
//!                     └ end  ─► Done
//!
//!     Looking ahead is limited to peeking at the next lexeme, which is the lexeme-level
//!     equivalent of rewinding one character.

use super::base_tokenization;
use super::common::{LexError, Position};
use super::frontmatter::{extract_frontmatter, Frontmatter};
use crate::chordpro::token::{CoreToken, Token};
use std::collections::VecDeque;
use std::ops::Range;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Frontmatter,
    Text,
    Comment,
    Chord,
    Directive,
    Newline,
    Done,
}

/// Lazy token stream over a song sheet.
///
/// Yields `Ok((token, byte_range))` items. A fatal lex error is yielded once as `Err` and the
/// stream ends right after it.
pub struct Tokenizer<'a> {
    source: &'a str,
    lexemes: Vec<(CoreToken, Range<usize>)>,
    cursor: usize,
    state: State,
    frontmatter: Option<Frontmatter>,
    pending: VecDeque<(Token, Range<usize>)>,
}

impl<'a> Tokenizer<'a> {
    /// Tokenizer that first looks for a front-matter block at the top of `source`.
    pub fn new(source: &'a str) -> Self {
        Self::with_frontmatter(source, extract_frontmatter(source))
    }

    /// Tokenizer that reads `source` from offset zero with no front-matter detection.
    pub fn without_frontmatter(source: &'a str) -> Self {
        Self::with_frontmatter(source, None)
    }

    fn with_frontmatter(source: &'a str, frontmatter: Option<Frontmatter>) -> Self {
        let offset = frontmatter.as_ref().map(|fm| fm.end).unwrap_or(0);
        let state = if frontmatter.is_some() {
            State::Frontmatter
        } else {
            State::Text
        };

        Self {
            source,
            lexemes: base_tokenization::tokenize(&source[offset..], offset),
            cursor: 0,
            state,
            frontmatter,
            pending: VecDeque::new(),
        }
    }

    fn peek(&self) -> Option<CoreToken> {
        self.lexemes.get(self.cursor).map(|(token, _)| *token)
    }

    fn advance(&mut self) -> Option<(CoreToken, Range<usize>)> {
        let lexeme = self.lexemes.get(self.cursor).cloned();
        if lexeme.is_some() {
            self.cursor += 1;
        }
        lexeme
    }

    fn emit(&mut self, token: Token, range: Range<usize>) {
        trace!(token = %token, ?range, "emit");
        self.pending.push_back((token, range));
    }

    fn slice(&self, range: &Range<usize>) -> String {
        self.source[range.clone()].to_string()
    }

    fn step(&mut self, state: State) -> Result<State, LexError> {
        match state {
            State::Frontmatter => Ok(self.lex_frontmatter()),
            State::Text => Ok(self.lex_text()),
            State::Comment => Ok(self.lex_comment()),
            State::Chord => self.lex_chord(),
            State::Directive => self.lex_directive(),
            State::Newline => Ok(self.lex_newline()),
            State::Done => Ok(State::Done),
        }
    }

    fn lex_frontmatter(&mut self) -> State {
        if let Some(fm) = self.frontmatter.take() {
            self.emit(Token::Frontmatter(fm.text), fm.start..fm.end);
        }
        State::Text
    }

    /// Consumes everything up to `#`, `{`, `[`, a line break or the end of input.
    fn lex_text(&mut self) -> State {
        let mut range: Option<Range<usize>> = None;

        while let Some(token) = self.peek() {
            if token.ends_text() {
                break;
            }
            if let Some((_, span)) = self.advance() {
                range = Some(match range {
                    Some(r) => r.start..span.end,
                    None => span,
                });
            }
        }

        if let Some(range) = range {
            let text = self.slice(&range);
            self.emit(Token::Text(text), range);
        }

        match self.peek() {
            Some(CoreToken::Hash) => State::Comment,
            Some(CoreToken::OpenBrace) => State::Directive,
            Some(CoreToken::OpenBracket) => State::Chord,
            Some(CoreToken::LineBreak) => State::Newline,
            _ => State::Done,
        }
    }

    /// `#` up to the end of the line. The line break itself belongs to the Newline state.
    fn lex_comment(&mut self) -> State {
        let Some((_, hash)) = self.advance() else {
            return State::Done;
        };
        let mut end = hash.end;

        while let Some(token) = self.peek() {
            if token == CoreToken::LineBreak {
                break;
            }
            if let Some((_, span)) = self.advance() {
                end = span.end;
            }
        }

        let range = hash.start..end;
        let text = self.slice(&range);
        self.emit(Token::Comment(text), range);
        State::Newline
    }

    /// `[` up to `]`. A line break or the end of input first is fatal.
    fn lex_chord(&mut self) -> Result<State, LexError> {
        let Some((_, open)) = self.advance() else {
            return Ok(State::Done);
        };

        loop {
            match self.advance() {
                Some((CoreToken::CloseBracket, close)) => {
                    let range = open.start..close.end;
                    let chord = self.slice(&range);
                    self.emit(Token::Chord(chord), range);
                    return Ok(State::Text);
                }
                Some((CoreToken::LineBreak, brk)) => {
                    return Err(LexError::UnterminatedChord {
                        fragment: self.slice(&(open.start..brk.start)),
                        position: Position::from_offset(self.source, open.start),
                    });
                }
                Some(_) => continue,
                None => {
                    return Err(LexError::UnterminatedChord {
                        fragment: self.source[open.start..].to_string(),
                        position: Position::from_offset(self.source, open.start),
                    });
                }
            }
        }
    }

    /// `{` up to `}`. Directives may span lines; only the end of input first is fatal.
    fn lex_directive(&mut self) -> Result<State, LexError> {
        let Some((_, open)) = self.advance() else {
            return Ok(State::Done);
        };

        loop {
            match self.advance() {
                Some((CoreToken::CloseBrace, close)) => {
                    let range = open.start..close.end;
                    let directive = self.slice(&range);
                    self.emit(Token::Directive(directive), range);
                    return Ok(State::Text);
                }
                Some(_) => continue,
                None => {
                    return Err(LexError::UnterminatedDirective {
                        fragment: self.source[open.start..].to_string(),
                        position: Position::from_offset(self.source, open.start),
                    });
                }
            }
        }
    }

    /// One Newline token per logical break, numbered within the run.
    fn lex_newline(&mut self) -> State {
        let mut run = 0;

        while self.peek() == Some(CoreToken::LineBreak) {
            if let Some((_, span)) = self.advance() {
                run += 1;
                let raw = self.slice(&span);
                self.emit(Token::Newline { raw, run }, span);
            }
        }

        if self.peek().is_some() {
            State::Text
        } else {
            State::Done
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<(Token, Range<usize>), LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(Ok(token));
            }
            if self.state == State::Done {
                return None;
            }
            match self.step(self.state) {
                Ok(next) => self.state = next,
                Err(err) => {
                    self.state = State::Done;
                    return Some(Err(err));
                }
            }
        }
    }
}

/// Tokenize a whole document, front-matter detection included.
///
/// Stops at the first fatal error; use [`Tokenizer`] directly to keep the tokens read before it.
pub fn tokenize(source: &str) -> Result<Vec<(Token, Range<usize>)>, LexError> {
    Tokenizer::new(source).collect()
}
