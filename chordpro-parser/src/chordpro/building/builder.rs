//! The document builder
//!
//!     The builder keeps one cursor: how deep the currently open context goes. Because the tree
//!     is append-only, the open Song is always the last song, the open Paragraph the last
//!     paragraph of that song, and so on, so depth is all the cursor needs to store.
//!
//!     Every append goes through `ensure_open`, which opens the missing levels top-down
//!     (Song, then Paragraph, then Line, then Pair). Closing a level closes everything below it.
//!
//!     A fatal lex error is stored on the open Song (one is created if needed) and the builder
//!     stops accepting tokens. Everything built so far is kept.

use super::directives::{self, DirectiveKind};
use crate::chordpro::ast::{
    ChordLyricPair, File, Line, MetaField, MetaItem, Paragraph, ParagraphType, Song,
};
use crate::chordpro::lexing::LexError;
use crate::chordpro::token::Token;
use std::ops::Range;
use tracing::{debug, warn};

/// Nesting levels of the tree, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Level {
    Song,
    Paragraph,
    Line,
    Pair,
}

impl Level {
    fn parent(self) -> Option<Level> {
        match self {
            Level::Song => None,
            Level::Paragraph => Some(Level::Song),
            Level::Line => Some(Level::Paragraph),
            Level::Pair => Some(Level::Line),
        }
    }

    fn child(self) -> Option<Level> {
        match self {
            Level::Song => Some(Level::Paragraph),
            Level::Paragraph => Some(Level::Line),
            Level::Line => Some(Level::Pair),
            Level::Pair => None,
        }
    }
}

/// Folds semantic tokens into a [File].
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    frontmatter: String,
    songs: Vec<Song>,
    /// Deepest open level. `None` when nothing is open.
    depth: Option<Level>,
    /// Chords are kept as literal lyric text while set.
    raw: bool,
    halted: bool,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a whole token stream through a fresh builder.
    pub fn build<I>(tokens: I) -> File
    where
        I: IntoIterator<Item = Result<(Token, Range<usize>), LexError>>,
    {
        let mut builder = Self::new();
        builder.feed(tokens);
        builder.finish()
    }

    /// Push every token of a stream, stopping at the first error.
    pub fn feed<I>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = Result<(Token, Range<usize>), LexError>>,
    {
        for item in tokens {
            match item {
                Ok((token, _)) => self.push(token),
                Err(err) => self.fail(err),
            }
            if self.halted {
                break;
            }
        }
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Override the front matter recorded so far.
    pub fn set_frontmatter(&mut self, text: impl Into<String>) {
        self.frontmatter = text.into();
    }

    /// Apply one token to the tree. Ignored once the builder has halted.
    pub fn push(&mut self, token: Token) {
        if self.halted {
            return;
        }

        match token {
            Token::Frontmatter(text) => self.frontmatter = text,
            Token::Text(text) => self.append_lyric(&text),
            Token::Chord(chord) => self.chord(chord),
            Token::Directive(raw) => self.directive(&raw),
            Token::Newline { run, .. } => self.newline(run),
            // informational only
            Token::Comment(_) => {}
        }
    }

    /// Record a fatal lex error on the open song and stop.
    pub fn fail(&mut self, error: LexError) {
        if self.halted {
            return;
        }
        warn!(%error, "scan halted");
        self.ensure_open(Level::Song);
        if let Some(song) = self.songs.last_mut() {
            song.error = Some(error);
        }
        self.halted = true;
    }

    pub fn finish(self) -> File {
        File {
            frontmatter: self.frontmatter,
            songs: self.songs,
        }
    }

    // ========================================================================
    // CURSOR
    // ========================================================================

    fn ensure_open(&mut self, level: Level) {
        while self.depth < Some(level) {
            let next = match self.depth {
                None => Level::Song,
                Some(current) => match current.child() {
                    Some(child) => child,
                    None => return,
                },
            };
            self.open(next);
        }
    }

    /// Append a fresh node at `level`. The parent level must be open.
    fn open(&mut self, level: Level) {
        match level {
            Level::Song => {
                self.songs.push(Song::new());
                debug!(song = self.songs.len(), "song opened");
            }
            Level::Paragraph => {
                if let Some(song) = self.songs.last_mut() {
                    song.paragraphs.push(Paragraph::default());
                }
            }
            Level::Line => {
                if let Some(paragraph) = self.paragraph_mut() {
                    paragraph.lines.push(Line::default());
                }
            }
            Level::Pair => {
                if let Some(line) = self.line_mut() {
                    line.pairs.push(ChordLyricPair::default());
                }
            }
        }
        self.depth = Some(level);
    }

    /// Close `level` and everything below it.
    fn close(&mut self, level: Level) {
        if self.depth >= Some(level) {
            self.depth = level.parent();
        }
        if level <= Level::Paragraph {
            self.raw = false;
        }
    }

    fn open_paragraph(&mut self, kind: ParagraphType, label: &str) {
        self.ensure_open(Level::Song);
        self.close(Level::Paragraph);
        self.open(Level::Paragraph);
        if let Some(paragraph) = self.paragraph_mut() {
            paragraph.kind = kind;
            paragraph.label = label.to_string();
        }
        debug!(%kind, label, "paragraph opened");
    }

    fn new_song(&mut self) {
        self.close(Level::Song);
        self.open(Level::Song);
    }

    fn open_paragraph_kind(&self) -> Option<ParagraphType> {
        if self.depth >= Some(Level::Paragraph) {
            self.songs
                .last()
                .and_then(|song| song.paragraphs.last())
                .map(|paragraph| paragraph.kind)
        } else {
            None
        }
    }

    fn paragraph_mut(&mut self) -> Option<&mut Paragraph> {
        self.songs.last_mut()?.paragraphs.last_mut()
    }

    fn line_mut(&mut self) -> Option<&mut Line> {
        self.paragraph_mut()?.lines.last_mut()
    }

    fn pair_mut(&mut self) -> Option<&mut ChordLyricPair> {
        self.line_mut()?.pairs.last_mut()
    }

    // ========================================================================
    // TOKENS
    // ========================================================================

    fn append_lyric(&mut self, text: &str) {
        self.ensure_open(Level::Pair);
        if let Some(pair) = self.pair_mut() {
            pair.lyric.push_str(text);
        }
    }

    fn chord(&mut self, chord: String) {
        if self.raw {
            self.append_lyric(&chord);
            return;
        }
        self.ensure_open(Level::Line);
        self.close(Level::Pair);
        self.open(Level::Pair);
        if let Some(pair) = self.pair_mut() {
            pair.chord = chord;
        }
    }

    fn newline(&mut self, run: usize) {
        match self.open_paragraph_kind() {
            Some(ParagraphType::Tab) => {
                // blank rows inside a tab block become empty lines
                if run > 1 {
                    self.close(Level::Line);
                    self.open(Level::Line);
                }
                self.close(Level::Line);
            }
            _ => {
                self.close(Level::Line);
                if run == 2 {
                    self.close(Level::Paragraph);
                }
            }
        }
    }

    fn directive(&mut self, raw: &str) {
        let (name, arg) = directives::parse_directive(raw);

        match directives::lookup(&name) {
            DirectiveKind::Meta(field) => self.add_meta(field, arg.to_string()),
            DirectiveKind::GenericMeta => {
                let (field_name, value) = directives::split_meta(arg);
                match directives::lookup(field_name) {
                    DirectiveKind::Meta(field) => self.add_meta(field, value.to_string()),
                    _ => {
                        debug!(field = field_name, "invalid meta field");
                        self.add_meta(MetaField::Invalid, format!("{field_name}: {value}"));
                    }
                }
            }
            DirectiveKind::InlineComment => {
                self.open_paragraph(ParagraphType::Comment, "");
                self.append_lyric(arg);
                self.close(Level::Paragraph);
            }
            DirectiveKind::NewSong => self.new_song(),
            DirectiveKind::Open(kind) => {
                self.open_paragraph(kind, arg);
                if kind == ParagraphType::Tab {
                    self.raw = true;
                }
            }
            DirectiveKind::Close(_) => self.close(Level::Paragraph),
            DirectiveKind::ChorusRef => {
                self.open_paragraph(ParagraphType::ChorusRef, arg);
                self.close(Level::Paragraph);
            }
            DirectiveKind::Unknown => debug!(directive = raw, "unknown directive ignored"),
        }
    }

    fn add_meta(&mut self, field: MetaField, value: String) {
        self.ensure_open(Level::Song);
        if let Some(song) = self.songs.last_mut() {
            song.meta.push(MetaItem { field, value });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chordpro::lexing::{Position, Tokenizer};

    fn build(source: &str) -> File {
        DocumentBuilder::build(Tokenizer::new(source))
    }

    fn pairs(line: &Line) -> Vec<(&str, &str)> {
        line.pairs().iter().map(|p| (p.chord(), p.lyric())).collect()
    }

    #[test]
    fn test_empty_input_has_no_songs() {
        assert!(build("").songs().is_empty());
    }

    #[test]
    fn test_chord_then_lyric() {
        let file = build("[C]do");
        assert_eq!(file.songs().len(), 1);
        let song = &file.songs()[0];
        assert_eq!(song.paragraphs().len(), 1);
        let par = &song.paragraphs()[0];
        assert_eq!(par.kind(), ParagraphType::Verse);
        assert_eq!(par.lines().len(), 1);
        assert_eq!(pairs(&par.lines()[0]), vec![("[C]", "do")]);
    }

    #[test]
    fn test_text_before_first_chord_gets_empty_chord() {
        let file = build("la [G]la");
        let line = &file.songs()[0].paragraphs()[0].lines()[0];
        assert_eq!(pairs(line), vec![("", "la "), ("[G]", "la")]);
    }

    #[test]
    fn test_single_newline_closes_line_only() {
        let file = build("a\nb");
        let par = &file.songs()[0].paragraphs()[0];
        assert_eq!(file.songs()[0].paragraphs().len(), 1);
        assert_eq!(par.lines().len(), 2);
    }

    #[test]
    fn test_blank_line_closes_paragraph() {
        let file = build("a\n\nb");
        assert_eq!(file.songs()[0].paragraphs().len(), 2);
    }

    #[test]
    fn test_extra_blank_lines_do_not_open_paragraphs() {
        let file = build("a\n\n\n\n\nb");
        assert_eq!(file.songs()[0].paragraphs().len(), 2);
    }

    #[test]
    fn test_leading_newlines_create_nothing() {
        let file = build("\n\n\n[C]a");
        assert_eq!(file.songs().len(), 1);
        assert_eq!(file.songs()[0].paragraphs().len(), 1);
    }

    #[test]
    fn test_meta_first_match() {
        let file = build("{title: A}\n{t: B}\n");
        let song = &file.songs()[0];
        assert_eq!(song.title(), "A");
        assert_eq!(song.meta_values(MetaField::Title), vec!["A", "B"]);
        assert!(song.paragraphs().is_empty());
    }

    #[test]
    fn test_generic_meta() {
        let file = build("{meta: album Greatest Hits}{meta: Year 1999}");
        let song = &file.songs()[0];
        assert_eq!(song.album(), "Greatest Hits");
        assert_eq!(song.year(), "1999");
    }

    #[test]
    fn test_invalid_meta_is_kept() {
        let file = build("{meta: invalid}{meta}{meta: mood happy}");
        let song = &file.songs()[0];
        assert_eq!(
            song.meta_values(MetaField::Invalid),
            vec!["invalid: ", ": ", "mood: happy"]
        );
    }

    #[test]
    fn test_unknown_directive_ignored() {
        let file = build("{x_foo: bar}");
        assert!(file.songs().is_empty());
    }

    #[test]
    fn test_new_song() {
        let file = build("[C]one\n{ns}\n[D]two");
        assert_eq!(file.songs().len(), 2);
        assert_eq!(file.songs()[0].paragraphs()[0].text(), "one");
        assert_eq!(file.songs()[1].paragraphs()[0].text(), "two");
    }

    #[test]
    fn test_inline_comment() {
        let file = build("[C]a\n{c:  watch out  }\nb");
        let pars = file.songs()[0].paragraphs();
        assert_eq!(pars.len(), 3);
        assert_eq!(pars[1].kind(), ParagraphType::Comment);
        assert_eq!(pars[1].lines().len(), 1);
        assert_eq!(pairs(&pars[1].lines()[0]), vec![("", "watch out")]);
        assert_eq!(pars[2].kind(), ParagraphType::Verse);
    }

    #[test]
    fn test_chorus_label_and_ref() {
        let file = build("{soc: Refrain}\nla\n{eoc}\n{chorus}");
        let pars = file.songs()[0].paragraphs();
        assert_eq!(pars.len(), 2);
        assert_eq!(pars[0].kind(), ParagraphType::Chorus);
        assert_eq!(pars[0].label(), "Refrain");
        assert_eq!(pars[1].kind(), ParagraphType::ChorusRef);
        assert!(pars[1].lines().is_empty());
    }

    #[test]
    fn test_tab_keeps_chords_literal_and_blank_rows() {
        let file = build("{sot}\ne|--[A]--|\n\nB|-----|\n{eot}\n[C]x");
        let pars = file.songs()[0].paragraphs();
        assert_eq!(pars[0].kind(), ParagraphType::Tab);
        let lines: Vec<String> = pars[0].lines().iter().map(Line::lyrics).collect();
        assert_eq!(lines, vec!["e|--[A]--|", "", "B|-----|"]);
        assert_eq!(pars[1].kind(), ParagraphType::Verse);
        assert_eq!(pairs(&pars[1].lines()[0]), vec![("[C]", "x")]);
    }

    #[test]
    fn test_tab_not_closed_by_blank_lines() {
        let file = build("{sot}\na\n\n\nb");
        let pars = file.songs()[0].paragraphs();
        assert_eq!(pars.len(), 1);
        assert_eq!(pars[0].kind(), ParagraphType::Tab);
    }

    #[test]
    fn test_lex_error_recorded_and_partial_tree_kept() {
        let file = build("[C]do\n{ns}\n[G]re [Am");
        assert_eq!(file.songs().len(), 2);
        assert!(file.songs()[0].error().is_none());
        let song = &file.songs()[1];
        assert_eq!(song.paragraphs()[0].text(), "re ");
        assert_eq!(
            song.error(),
            Some(&LexError::UnterminatedChord {
                fragment: "[Am".to_string(),
                position: Position::new(3, 7),
            })
        );
    }

    #[test]
    fn test_lex_error_halts_following_songs() {
        let file = build("[C]a\n[G\n{ns}\n[D]later");
        assert_eq!(file.songs().len(), 1);
        assert!(file.songs()[0].has_error());
    }

    #[test]
    fn test_lex_error_on_empty_tree_creates_song() {
        let mut builder = DocumentBuilder::new();
        builder.fail(LexError::UnterminatedDirective {
            fragment: "{".to_string(),
            position: Position::new(1, 1),
        });
        assert!(builder.is_halted());
        builder.push(Token::Text("ignored".to_string()));
        let file = builder.finish();
        assert_eq!(file.songs().len(), 1);
        assert!(file.songs()[0].paragraphs().is_empty());
    }

    #[test]
    fn test_frontmatter_token() {
        let file = build("---\na: 1\n---\n[C]x");
        assert_eq!(file.frontmatter(), "---\na: 1\n---\n");
        assert_eq!(file.songs().len(), 1);
    }
}
