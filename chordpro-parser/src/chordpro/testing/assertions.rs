//! Fluent assertions, one type per tree level
//!
//! Every assertion carries a context path (`songs[0].paragraphs[1].lines[0]`) that prefixes
//! failure messages, so a failing check in a deep chain still says where it looked.

use super::matchers::TextMatch;
use crate::chordpro::ast::{File, Line, MetaField, Paragraph, ParagraphType, Song};

fn summarize_paragraphs(paragraphs: &[Paragraph]) -> String {
    paragraphs
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// File
// ============================================================================

pub struct FileAssertion<'a> {
    pub(crate) file: &'a File,
}

impl<'a> FileAssertion<'a> {
    pub fn song_count(self, expected: usize) -> Self {
        let actual = self.file.songs().len();
        assert_eq!(
            actual, expected,
            "Expected {expected} songs, found {actual} songs"
        );
        self
    }

    pub fn frontmatter(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(self.file.frontmatter(), "frontmatter");
        self
    }

    pub fn no_frontmatter(self) -> Self {
        self.frontmatter("")
    }

    /// Assert on a specific song by index
    pub fn song<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(SongAssertion<'a>),
    {
        let songs = self.file.songs();
        assert!(
            index < songs.len(),
            "Song index {index} out of bounds (file has {} songs)",
            songs.len()
        );
        assertion(SongAssertion {
            song: &songs[index],
            context: format!("songs[{index}]"),
        });
        self
    }
}

// ============================================================================
// Song
// ============================================================================

pub struct SongAssertion<'a> {
    pub(crate) song: &'a Song,
    pub(crate) context: String,
}

impl<'a> SongAssertion<'a> {
    pub fn title(self, expected: &str) -> Self {
        self.meta(MetaField::Title, expected)
    }

    pub fn artist(self, expected: &str) -> Self {
        self.meta(MetaField::Artist, expected)
    }

    /// First value of `field`
    pub fn meta(self, field: MetaField, expected: &str) -> Self {
        let context = format!("{}.{field}", self.context);
        TextMatch::Exact(expected.to_string()).assert(self.song.meta_value(field), &context);
        self
    }

    /// Every value of `field`, in order
    pub fn meta_values(self, field: MetaField, expected: &[&str]) -> Self {
        let actual = self.song.meta_values(field);
        assert_eq!(
            actual, expected,
            "{}: Expected {field} values {expected:?}, found {actual:?}",
            self.context
        );
        self
    }

    pub fn meta_count(self, expected: usize) -> Self {
        let actual = self.song.meta().len();
        assert_eq!(
            actual, expected,
            "{}: Expected {expected} meta entries, found {actual}",
            self.context
        );
        self
    }

    pub fn paragraph_count(self, expected: usize) -> Self {
        let actual = self.song.paragraphs().len();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {expected} paragraphs, found {actual}: [{}]",
            self.context,
            summarize_paragraphs(self.song.paragraphs())
        );
        self
    }

    pub fn paragraph<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ParagraphAssertion<'a>),
    {
        let paragraphs = self.song.paragraphs();
        assert!(
            index < paragraphs.len(),
            "{}: Paragraph index {index} out of bounds (song has {} paragraphs)",
            self.context,
            paragraphs.len()
        );
        assertion(ParagraphAssertion {
            para: &paragraphs[index],
            context: format!("{}.paragraphs[{index}]", self.context),
        });
        self
    }

    pub fn no_error(self) -> Self {
        assert!(
            self.song.error().is_none(),
            "{}: Expected no error, found {:?}",
            self.context,
            self.song.error()
        );
        self
    }

    pub fn error_contains(self, substring: &str) -> Self {
        let message = match self.song.error() {
            Some(error) => error.to_string(),
            None => panic!("{}: Expected an error, found none", self.context),
        };
        TextMatch::Contains(substring.to_string()).assert(&message, &self.context);
        self
    }
}

// ============================================================================
// Paragraph
// ============================================================================

pub struct ParagraphAssertion<'a> {
    pub(crate) para: &'a Paragraph,
    pub(crate) context: String,
}

impl<'a> ParagraphAssertion<'a> {
    pub fn kind(self, expected: ParagraphType) -> Self {
        let actual = self.para.kind();
        assert_eq!(
            actual, expected,
            "{}: Expected {expected} paragraph, found {actual}",
            self.context
        );
        self
    }

    pub fn label(self, expected: &str) -> Self {
        let context = format!("{}.label", self.context);
        TextMatch::Exact(expected.to_string()).assert(self.para.label(), &context);
        self
    }

    /// Lyrics of all lines joined with `\n`
    pub fn text(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.para.text(), &self.context);
        self
    }

    pub fn text_contains(self, substring: &str) -> Self {
        TextMatch::Contains(substring.to_string()).assert(&self.para.text(), &self.context);
        self
    }

    pub fn line_count(self, expected: usize) -> Self {
        let actual = self.para.lines().len();
        assert_eq!(
            actual, expected,
            "{}: Expected {expected} lines, found {actual} lines",
            self.context
        );
        self
    }

    pub fn line<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(LineAssertion<'a>),
    {
        let lines = self.para.lines();
        assert!(
            index < lines.len(),
            "{}: Line index {index} out of bounds (paragraph has {} lines)",
            self.context,
            lines.len()
        );
        assertion(LineAssertion {
            line: &lines[index],
            context: format!("{}.lines[{index}]", self.context),
        });
        self
    }
}

// ============================================================================
// Line
// ============================================================================

pub struct LineAssertion<'a> {
    pub(crate) line: &'a Line,
    pub(crate) context: String,
}

impl LineAssertion<'_> {
    pub fn pair_count(self, expected: usize) -> Self {
        let actual = self.line.pairs().len();
        assert_eq!(
            actual, expected,
            "{}: Expected {expected} pairs, found {actual}",
            self.context
        );
        self
    }

    /// Chord (brackets included) and lyric of one pair
    pub fn pair(self, index: usize, chord: &str, lyric: &str) -> Self {
        let pairs = self.line.pairs();
        assert!(
            index < pairs.len(),
            "{}: Pair index {index} out of bounds (line has {} pairs)",
            self.context,
            pairs.len()
        );
        let pair = &pairs[index];
        let context = format!("{}.pairs[{index}]", self.context);
        TextMatch::Exact(chord.to_string()).assert(pair.chord(), &format!("{context}.chord"));
        TextMatch::Exact(lyric.to_string()).assert(pair.lyric(), &format!("{context}.lyric"));
        self
    }

    pub fn lyrics(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.line.lyrics(), &self.context);
        self
    }
}
