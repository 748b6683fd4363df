//! Paragraph element definition
//!
//! A paragraph is a typed block of lines. Verse is the default type, the others come from
//! structural directives (`{soc}`, `{sob}`, `{sot}`, `{c: ...}`, `{chorus}`).

use super::line::Line;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ParagraphType {
    #[default]
    Verse,
    Comment,
    Tab,
    Chorus,
    /// "Repeat the chorus here". Carries no lines.
    ChorusRef,
    Bridge,
}

impl ParagraphType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParagraphType::Verse => "Verse",
            ParagraphType::Comment => "Comment",
            ParagraphType::Tab => "Tab",
            ParagraphType::Chorus => "Chorus",
            ParagraphType::ChorusRef => "ChorusRef",
            ParagraphType::Bridge => "Bridge",
        }
    }

    /// Tab and Comment paragraphs are shown as preformatted text, lyrics only.
    pub fn is_preformatted(&self) -> bool {
        matches!(self, ParagraphType::Tab | ParagraphType::Comment)
    }
}

impl fmt::Display for ParagraphType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    pub(crate) kind: ParagraphType,
    pub(crate) label: String,
    pub(crate) lines: Vec<Line>,
}

impl Paragraph {
    pub fn new(kind: ParagraphType, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            lines: Vec::new(),
        }
    }

    pub fn with_lines(mut self, lines: Vec<Line>) -> Self {
        self.lines = lines;
        self
    }

    pub fn kind(&self) -> ParagraphType {
        self.kind
    }

    /// Argument of the start directive, `""` when none was given.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Lyrics of every line joined with `\n`.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(Line::lyrics)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Paragraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({} lines)", self.kind, self.lines.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chordpro::ast::ChordLyricPair;

    #[test]
    fn test_paragraph_creation() {
        let para = Paragraph::new(ParagraphType::Chorus, "Refrain").with_lines(vec![
            Line::new(vec![ChordLyricPair::new("[F]", "chorus 1")]),
            Line::new(vec![ChordLyricPair::new("", "chorus 2")]),
        ]);
        assert_eq!(para.kind(), ParagraphType::Chorus);
        assert_eq!(para.label(), "Refrain");
        assert_eq!(para.text(), "chorus 1\nchorus 2");
        assert_eq!(para.to_string(), "Chorus(2 lines)");
    }

    #[test]
    fn test_default_is_verse() {
        assert_eq!(Paragraph::default().kind(), ParagraphType::Verse);
    }

    #[test]
    fn test_preformatted_types() {
        assert!(ParagraphType::Tab.is_preformatted());
        assert!(ParagraphType::Comment.is_preformatted());
        assert!(!ParagraphType::Verse.is_preformatted());
        assert!(!ParagraphType::ChorusRef.is_preformatted());
    }
}
