//! Song element definition
//!
//! A song owns its metadata entries, its paragraphs and, when the scan stopped inside it, the
//! lex error that stopped it. Metadata accessors follow first-match semantics: a second
//! `{title: ...}` is recorded but never shadows the first.

use super::meta::{all_values, first_value, MetaField, MetaItem};
use super::paragraph::Paragraph;
use crate::chordpro::lexing::LexError;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Song {
    pub(crate) meta: Vec<MetaItem>,
    pub(crate) paragraphs: Vec<Paragraph>,
    pub(crate) error: Option<LexError>,
}

impl Song {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_meta(mut self, field: MetaField, value: impl Into<String>) -> Self {
        self.meta.push(MetaItem::new(field, value));
        self
    }

    pub fn with_paragraphs(mut self, paragraphs: Vec<Paragraph>) -> Self {
        self.paragraphs = paragraphs;
        self
    }

    /// Raw metadata entries in the order they were read.
    pub fn meta(&self) -> &[MetaItem] {
        &self.meta
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// The fatal lex error recorded on this song, if the scan halted inside it.
    pub fn error(&self) -> Option<&LexError> {
        self.error.as_ref()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// First value of `field`, `""` when absent.
    pub fn meta_value(&self, field: MetaField) -> &str {
        first_value(&self.meta, field)
    }

    pub fn meta_values(&self, field: MetaField) -> Vec<&str> {
        all_values(&self.meta, field)
    }

    pub fn title(&self) -> &str {
        self.meta_value(MetaField::Title)
    }

    pub fn sort_title(&self) -> &str {
        self.meta_value(MetaField::SortTitle)
    }

    pub fn subtitle(&self) -> &str {
        self.meta_value(MetaField::Subtitle)
    }

    pub fn artist(&self) -> &str {
        self.meta_value(MetaField::Artist)
    }

    pub fn composer(&self) -> &str {
        self.meta_value(MetaField::Composer)
    }

    pub fn lyricist(&self) -> &str {
        self.meta_value(MetaField::Lyricist)
    }

    pub fn copyright(&self) -> &str {
        self.meta_value(MetaField::Copyright)
    }

    pub fn album(&self) -> &str {
        self.meta_value(MetaField::Album)
    }

    pub fn year(&self) -> &str {
        self.meta_value(MetaField::Year)
    }

    pub fn key(&self) -> &str {
        self.meta_value(MetaField::Key)
    }

    pub fn time(&self) -> &str {
        self.meta_value(MetaField::Time)
    }

    pub fn tempo(&self) -> &str {
        self.meta_value(MetaField::Tempo)
    }

    pub fn duration(&self) -> &str {
        self.meta_value(MetaField::Duration)
    }

    pub fn capo(&self) -> &str {
        self.meta_value(MetaField::Capo)
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Song({:?}, {} paragraphs)",
            self.title(),
            self.paragraphs.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_first_match() {
        let song = Song::new()
            .with_meta(MetaField::Title, "Title1")
            .with_meta(MetaField::Artist, "Artist1")
            .with_meta(MetaField::Title, "Title2")
            .with_meta(MetaField::SortTitle, "Sort1")
            .with_meta(MetaField::Album, "Album1")
            .with_meta(MetaField::Year, "1970");
        assert_eq!(song.title(), "Title1");
        assert_eq!(song.artist(), "Artist1");
        assert_eq!(song.sort_title(), "Sort1");
        assert_eq!(song.album(), "Album1");
        assert_eq!(song.year(), "1970");
        assert_eq!(song.subtitle(), "");
        assert_eq!(song.meta_values(MetaField::Title), vec!["Title1", "Title2"]);
        assert_eq!(song.meta().len(), 6);
    }

    #[test]
    fn test_remaining_accessors() {
        let song = Song::new()
            .with_meta(MetaField::Composer, "C")
            .with_meta(MetaField::Lyricist, "L")
            .with_meta(MetaField::Copyright, "(c)")
            .with_meta(MetaField::Key, "Am")
            .with_meta(MetaField::Time, "3/4")
            .with_meta(MetaField::Tempo, "90")
            .with_meta(MetaField::Duration, "3:20")
            .with_meta(MetaField::Capo, "2");
        assert_eq!(song.composer(), "C");
        assert_eq!(song.lyricist(), "L");
        assert_eq!(song.copyright(), "(c)");
        assert_eq!(song.key(), "Am");
        assert_eq!(song.time(), "3/4");
        assert_eq!(song.tempo(), "90");
        assert_eq!(song.duration(), "3:20");
        assert_eq!(song.capo(), "2");
    }

    #[test]
    fn test_empty_song_is_legal() {
        let song = Song::new();
        assert!(song.paragraphs().is_empty());
        assert!(!song.has_error());
        assert_eq!(song.to_string(), "Song(\"\", 0 paragraphs)");
    }
}
