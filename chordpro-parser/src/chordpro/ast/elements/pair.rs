//! Chord / lyric pair, the atomic unit of rendering

use crate::chordpro::token::trim_delim;
use serde::Serialize;

/// A chord annotation and the lyric text it precedes.
///
/// The chord keeps its brackets (`"[C]"`); either side may be empty. Lyric whitespace is kept
/// as written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChordLyricPair {
    pub(crate) chord: String,
    pub(crate) lyric: String,
}

impl ChordLyricPair {
    pub fn new(chord: impl Into<String>, lyric: impl Into<String>) -> Self {
        Self {
            chord: chord.into(),
            lyric: lyric.into(),
        }
    }

    pub fn chord(&self) -> &str {
        &self.chord
    }

    /// The chord without its brackets.
    pub fn chord_name(&self) -> &str {
        trim_delim(&self.chord)
    }

    pub fn lyric(&self) -> &str {
        &self.lyric
    }
}
