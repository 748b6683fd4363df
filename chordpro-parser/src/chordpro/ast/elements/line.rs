//! Line element definition

use super::pair::ChordLyricPair;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Line {
    pub(crate) pairs: Vec<ChordLyricPair>,
}

impl Line {
    pub fn new(pairs: Vec<ChordLyricPair>) -> Self {
        Self { pairs }
    }

    pub fn pairs(&self) -> &[ChordLyricPair] {
        &self.pairs
    }

    /// All lyrics of the line, chords dropped.
    pub fn lyrics(&self) -> String {
        self.pairs.iter().map(|p| p.lyric.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
