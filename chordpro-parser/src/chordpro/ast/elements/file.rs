//! File element definition, the root of the tree

use super::song::Song;
use serde::Serialize;

/// A parsed source: the opaque front-matter block, if any, and its songs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct File {
    pub(crate) frontmatter: String,
    pub(crate) songs: Vec<Song>,
}

impl File {
    pub fn new(frontmatter: impl Into<String>, songs: Vec<Song>) -> Self {
        Self {
            frontmatter: frontmatter.into(),
            songs,
        }
    }

    /// Front-matter text with both fences, `""` when none was found.
    pub fn frontmatter(&self) -> &str {
        &self.frontmatter
    }

    pub fn has_frontmatter(&self) -> bool {
        !self.frontmatter.is_empty()
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// First lex error found in any song.
    pub fn error(&self) -> Option<&crate::chordpro::lexing::LexError> {
        self.songs.iter().find_map(Song::error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file() {
        let file = File::default();
        assert!(!file.has_frontmatter());
        assert!(file.songs().is_empty());
        assert!(file.error().is_none());
    }

    #[test]
    fn test_file_with_frontmatter() {
        let file = File::new("---\na: 1\n---\n", vec![Song::new()]);
        assert!(file.has_frontmatter());
        assert_eq!(file.songs().len(), 1);
    }
}
