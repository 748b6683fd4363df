//! Front matter generated from song metadata
//!
//! Static site generators read a fenced YAML block at the top of a page. When a source has no
//! front matter of its own, one is built from the song: `title` is always written, `artist`
//! falls back to the subtitle, and `album` and `year` are written only when set.

use super::registry::FormatError;
use crate::chordpro::ast::Song;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct SongFrontmatter<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    artist: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    album: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    year: &'a str,
}

impl<'a> SongFrontmatter<'a> {
    fn from_song(song: &'a Song) -> Self {
        let artist = match song.artist() {
            "" => song.subtitle(),
            artist => artist,
        };
        Self {
            title: song.title(),
            artist,
            album: song.album(),
            year: song.year(),
        }
    }
}

/// YAML front matter for `song`, both `---` fences included.
pub fn song_frontmatter(song: &Song) -> Result<String, FormatError> {
    let body = serde_yaml::to_string(&SongFrontmatter::from_song(song))
        .map_err(|e| FormatError::Serialization(e.to_string()))?;
    Ok(format!("---\n{body}---\n"))
}
