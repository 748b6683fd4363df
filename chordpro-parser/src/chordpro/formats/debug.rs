//! Debug tree dump
//!
//! One node per line, two spaces of indentation per level of nesting:
//!
//!     FRONTMATTER
//!     <front matter text>
//!
//!     SONGS: count=1
//!       SONG 1
//!         META
//!           title: Come Together
//!         PAR 1 <Verse>
//!           LINE 1
//!             PAIR 1: [Dm] / Here come old flat top
//!         ERROR: unterminated chord "[G" at line 9, column 1
//!
//! Chords keep their brackets and lyrics are printed verbatim, so the dump shows exactly what
//! the builder produced. Indices are 1-based.

use super::registry::{FormatError, Formatter};
use crate::chordpro::ast::{File, Line, Paragraph, Song};
use std::fmt::Write;

const PAD: &str = "  ";

fn write_line(out: &mut String, line: &Line, index: usize, pad: &str) {
    let _ = writeln!(out, "{pad}LINE {index}");
    for (i, pair) in line.pairs().iter().enumerate() {
        let _ = writeln!(
            out,
            "{pad}{PAD}PAIR {}: {} / {}",
            i + 1,
            pair.chord(),
            pair.lyric()
        );
    }
}

fn write_paragraph(out: &mut String, paragraph: &Paragraph, index: usize, pad: &str) {
    let _ = writeln!(out, "{pad}PAR {index} <{}>", paragraph.kind());
    let inner = format!("{pad}{PAD}");
    for (i, line) in paragraph.lines().iter().enumerate() {
        write_line(out, line, i + 1, &inner);
    }
}

fn write_song(out: &mut String, song: &Song, index: usize, pad: &str) {
    let _ = writeln!(out, "{pad}SONG {index}");
    let inner = format!("{pad}{PAD}");

    if !song.meta().is_empty() {
        let _ = writeln!(out, "{inner}META");
        for item in song.meta() {
            let _ = writeln!(out, "{inner}{PAD}{}: {}", item.field(), item.value());
        }
    }

    for (i, paragraph) in song.paragraphs().iter().enumerate() {
        write_paragraph(out, paragraph, i + 1, &inner);
    }

    if let Some(error) = song.error() {
        let _ = writeln!(out, "{inner}ERROR: {error}");
    }
}

pub fn to_debug_str(file: &File) -> String {
    let mut out = String::new();
    if file.has_frontmatter() {
        let _ = writeln!(out, "FRONTMATTER\n{}", file.frontmatter());
    }
    let _ = writeln!(out, "SONGS: count={}", file.songs().len());
    for (i, song) in file.songs().iter().enumerate() {
        write_song(&mut out, song, i + 1, PAD);
    }
    out
}

/// Formatter implementation for the debug dump
pub struct DebugFormatter;

impl Formatter for DebugFormatter {
    fn name(&self) -> &str {
        "debug"
    }

    fn serialize(&self, file: &File) -> Result<String, FormatError> {
        Ok(to_debug_str(file))
    }

    fn description(&self) -> &str {
        "Indented tree dump, one node per line"
    }
}
