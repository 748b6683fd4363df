//! HTML-div chord sheet renderer
//!
//! Each song becomes one wrapper element; inside it every paragraph is one typed element:
//!
//!     chord-sheet          div
//!       verse / chorus / bridge   div, one row per line
//!         row              div
//!           column         span, one per chord/lyric pair
//!             chord        u
//!             lyrics       i
//!       tablature / comment       pre, lyrics only
//!       chorusref          div, literal "Chorus"
//!       error              div, the lex error message
//!
//! Chords are shown without their brackets and an empty lyric becomes `&nbsp;` so the chord
//! still sits on top of its column. A line break goes between two columns only when the
//! previous lyric ends in whitespace or the current one is empty, which keeps a word split by
//! a chord in one piece when the markup is wrapped.

use super::registry::{FormatError, Formatter};
use crate::chordpro::ast::{ChordLyricPair, File, Line, Paragraph, ParagraphType, Song};
use std::fmt::Write;

const CLASS_SONG: &str = "chord-sheet";
const CLASS_LINE: &str = "row";
const CLASS_PAIR: &str = "column";
const CLASS_CHORD: &str = "chord";
const CLASS_LYRIC: &str = "lyrics";
const CLASS_ERROR: &str = "error";

const NBSP: &str = "&nbsp;";

fn paragraph_class(kind: ParagraphType) -> &'static str {
    match kind {
        ParagraphType::Verse => "verse",
        ParagraphType::Comment => "comment",
        ParagraphType::Tab => "tablature",
        ParagraphType::Chorus => "chorus",
        ParagraphType::ChorusRef => "chorusref",
        ParagraphType::Bridge => "bridge",
    }
}

/// Escape text for element content.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn open_tag(out: &mut String, tag: &str, class: &str, newline: bool) {
    let _ = write!(out, "<{tag} class=\"{class}\">");
    if newline {
        out.push('\n');
    }
}

fn close_tag(out: &mut String, tag: &str, newline: bool) {
    let _ = write!(out, "</{tag}>");
    if newline {
        out.push('\n');
    }
}

fn write_pair(out: &mut String, pair: &ChordLyricPair, previous: Option<&ChordLyricPair>) {
    let lyric = pair.lyric().trim();

    if let Some(previous) = previous {
        if previous.lyric().ends_with(char::is_whitespace) || lyric.is_empty() {
            out.push('\n');
        }
    }

    open_tag(out, "span", CLASS_PAIR, false);
    open_tag(out, "u", CLASS_CHORD, false);
    out.push_str(&escape(pair.chord_name()));
    close_tag(out, "u", false);
    open_tag(out, "i", CLASS_LYRIC, false);
    if lyric.is_empty() {
        out.push_str(NBSP);
    } else {
        out.push_str(&escape(lyric));
    }
    close_tag(out, "i", false);
    close_tag(out, "span", false);
}

fn write_line(out: &mut String, line: &Line) {
    open_tag(out, "div", CLASS_LINE, true);
    let mut previous = None;
    for pair in line.pairs() {
        write_pair(out, pair, previous);
        previous = Some(pair);
    }
    close_tag(out, "div", true);
}

fn write_preformatted(out: &mut String, paragraph: &Paragraph) {
    open_tag(out, "pre", paragraph_class(paragraph.kind()), true);
    for line in paragraph.lines() {
        out.push_str(&escape(&line.lyrics()));
        out.push('\n');
    }
    close_tag(out, "pre", true);
}

fn write_paragraph(out: &mut String, paragraph: &Paragraph) {
    let class = paragraph_class(paragraph.kind());
    match paragraph.kind() {
        ParagraphType::Tab | ParagraphType::Comment => write_preformatted(out, paragraph),
        ParagraphType::ChorusRef => {
            open_tag(out, "div", class, false);
            out.push_str("Chorus");
            close_tag(out, "div", true);
        }
        ParagraphType::Verse | ParagraphType::Chorus | ParagraphType::Bridge => {
            open_tag(out, "div", class, true);
            for line in paragraph.lines() {
                write_line(out, line);
            }
            close_tag(out, "div", true);
        }
    }
}

/// HTML-div renderer. Front matter is not part of its output.
pub struct HtmlDivFormatter;

impl HtmlDivFormatter {
    /// Render one song, wrapper included.
    pub fn format_song(song: &Song) -> String {
        let mut out = String::new();
        open_tag(&mut out, "div", CLASS_SONG, true);
        for paragraph in song.paragraphs() {
            write_paragraph(&mut out, paragraph);
        }
        if let Some(error) = song.error() {
            open_tag(&mut out, "div", CLASS_ERROR, false);
            out.push_str(&escape(&error.to_string()));
            close_tag(&mut out, "div", false);
        }
        close_tag(&mut out, "div", false);
        let _ = writeln!(out, "<!-- /{CLASS_SONG} -->");
        out
    }
}

/// Render every song of a file, one wrapper after the other.
pub fn to_html_div_str(file: &File) -> String {
    file.songs()
        .iter()
        .map(HtmlDivFormatter::format_song)
        .collect()
}

impl Formatter for HtmlDivFormatter {
    fn name(&self) -> &str {
        "html"
    }

    fn serialize(&self, file: &File) -> Result<String, FormatError> {
        Ok(to_html_div_str(file))
    }

    fn description(&self) -> &str {
        "Chord sheet as nested HTML div elements"
    }
}
