//! Testing utilities for tree assertions
//!
//!     Checking a parsed song by hand means indexing four levels deep and matching on every
//!     step, which buries what the test is about. The fluent API walks the tree instead:
//!
//!     ```rust-example
//!     use chordpro_parser::chordpro::testing::assert_file;
//!
//!     let file = parse_text("{t: Imagine}\n[C]Imagine [F]there's no heaven");
//!     assert_file(&file)
//!         .song_count(1)
//!         .song(0, |song| {
//!             song.title("Imagine")
//!                 .paragraph_count(1)
//!                 .paragraph(0, |par| {
//!                     par.kind(ParagraphType::Verse).line(0, |line| {
//!                         line.pair(0, "[C]", "Imagine ").pair(1, "[F]", "there's no heaven");
//!                     });
//!                 });
//!         });
//!     ```
//!
//!     Failure messages carry the path to the node that failed, e.g.
//!     `songs[0].paragraphs[1].lines[0].pairs[2].lyric: Expected text to be ...`.

mod assertions;
mod matchers;

pub use assertions::{FileAssertion, LineAssertion, ParagraphAssertion, SongAssertion};
pub use matchers::TextMatch;

use crate::chordpro::ast::File;

/// Create an assertion builder for a parsed file
pub fn assert_file(file: &File) -> FileAssertion<'_> {
    FileAssertion { file }
}
