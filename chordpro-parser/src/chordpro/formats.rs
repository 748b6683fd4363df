//! Output format implementations for parsed song sheets
//!
//! This module contains the renderers that walk a parsed [File](crate::chordpro::ast::File):
//! - html: the HTML-div chord sheet, one wrapper per song
//! - debug: an indented tree dump, one node per line
//! - json: the whole tree through serde
//! - song_frontmatter: a YAML front-matter block built from song metadata

pub mod debug;
pub mod html;
pub mod json;
pub mod registry;
pub mod song_frontmatter;

pub use debug::{to_debug_str, DebugFormatter};
pub use html::{to_html_div_str, HtmlDivFormatter};
pub use json::JsonFormatter;
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use song_frontmatter::song_frontmatter;
