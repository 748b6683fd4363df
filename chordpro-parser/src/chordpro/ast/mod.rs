//! Document Model
//!
//!     The tree the builder produces and renderers consume. Ownership is strict: a File owns
//!     its Songs, a Song its Paragraphs, a Paragraph its Lines, a Line its Pairs. Nothing points
//!     back up; the "currently open" nodes live in the builder's cursor, not here.
//!
//!     Fields are crate-private and the tree is read through accessors, so a parsed File is
//!     never mutated after the builder hands it over.

pub mod elements;

pub use elements::{
    ChordLyricPair, File, Line, MetaField, MetaItem, Paragraph, ParagraphType, Song,
};
