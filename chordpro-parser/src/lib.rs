//! # chordpro
//!
//! A parser for ChordPro song sheets.
//!
//! The data flows one way: source text becomes a token stream, the token stream is folded into
//! a [`File`](chordpro::ast::File) tree, and formatters walk that tree.
//!
//! File Layout
//!
//! src/chordpro
//!   ├── token      Core (logos) lexemes and the semantic token set
//!   ├── lexing     Front-matter detection and the tokenizer state machine
//!   ├── ast        The document model: File → Song → Paragraph → Line → ChordLyricPair
//!   ├── building   Directive table and the document builder
//!   ├── parsing    Entry points and parse options
//!   ├── formats    Renderers (html, debug, json) and the format registry
//!   └── testing    Fluent assertions over parsed files
//!
//! For testing guidelines, see the [testing module](chordpro::testing).

pub mod chordpro;

pub use chordpro::ast::{ChordLyricPair, File, Line, MetaField, Paragraph, ParagraphType, Song};
pub use chordpro::parsing::{parse_text, parse_with, FrontmatterPolicy, ParseOptions};
