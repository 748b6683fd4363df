//! Directive name table
//!
//! Directive names and their short aliases map to a [DirectiveKind]. The table is built once
//! and shared by every parse; names are matched after lowercasing and trimming.

use crate::chordpro::ast::{MetaField, ParagraphType};
use crate::chordpro::token::trim_delim;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// What a directive does to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    /// Append a metadata entry to the current song.
    Meta(MetaField),
    /// `{meta: name value}`: the field name travels in the argument.
    GenericMeta,
    /// Start a paragraph of the given type, labelled with the argument.
    Open(ParagraphType),
    /// End the current paragraph.
    Close(ParagraphType),
    /// A one-pair Comment paragraph holding the argument.
    InlineComment,
    NewSong,
    ChorusRef,
    Unknown,
}

static DIRECTIVES: Lazy<HashMap<&'static str, DirectiveKind>> = Lazy::new(|| {
    use DirectiveKind::*;

    let mut table = HashMap::new();
    let mut add = |names: &[&'static str], kind: DirectiveKind| {
        for name in names {
            table.insert(*name, kind);
        }
    };

    add(&["title", "t"], Meta(MetaField::Title));
    add(&["sorttitle"], Meta(MetaField::SortTitle));
    add(&["subtitle", "st"], Meta(MetaField::Subtitle));
    add(&["artist"], Meta(MetaField::Artist));
    add(&["composer"], Meta(MetaField::Composer));
    add(&["lyricist"], Meta(MetaField::Lyricist));
    add(&["copyright"], Meta(MetaField::Copyright));
    add(&["album"], Meta(MetaField::Album));
    add(&["year"], Meta(MetaField::Year));
    add(&["key"], Meta(MetaField::Key));
    add(&["time"], Meta(MetaField::Time));
    add(&["tempo"], Meta(MetaField::Tempo));
    add(&["duration"], Meta(MetaField::Duration));
    add(&["capo"], Meta(MetaField::Capo));
    add(&["meta"], GenericMeta);

    add(&["comment", "c"], InlineComment);
    add(&["new_song", "ns"], NewSong);
    add(&["chorus"], ChorusRef);

    add(&["sov", "start_of_verse"], Open(ParagraphType::Verse));
    add(&["eov", "end_of_verse"], Close(ParagraphType::Verse));
    add(&["sob", "start_of_bridge"], Open(ParagraphType::Bridge));
    add(&["eob", "end_of_bridge"], Close(ParagraphType::Bridge));
    add(&["soc", "start_of_chorus"], Open(ParagraphType::Chorus));
    add(&["eoc", "end_of_chorus"], Close(ParagraphType::Chorus));
    add(&["sot", "start_of_tab"], Open(ParagraphType::Tab));
    add(&["eot", "end_of_tab"], Close(ParagraphType::Tab));

    table
});

/// Look up a directive name. The name is lowercased and trimmed first.
pub fn lookup(name: &str) -> DirectiveKind {
    let name = name.trim().to_lowercase();
    DIRECTIVES
        .get(name.as_str())
        .copied()
        .unwrap_or(DirectiveKind::Unknown)
}

/// Split a raw directive token (`"{t: Title}"`) into its lowercased name and trimmed argument.
pub fn parse_directive(raw: &str) -> (String, &str) {
    let body = trim_delim(raw);
    match body.split_once(':') {
        Some((name, arg)) => (name.trim().to_lowercase(), arg.trim()),
        None => (body.trim().to_lowercase(), ""),
    }
}

/// Split a `meta` argument on its first space into field name and value.
pub fn split_meta(arg: &str) -> (&str, &str) {
    match arg.split_once(' ') {
        Some((name, value)) => (name, value.trim()),
        None => (arg, ""),
    }
}
