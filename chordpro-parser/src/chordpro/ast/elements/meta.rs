//! Song metadata entries
//!
//! Each song can have metadata associated, for example the song title. Metadata are mostly used by
//! programs that help organizing collections of songs. Entries keep their insertion order and
//! duplicates are allowed; lookups return the first value recorded for a field.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaField {
    /// A `meta` directive naming a field this parser does not know. The value keeps the raw
    /// field name as a prefix (`"name: value"`) so nothing is lost.
    Invalid,
    Title,
    SortTitle,
    Subtitle,
    Artist,
    Composer,
    Lyricist,
    Copyright,
    Album,
    Year,
    Key,
    Time,
    Tempo,
    Duration,
    Capo,
}

impl MetaField {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetaField::Invalid => "invalid",
            MetaField::Title => "title",
            MetaField::SortTitle => "sorttitle",
            MetaField::Subtitle => "subtitle",
            MetaField::Artist => "artist",
            MetaField::Composer => "composer",
            MetaField::Lyricist => "lyricist",
            MetaField::Copyright => "copyright",
            MetaField::Album => "album",
            MetaField::Year => "year",
            MetaField::Key => "key",
            MetaField::Time => "time",
            MetaField::Tempo => "tempo",
            MetaField::Duration => "duration",
            MetaField::Capo => "capo",
        }
    }
}

impl fmt::Display for MetaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One metadata entry: a field tag and its raw value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaItem {
    pub(crate) field: MetaField,
    pub(crate) value: String,
}

impl MetaItem {
    pub fn new(field: MetaField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    pub fn field(&self) -> MetaField {
        self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// First value recorded for `field`, or `""`.
pub(crate) fn first_value(items: &[MetaItem], field: MetaField) -> &str {
    items
        .iter()
        .find(|item| item.field == field)
        .map(|item| item.value.as_str())
        .unwrap_or("")
}

/// Every value recorded for `field`, in insertion order.
pub(crate) fn all_values(items: &[MetaItem], field: MetaField) -> Vec<&str> {
    items
        .iter()
        .filter(|item| item.field == field)
        .map(|item| item.value.as_str())
        .collect()
}
