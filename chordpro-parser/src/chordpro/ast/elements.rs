//! Tree elements, root first: File → Song → Paragraph → Line → ChordLyricPair.

pub mod file;
pub mod line;
pub mod meta;
pub mod pair;
pub mod paragraph;
pub mod song;

pub use file::File;
pub use line::Line;
pub use meta::{MetaField, MetaItem};
pub use pair::ChordLyricPair;
pub use paragraph::{Paragraph, ParagraphType};
pub use song::Song;
