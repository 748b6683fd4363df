//! Format registry for song-sheet rendering
//!
//! Each output format implements the `Formatter` trait and is registered by name with
//! `FormatRegistry`, so callers can pick a renderer from configuration or the command line.
//! Names are kept in order, so listings are stable.

use crate::chordpro::ast::File;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A named renderer for a parsed file.
pub trait Formatter: Send + Sync {
    /// Registry key, e.g. "html".
    fn name(&self) -> &str;

    fn serialize(&self, file: &File) -> Result<String, FormatError>;

    /// One-line summary shown by format listings.
    fn description(&self) -> &str {
        ""
    }
}

#[derive(Default)]
pub struct FormatRegistry {
    by_name: BTreeMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// An empty registry. See [FormatRegistry::with_defaults] for the built-in formats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in formats: html, debug and json.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::HtmlDivFormatter);
        registry.register(super::DebugFormatter);
        registry.register(super::JsonFormatter);
        registry
    }

    /// Add `formatter` under its own name. A formatter already holding that name is replaced.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        let name = formatter.name().to_string();
        self.by_name.insert(name, Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.by_name.get(name).map(Box::as_ref)
    }

    pub fn has(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Render `file` with the formatter registered as `format`.
    pub fn serialize(&self, file: &File, format: &str) -> Result<String, FormatError> {
        match self.get(format) {
            Some(formatter) => formatter.serialize(file),
            None => Err(FormatError::FormatNotFound(format.to_string())),
        }
    }

    pub fn list_formats(&self) -> Vec<String> {
        self.by_name.keys().cloned().collect()
    }

    /// `(name, description)` for every format, in name order.
    pub fn describe_formats(&self) -> Vec<(String, String)> {
        self.by_name
            .iter()
            .map(|(name, formatter)| (name.clone(), formatter.description().to_string()))
            .collect()
    }
}
