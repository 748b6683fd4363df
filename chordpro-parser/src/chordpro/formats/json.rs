//! JSON dump of the whole tree through serde

use super::registry::{FormatError, Formatter};
use crate::chordpro::ast::File;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, file: &File) -> Result<String, FormatError> {
        serde_json::to_string_pretty(file).map_err(|e| FormatError::Serialization(e.to_string()))
    }

    fn description(&self) -> &str {
        "The parsed tree as pretty-printed JSON"
    }
}
