//! Configuration for the chordpro tools.
//!
//! The documented defaults live in `defaults/chordpro.default.toml` and are compiled in, so a
//! bare binary behaves exactly as that file describes. A user TOML file and per-invocation
//! overrides are layered on top through [`Loader`], and the merged tree is deserialized into
//! [`ChordproConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/chordpro.default.toml");

/// Top-level configuration consumed by the chordpro tools.
#[derive(Debug, Clone, Deserialize)]
pub struct ChordproConfig {
    pub transform: TransformConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// How source files are turned into destination files.
#[derive(Debug, Clone, Deserialize)]
pub struct TransformConfig {
    pub overwrite: OverwriteMode,
    pub frontmatter: FrontmatterMode,
    pub index: bool,
    pub extensions: Vec<String>,
}

impl TransformConfig {
    /// Whether `path` has one of the configured source extensions (case-insensitive).
    pub fn is_source(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.extensions
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

/// Policy for a destination that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwriteMode {
    None,
    Old,
    All,
}

/// Where the front matter of generated HTML comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontmatterMode {
    None,
    Overwrite,
    Preserve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds a [ChordproConfig] from layers, later layers winning key by key:
/// embedded defaults, then configuration files in the order added, then overrides.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            builder: Config::builder().add_source(defaults),
        }
    }

    fn add_file(mut self, path: &Path, required: bool) -> Self {
        let layer = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(layer);
        self
    }

    /// Add a TOML file layer. [Loader::build] fails if the file does not exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.add_file(path.as_ref(), true)
    }

    /// Add a TOML file layer that is skipped when the file does not exist.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.add_file(path.as_ref(), false)
    }

    /// Set one dotted key, e.g. `transform.overwrite`, above every file layer.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge the layers. Unknown mode names and wrongly typed values are errors here.
    pub fn build(self) -> Result<ChordproConfig, ConfigError> {
        let merged = self.builder.build()?;
        merged.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults alone.
pub fn load_defaults() -> Result<ChordproConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = load_defaults().expect("embedded defaults");
        assert_eq!(config.transform.overwrite, OverwriteMode::None);
        assert_eq!(config.transform.frontmatter, FrontmatterMode::Preserve);
        assert!(!config.transform.index);
        assert_eq!(config.transform.extensions, vec!["cho", "chopro", "chordpro"]);
        assert_eq!(config.output.format, "html");
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn overrides_replace_defaults() {
        let config = Loader::new()
            .set_override("transform.overwrite", "old")
            .expect("valid key")
            .set_override("transform.index", true)
            .expect("valid key")
            .build()
            .expect("valid config");
        assert_eq!(config.transform.overwrite, OverwriteMode::Old);
        assert!(config.transform.index);
    }

    #[test]
    fn rejects_unknown_mode() {
        let result = Loader::new()
            .set_override("transform.frontmatter", "sometimes")
            .expect("valid key")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn source_extensions_ignore_case() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(config.transform.is_source(Path::new("songs/imagine.cho")));
        assert!(config.transform.is_source(Path::new("songs/imagine.CHOPRO")));
        assert!(!config.transform.is_source(Path::new("songs/imagine.txt")));
        assert!(!config.transform.is_source(Path::new("songs/cho")));
    }

    #[test]
    fn log_levels_ordered_by_verbosity() {
        assert_eq!(LogLevel::Warn.max(LogLevel::Debug), LogLevel::Debug);
        assert_eq!(LogLevel::Trace.max(LogLevel::Debug), LogLevel::Trace);
        assert_eq!(LogLevel::Info.to_string(), "info");
    }
}
