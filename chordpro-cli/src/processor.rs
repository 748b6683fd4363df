//! File and folder transforms
//!
//! This module turns ChordPro sources into rendered files on disk, applying the overwrite
//! and front-matter policies from [ChordproConfig]. Every source must hold exactly one song;
//! the parser itself accepts any number, the single-song rule belongs to this tool.
//!
//! Front matter (HTML output only)
//!
//!     none        nothing is written before the chord sheet
//!     overwrite   the source's own block if it has one, else one generated from song metadata
//!     preserve    the destination's existing block if it has one, else as overwrite
//!
//! Other formats render the parsed file as is; debug and json already carry the front matter.

use chordpro_config::{ChordproConfig, FrontmatterMode, OverwriteMode};
use chordpro_parser::chordpro::formats::{song_frontmatter, FormatError, FormatRegistry};
use chordpro_parser::chordpro::lexing::extract_frontmatter;
use chordpro_parser::{parse_with, FrontmatterPolicy, ParseOptions};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Name of the section file created in every destination sub-directory.
pub const INDEX_FILE: &str = "_index.md";

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("missing input path")]
    MissingInput,
    #[error("input not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("input is not a regular file: {}", .0.display())]
    InputNotFile(PathBuf),
    #[error("input is not a directory: {}", .0.display())]
    InputNotDir(PathBuf),
    #[error("output file already exists: {}", .0.display())]
    OutputExists(PathBuf),
    #[error("output file newer than chordpro input file: {}", .0.display())]
    OutputNewer(PathBuf),
    #[error("no song found")]
    ZeroSongs,
    #[error("multiple songs found ({0})")]
    MultipleSongs(usize),
    #[error("output path is not a directory: {}", .0.display())]
    InvalidOutputDir(PathBuf),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("configuration error: {0}")]
    Config(String),
}

impl ProcessingError {
    fn io(path: &Path, source: io::Error) -> Self {
        ProcessingError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Outcome of a folder transform.
#[derive(Debug, Default)]
pub struct FolderReport {
    /// Destination files written, in walk order.
    pub written: Vec<PathBuf>,
    /// Sources that could not be transformed, with the reason.
    pub failed: Vec<(PathBuf, ProcessingError)>,
    /// `_index.md` files created.
    pub indexes: Vec<PathBuf>,
}

/// Transforms sources according to a loaded configuration.
pub struct Processor<'a> {
    config: &'a ChordproConfig,
    registry: FormatRegistry,
}

impl<'a> Processor<'a> {
    pub fn new(config: &'a ChordproConfig) -> Result<Self, ProcessingError> {
        let registry = FormatRegistry::with_defaults();
        if !registry.has(&config.output.format) {
            return Err(FormatError::FormatNotFound(config.output.format.clone()).into());
        }
        Ok(Processor { config, registry })
    }

    fn is_html(&self) -> bool {
        self.config.output.format == "html"
    }

    /// Render one source text.
    ///
    /// `preserved` is the front matter of the existing destination, if any. It is only used in
    /// preserve mode with HTML output.
    pub fn render(&self, source: &str, preserved: Option<String>) -> Result<String, ProcessingError> {
        let mode = self.config.transform.frontmatter;
        let policy = match preserved {
            Some(text) if self.is_html() && mode == FrontmatterMode::Preserve => {
                FrontmatterPolicy::Preserve(text)
            }
            _ => FrontmatterPolicy::Detect,
        };
        let file = parse_with(source, &ParseOptions::new().frontmatter(policy));

        let song = match file.songs() {
            [] => return Err(ProcessingError::ZeroSongs),
            [song] => song,
            songs => return Err(ProcessingError::MultipleSongs(songs.len())),
        };
        if let Some(error) = song.error() {
            warn!(%error, "song rendered up to a lex error");
        }

        let body = self.registry.serialize(&file, &self.config.output.format)?;
        if !self.is_html() {
            return Ok(body);
        }

        let frontmatter = match mode {
            FrontmatterMode::None => String::new(),
            _ if file.has_frontmatter() => file.frontmatter().to_string(),
            _ => song_frontmatter(song)?,
        };
        Ok(frontmatter + &body)
    }

    /// Transform `source` into `dest`, or return the rendered text when there is no destination.
    pub fn transform_file(
        &self,
        source: &Path,
        dest: Option<&Path>,
    ) -> Result<Option<String>, ProcessingError> {
        check_files(source, dest, self.config.transform.overwrite)?;
        let text = fs::read_to_string(source).map_err(|e| ProcessingError::io(source, e))?;

        let Some(dest) = dest else {
            return self.render(&text, None).map(Some);
        };

        let preserving = self.config.transform.frontmatter == FrontmatterMode::Preserve;
        let preserved = if self.is_html() && preserving {
            existing_frontmatter(dest)
        } else {
            None
        };
        if preserved.is_some() {
            debug!(dest = %dest.display(), "keeping destination front matter");
        }
        let output = self.render(&text, preserved)?;

        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ProcessingError::io(parent, e))?;
        }
        fs::write(dest, output).map_err(|e| ProcessingError::io(dest, e))?;
        info!(source = %source.display(), dest = %dest.display(), "transformed");
        Ok(None)
    }

    /// Transform every source file under `source_dir` into the same relative location under
    /// `dest_dir`, with `.html` appended to the file name.
    ///
    /// A source that fails is logged and recorded in the report; the walk goes on.
    pub fn transform_folder(
        &self,
        source_dir: &Path,
        dest_dir: &Path,
    ) -> Result<FolderReport, ProcessingError> {
        check_dirs(source_dir, dest_dir)?;
        fs::create_dir_all(dest_dir).map_err(|e| ProcessingError::io(dest_dir, e))?;

        let mut report = FolderReport::default();
        for entry in WalkDir::new(source_dir).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || !self.config.transform.is_source(path) {
                continue;
            }
            let relative = path.strip_prefix(source_dir).unwrap_or(path);
            let dest = html_destination(dest_dir, relative);

            match self.transform_file(path, Some(&dest)) {
                Ok(_) => report.written.push(dest),
                Err(error) => {
                    warn!(source = %path.display(), %error, "skipped");
                    report.failed.push((path.to_path_buf(), error));
                }
            }
        }

        if self.config.transform.index {
            report.indexes = create_index_files(dest_dir)?;
        }
        Ok(report)
    }

    /// Names and descriptions of the available output formats, sorted by name.
    pub fn formats(&self) -> Vec<(String, String)> {
        self.registry.describe_formats()
    }
}

/// `<dest_dir>/<relative>.html`
fn html_destination(dest_dir: &Path, relative: &Path) -> PathBuf {
    let mut name = dest_dir.join(relative).into_os_string();
    name.push(".html");
    PathBuf::from(name)
}

/// Front matter at the top of an existing file, if the file can be read and has one.
fn existing_frontmatter(path: &Path) -> Option<String> {
    let text = fs::read_to_string(path).ok()?;
    extract_frontmatter(&text).map(|block| block.text)
}

/// Validate a single-file transform against the overwrite policy.
pub fn check_files(
    source: &Path,
    dest: Option<&Path>,
    overwrite: OverwriteMode,
) -> Result<(), ProcessingError> {
    if source.as_os_str().is_empty() {
        return Err(ProcessingError::MissingInput);
    }
    let source_meta =
        fs::metadata(source).map_err(|_| ProcessingError::InputNotFound(source.to_path_buf()))?;
    if !source_meta.is_file() {
        return Err(ProcessingError::InputNotFile(source.to_path_buf()));
    }

    let Some(dest) = dest else { return Ok(()) };
    let Ok(dest_meta) = fs::metadata(dest) else {
        return Ok(());
    };

    match overwrite {
        OverwriteMode::All => Ok(()),
        OverwriteMode::None => Err(ProcessingError::OutputExists(dest.to_path_buf())),
        OverwriteMode::Old => {
            let source_time = source_meta
                .modified()
                .map_err(|e| ProcessingError::io(source, e))?;
            let dest_time = dest_meta
                .modified()
                .map_err(|e| ProcessingError::io(dest, e))?;
            if dest_time > source_time {
                Err(ProcessingError::OutputNewer(dest.to_path_buf()))
            } else {
                Ok(())
            }
        }
    }
}

/// Validate a folder transform: the source must be a directory, the destination a directory or
/// absent.
pub fn check_dirs(source: &Path, dest: &Path) -> Result<(), ProcessingError> {
    if source.as_os_str().is_empty() {
        return Err(ProcessingError::MissingInput);
    }
    let meta =
        fs::metadata(source).map_err(|_| ProcessingError::InputNotFound(source.to_path_buf()))?;
    if !meta.is_dir() {
        return Err(ProcessingError::InputNotDir(source.to_path_buf()));
    }
    if dest.as_os_str().is_empty() {
        return Err(ProcessingError::InvalidOutputDir(dest.to_path_buf()));
    }
    match fs::metadata(dest) {
        Ok(meta) if !meta.is_dir() => Err(ProcessingError::InvalidOutputDir(dest.to_path_buf())),
        _ => Ok(()),
    }
}

/// Create `_index.md` in every sub-directory of `root` (not `root` itself) that lacks one.
///
/// The file holds a YAML front matter whose only key is the directory name as `title`.
pub fn create_index_files(root: &Path) -> Result<Vec<PathBuf>, ProcessingError> {
    let mut created = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let index = entry.path().join(INDEX_FILE);
        if index.exists() {
            continue;
        }
        let title = entry.file_name().to_string_lossy();
        fs::write(&index, format!("---\ntitle: {title:?}\n---\n"))
            .map_err(|e| ProcessingError::io(&index, e))?;
        debug!(index = %index.display(), "index created");
        created.push(index);
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chordpro_config::{load_defaults, Loader};
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    const SONG: &str = "{t: Imagine}\n{artist: John Lennon}\n[C]Imagine [F]there's no heaven\n";

    fn config_with(overrides: &[(&str, &str)]) -> ChordproConfig {
        let mut loader = Loader::new();
        for (key, value) in overrides {
            loader = loader.set_override(key, *value).expect("override to apply");
        }
        loader.build().expect("config to build")
    }

    fn set_mtime(path: &Path, time: SystemTime) {
        fs::File::options()
            .write(true)
            .open(path)
            .and_then(|file| file.set_modified(time))
            .expect("mtime to be set");
    }

    #[test]
    fn test_render_generates_frontmatter_from_metadata() {
        let config = load_defaults().unwrap();
        let output = Processor::new(&config).unwrap().render(SONG, None).unwrap();
        assert!(output.starts_with("---\ntitle: Imagine\nartist: John Lennon\n---\n<div class=\"chord-sheet\">\n"));
    }

    #[test]
    fn test_render_prefers_source_frontmatter() {
        let config = config_with(&[("transform.frontmatter", "overwrite")]);
        let source = format!("---\nweight: 3\n---\n{SONG}");
        let output = Processor::new(&config).unwrap().render(&source, None).unwrap();
        assert!(output.starts_with("---\nweight: 3\n---\n<div"));
    }

    #[test]
    fn test_render_preserves_destination_frontmatter() {
        let config = load_defaults().unwrap();
        let source = format!("---\nweight: 3\n---\n{SONG}");
        let output = Processor::new(&config)
            .unwrap()
            .render(&source, Some("---\nweight: 9\n---\n".into()))
            .unwrap();
        assert!(output.starts_with("---\nweight: 9\n---\n<div"));
        assert!(!output.contains("weight: 3"));
    }

    #[test]
    fn test_render_without_frontmatter() {
        let config = config_with(&[("transform.frontmatter", "none")]);
        let source = format!("---\nweight: 3\n---\n{SONG}");
        let output = Processor::new(&config).unwrap().render(&source, None).unwrap();
        assert!(output.starts_with("<div class=\"chord-sheet\">"));
    }

    #[test]
    fn test_render_other_format_skips_html_frontmatter() {
        let config = config_with(&[("output.format", "debug")]);
        let output = Processor::new(&config).unwrap().render("[C]do", None).unwrap();
        assert_eq!(
            output,
            "SONGS: count=1\n  SONG 1\n    PAR 1 <Verse>\n      LINE 1\n        PAIR 1: [C] / do\n"
        );
    }

    #[test]
    fn test_render_requires_single_song() {
        let config = load_defaults().unwrap();
        let processor = Processor::new(&config).unwrap();
        assert!(matches!(processor.render("\n\n", None), Err(ProcessingError::ZeroSongs)));
        assert!(matches!(
            processor.render("[C]a\n{ns}\n[D]b", None),
            Err(ProcessingError::MultipleSongs(2))
        ));
    }

    #[test]
    fn test_unknown_format_rejected() {
        let config = config_with(&[("output.format", "pdf")]);
        assert!(matches!(
            Processor::new(&config),
            Err(ProcessingError::Format(FormatError::FormatNotFound(_)))
        ));
    }

    #[test]
    fn test_check_files_input_errors() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            check_files(Path::new(""), None, OverwriteMode::None),
            Err(ProcessingError::MissingInput)
        ));
        assert!(matches!(
            check_files(&dir.path().join("nope.cho"), None, OverwriteMode::None),
            Err(ProcessingError::InputNotFound(_))
        ));
        assert!(matches!(
            check_files(dir.path(), None, OverwriteMode::None),
            Err(ProcessingError::InputNotFile(_))
        ));
    }

    #[test]
    fn test_overwrite_policies() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("song.cho");
        let dest = dir.path().join("song.html");
        fs::write(&source, SONG).unwrap();
        fs::write(&dest, "old").unwrap();

        let now = SystemTime::now();
        set_mtime(&source, now - Duration::from_secs(3600));
        set_mtime(&dest, now);

        assert!(matches!(
            check_files(&source, Some(&dest), OverwriteMode::None),
            Err(ProcessingError::OutputExists(_))
        ));
        assert!(matches!(
            check_files(&source, Some(&dest), OverwriteMode::Old),
            Err(ProcessingError::OutputNewer(_))
        ));
        assert!(check_files(&source, Some(&dest), OverwriteMode::All).is_ok());

        set_mtime(&dest, now - Duration::from_secs(7200));
        assert!(check_files(&source, Some(&dest), OverwriteMode::Old).is_ok());
    }

    #[test]
    fn test_transform_file_keeps_existing_frontmatter() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("song.cho");
        let dest = dir.path().join("out").join("song.html");
        fs::write(&source, SONG).unwrap();

        let config = config_with(&[("transform.overwrite", "all")]);
        let processor = Processor::new(&config).unwrap();
        processor.transform_file(&source, Some(&dest)).unwrap();
        let first = fs::read_to_string(&dest).unwrap();
        assert!(first.starts_with("---\ntitle: Imagine\n"));

        fs::write(&dest, "---\ntitle: Custom\ndraft: true\n---\nstale body").unwrap();
        processor.transform_file(&source, Some(&dest)).unwrap();
        let second = fs::read_to_string(&dest).unwrap();
        assert!(second.starts_with("---\ntitle: Custom\ndraft: true\n---\n<div class=\"chord-sheet\">"));
        assert!(!second.contains("stale body"));
    }

    #[test]
    fn test_transform_file_to_stdout_returns_text() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("song.cho");
        fs::write(&source, SONG).unwrap();

        let config = load_defaults().unwrap();
        let output = Processor::new(&config)
            .unwrap()
            .transform_file(&source, None)
            .unwrap()
            .expect("text without a destination");
        assert!(output.contains("<u class=\"chord\">F</u>"));
    }

    #[test]
    fn test_transform_folder() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("beatles")).unwrap();
        fs::write(src.path().join("beatles").join("help.cho"), "{t: Help}\n[A]Help").unwrap();
        fs::write(src.path().join("imagine.CHOPRO"), SONG).unwrap();
        fs::write(src.path().join("empty.chordpro"), "\n").unwrap();
        fs::write(src.path().join("notes.txt"), "[C]ignored").unwrap();

        let config = config_with(&[("transform.index", "true")]);
        let report = Processor::new(&config)
            .unwrap()
            .transform_folder(src.path(), dst.path())
            .unwrap();

        assert_eq!(
            report.written,
            vec![
                dst.path().join("beatles").join("help.cho.html"),
                dst.path().join("imagine.CHOPRO.html"),
            ]
        );
        assert_eq!(report.failed.len(), 1);
        assert!(matches!(report.failed[0].1, ProcessingError::ZeroSongs));
        assert!(!dst.path().join("notes.txt.html").exists());
        assert_eq!(report.indexes, vec![dst.path().join("beatles").join(INDEX_FILE)]);
    }

    #[test]
    fn test_check_dirs() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file.cho");
        fs::write(&file, SONG).unwrap();

        assert!(matches!(
            check_dirs(&file, &dir.path().join("out")),
            Err(ProcessingError::InputNotDir(_))
        ));
        assert!(matches!(
            check_dirs(dir.path(), &file),
            Err(ProcessingError::InvalidOutputDir(_))
        ));
        assert!(check_dirs(dir.path(), &dir.path().join("missing")).is_ok());
    }

    #[test]
    fn test_index_files_created_once() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("rock").join("70s")).unwrap();
        fs::create_dir_all(root.path().join("jazz")).unwrap();
        fs::write(root.path().join("jazz").join(INDEX_FILE), "custom").unwrap();

        let created = create_index_files(root.path()).unwrap();
        assert_eq!(
            created,
            vec![
                root.path().join("rock").join(INDEX_FILE),
                root.path().join("rock").join("70s").join(INDEX_FILE),
            ]
        );
        assert_eq!(
            fs::read_to_string(root.path().join("rock").join("70s").join(INDEX_FILE)).unwrap(),
            "---\ntitle: \"70s\"\n---\n"
        );
        assert_eq!(
            fs::read_to_string(root.path().join("jazz").join(INDEX_FILE)).unwrap(),
            "custom"
        );
        assert!(!root.path().join(INDEX_FILE).exists());
    }
}
