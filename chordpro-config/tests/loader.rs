use chordpro_config::{FrontmatterMode, LogLevel, Loader, OverwriteMode};
use std::fs;
use tempfile::TempDir;

#[test]
fn user_file_layers_over_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chordpro.toml");
    fs::write(
        &path,
        "[transform]\noverwrite = \"old\"\nindex = true\n\n[logging]\nlevel = \"debug\"\n",
    )
    .unwrap();

    let config = Loader::new().with_file(&path).build().unwrap();
    assert_eq!(config.transform.overwrite, OverwriteMode::Old);
    assert!(config.transform.index);
    assert_eq!(config.logging.level, LogLevel::Debug);
    // untouched keys keep their defaults
    assert_eq!(config.transform.frontmatter, FrontmatterMode::Preserve);
    assert_eq!(config.output.format, "html");
}

#[test]
fn overrides_win_over_user_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chordpro.toml");
    fs::write(&path, "[transform]\nfrontmatter = \"none\"\n").unwrap();

    let config = Loader::new()
        .with_file(&path)
        .set_override("transform.frontmatter", "overwrite")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.transform.frontmatter, FrontmatterMode::Overwrite);
}

#[test]
fn missing_required_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = Loader::new().with_file(dir.path().join("absent.toml")).build();
    assert!(result.is_err());
}

#[test]
fn missing_optional_file_is_ignored() {
    let dir = TempDir::new().unwrap();
    let config = Loader::new()
        .with_optional_file(dir.path().join("absent.toml"))
        .build()
        .unwrap();
    assert_eq!(config.transform.overwrite, OverwriteMode::None);
}
