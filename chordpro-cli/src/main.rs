//! Command-line interface for chordpro
//! This binary converts ChordPro song sheets into HTML pages (or a debug / json dump), one file
//! at a time or a whole folder tree at once, ready to drop into a static site.
//!
//! Usage:
//!   chordpro file `<source>` [`<dest>`]         - Transform one file (stdout without a destination)
//!   chordpro folder `<source-dir>` `<dest-dir>` - Transform every song sheet under a folder
//!   chordpro formats                           - List the available output formats

mod processor;

use chordpro_config::{ChordproConfig, LogLevel, Loader};
use clap::{Arg, ArgAction, ArgMatches, Command};
use processor::{ProcessingError, Processor};
use std::path::PathBuf;

fn overwrite_arg() -> Arg {
    Arg::new("overwrite")
        .long("overwrite")
        .short('o')
        .help("How to handle an existing output file: none, old (replace older files) or all")
        .value_parser(["none", "old", "all"])
}

fn frontmatter_arg() -> Arg {
    Arg::new("frontmatter")
        .long("frontmatter")
        .short('f')
        .help("Front matter of HTML output: none, overwrite or preserve (keep the destination's)")
        .value_parser(["none", "overwrite", "preserve"])
}

fn build_cli() -> Command {
    Command::new("chordpro")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Converts ChordPro song sheets to HTML")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log more (-v debug, -vv trace)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("file")
                .alias("transform-file")
                .about("Transform a single ChordPro file")
                .arg(
                    Arg::new("source")
                        .help("ChordPro source file")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .index(1),
                )
                .arg(
                    Arg::new("dest")
                        .help("Destination file (default: stdout)")
                        .value_parser(clap::value_parser!(PathBuf))
                        .index(2),
                )
                .arg(overwrite_arg())
                .arg(frontmatter_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('t')
                        .help("Output format (see `chordpro formats`)"),
                ),
        )
        .subcommand(
            Command::new("folder")
                .visible_alias("dir")
                .alias("transform")
                .about("Recursively transform every ChordPro file of a folder to HTML")
                .arg(
                    Arg::new("source")
                        .help("Source folder")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .index(1),
                )
                .arg(
                    Arg::new("dest")
                        .help("Destination folder")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .index(2),
                )
                .arg(overwrite_arg())
                .arg(frontmatter_arg())
                .arg(
                    Arg::new("index")
                        .long("index")
                        .short('i')
                        .help("Create an \"_index.md\" file in every destination sub-folder")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("formats").about("List available output formats"))
}

/// Global options are given before or after the subcommand; the subcommand matches see both.
fn global_scope(matches: &ArgMatches) -> &ArgMatches {
    matches.subcommand().map_or(matches, |(_, sub)| sub)
}

/// Defaults, then the `--config` file, then the subcommand's own options.
fn load_config(matches: &ArgMatches) -> Result<ChordproConfig, ProcessingError> {
    let config_error = |e: chordpro_config::ConfigError| ProcessingError::Config(e.to_string());

    let mut loader = Loader::new();
    if let Some(path) = global_scope(matches).get_one::<PathBuf>("config") {
        loader = loader.with_file(path);
    }

    if let Some((name, sub)) = matches.subcommand() {
        for (arg, key) in [
            ("overwrite", "transform.overwrite"),
            ("frontmatter", "transform.frontmatter"),
        ] {
            if let Some(value) = sub.try_get_one::<String>(arg).ok().flatten() {
                loader = loader.set_override(key, value.as_str()).map_err(config_error)?;
            }
        }
        if let Some(format) = sub.try_get_one::<String>("format").ok().flatten() {
            loader = loader
                .set_override("output.format", format.as_str())
                .map_err(config_error)?;
        }
        if name == "folder" {
            loader = loader
                .set_override("output.format", "html")
                .map_err(config_error)?;
            if sub.get_flag("index") {
                loader = loader
                    .set_override("transform.index", true)
                    .map_err(config_error)?;
            }
        }
    }

    loader.build().map_err(config_error)
}

fn init_logging(level: LogLevel, verbosity: u8) {
    let level = match verbosity {
        0 => level,
        1 => level.max(LogLevel::Debug),
        _ => LogLevel::Trace,
    };
    let max_level = match level {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(max_level)
        .with_target(false)
        .init();
}

fn main() {
    let matches = build_cli().get_matches();

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    init_logging(config.logging.level, global_scope(&matches).get_count("verbose"));

    if let Err(e) = run(&matches, &config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches, config: &ChordproConfig) -> Result<(), ProcessingError> {
    let processor = Processor::new(config)?;
    match matches.subcommand() {
        Some(("file", sub)) => handle_file_command(&processor, sub),
        Some(("folder", sub)) => handle_folder_command(&processor, sub),
        Some(("formats", _)) => {
            handle_formats_command(&processor);
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Handle the file command
fn handle_file_command(processor: &Processor, matches: &ArgMatches) -> Result<(), ProcessingError> {
    let source = matches
        .get_one::<PathBuf>("source")
        .ok_or(ProcessingError::MissingInput)?;
    let dest = matches.get_one::<PathBuf>("dest");

    if let Some(output) = processor.transform_file(source, dest.map(PathBuf::as_path))? {
        print!("{}", output);
    }
    Ok(())
}

/// Handle the folder command
fn handle_folder_command(
    processor: &Processor,
    matches: &ArgMatches,
) -> Result<(), ProcessingError> {
    let source = matches
        .get_one::<PathBuf>("source")
        .ok_or(ProcessingError::MissingInput)?;
    let dest = matches
        .get_one::<PathBuf>("dest")
        .ok_or_else(|| ProcessingError::InvalidOutputDir(PathBuf::new()))?;

    let report = processor.transform_folder(source, dest)?;
    for path in report.written.iter().chain(&report.indexes) {
        println!("{}", path.display());
    }
    for (path, error) in &report.failed {
        eprintln!("{}: {}", path.display(), error);
    }
    Ok(())
}

/// Handle the formats command
fn handle_formats_command(processor: &Processor) {
    println!("Available formats:\n");
    for (name, description) in processor.formats() {
        println!("  {}", name);
        println!("    {}", description);
        println!();
    }
}
