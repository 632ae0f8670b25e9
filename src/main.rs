use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use env_logger::{Builder, Target};
use flightstat::{export_report, parse_igc_files, ExportFormat, ExportOptions, StatOptions};
use glob::glob;
use log::{debug, error, info, warn, LevelFilter};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum recursion depth to prevent stack overflow
const MAX_RECURSION_DEPTH: usize = 100;

const IGC_EXTENSION: &str = "igc";

/// Expand input paths to a list of IGC files.
/// Files are taken as given, directories are searched recursively and glob
/// patterns are expanded first.
fn expand_input_paths(input_paths: &[String], visited: &mut HashSet<PathBuf>) -> Result<Vec<PathBuf>> {
    expand_input_paths_with_depth(input_paths, visited, 0)
}

fn expand_input_paths_with_depth(
    input_paths: &[String],
    visited: &mut HashSet<PathBuf>,
    depth: usize,
) -> Result<Vec<PathBuf>> {
    if depth > MAX_RECURSION_DEPTH {
        return Err(anyhow::anyhow!(
            "Maximum recursion depth exceeded ({})",
            MAX_RECURSION_DEPTH
        ));
    }
    let mut igc_files = Vec::new();

    for input_path_str in input_paths {
        if input_path_str.contains('*') || input_path_str.contains('?') {
            let paths = glob(input_path_str)
                .with_context(|| format!("Invalid glob pattern '{}'", input_path_str))?
                .collect::<std::result::Result<Vec<_>, _>>()
                .with_context(|| format!("Error expanding glob pattern '{}'", input_path_str))?;
            for path in paths {
                if let Some(path_str) = path.to_str() {
                    let sub_result =
                        expand_input_paths_with_depth(&[path_str.to_string()], visited, depth + 1)?;
                    igc_files.extend(sub_result);
                }
            }
            continue;
        }

        let input_path = Path::new(input_path_str);
        match input_path.canonicalize() {
            Ok(canonical_path) if canonical_path.is_file() => {
                if visited.insert(canonical_path.clone()) {
                    igc_files.push(canonical_path);
                }
            }
            Ok(canonical_path) if canonical_path.is_dir() => {
                let mut dir_files =
                    find_igc_files_in_dir_with_depth(&canonical_path, visited, depth + 1)?;
                igc_files.append(&mut dir_files);
            }
            Ok(_) => warn!("Path not found or not accessible: {}", input_path_str),
            Err(e) => warn!("Failed to canonicalize path '{}': {}", input_path_str, e),
        }
    }

    Ok(igc_files)
}

/// Recursively find all IGC files in a directory, protecting against symlink cycles and depth overflow
fn find_igc_files_in_dir_with_depth(
    dir_path: &Path,
    visited: &mut HashSet<PathBuf>,
    depth: usize,
) -> Result<Vec<PathBuf>> {
    if depth > MAX_RECURSION_DEPTH {
        return Err(anyhow::anyhow!(
            "Maximum recursion depth exceeded in directory traversal ({})",
            MAX_RECURSION_DEPTH
        ));
    }

    let mut igc_files = Vec::new();

    // already visited directories are skipped to avoid cycles
    if !visited.insert(dir_path.to_path_buf()) {
        return Ok(igc_files);
    }

    let entries = match fs::read_dir(dir_path) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot read directory '{}': {}", dir_path.display(), e);
            return Ok(igc_files);
        }
    };

    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                warn!(
                    "Cannot read entry in directory '{}': {}",
                    dir_path.display(),
                    e
                );
                continue;
            }
        };

        let canonical_path = match path.canonicalize() {
            Ok(p) => p,
            Err(e) => {
                warn!("Failed to canonicalize path '{}': {}", path.display(), e);
                continue;
            }
        };

        if canonical_path.is_dir() {
            let mut sub_files = find_igc_files_in_dir_with_depth(&canonical_path, visited, depth + 1)?;
            igc_files.append(&mut sub_files);
        } else if has_igc_extension(&canonical_path) && visited.insert(canonical_path.clone()) {
            igc_files.push(canonical_path);
        }
    }

    // Sort the files for consistent ordering
    igc_files.sort();
    Ok(igc_files)
}

fn has_igc_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(IGC_EXTENSION))
        .unwrap_or(false)
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (",
        env!("VERGEN_GIT_DESCRIBE"),
        " ",
        env!("VERGEN_GIT_COMMIT_DATE"),
        ")"
    )
}

fn build_command() -> Command {
    let command = Command::new("flightstat")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version())
        .about("Build flight statistics (per day, month, year and glider) from IGC flight logs.")
        .arg(
            Arg::new("files")
                .help("IGC files or directories to read. Directories are searched recursively for .igc files. Case-insensitive, supports globbing.")
                .required(false)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and detailed parsing information")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("glider")
                .long("glider")
                .short('g')
                .help("Glider name used for flights without a glider type in the IGC header")
                .value_name("NAME")
                .default_value("Unknown"),
        )
        .arg(
            Arg::new("no-gliders")
                .long("no-gliders")
                .help("Omit the per-glider breakdown from the report")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Report file (default: flightstat.<csv|json|xlsx> in the current directory)")
                .value_name("FILE"),
        );

    #[cfg(feature = "json")]
    let command = command.arg(
        Arg::new("json")
            .long("json")
            .help("Write the statistics as JSON instead of CSV")
            .action(ArgAction::SetTrue),
    );

    #[cfg(feature = "xlsx")]
    let command = command.arg(
        Arg::new("xlsx")
            .long("xlsx")
            .help("Write the flight listing and statistics as an Excel workbook")
            .action(ArgAction::SetTrue),
    );

    command
}

/// Report format selected on the command line, CSV unless a flag says otherwise
#[cfg_attr(not(any(feature = "json", feature = "xlsx")), allow(unused_variables))]
fn export_format(matches: &ArgMatches) -> ExportFormat {
    #[cfg(feature = "json")]
    if matches.get_flag("json") {
        return ExportFormat::Json;
    }
    #[cfg(feature = "xlsx")]
    if matches.get_flag("xlsx") {
        return ExportFormat::Xlsx;
    }
    ExportFormat::Csv
}

fn init_logger(debug: bool) {
    let mut builder = Builder::from_default_env();
    builder
        .target(Target::Stderr)
        .format_timestamp(None)
        .format_module_path(false);
    if debug {
        builder.filter_level(LevelFilter::Debug);
    } else if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(LevelFilter::Info);
    }
    builder.init();
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();

    let debug = matches.get_flag("debug");
    init_logger(debug);

    // Show help when no files were provided
    let file_patterns: Vec<String> = match matches.get_many::<String>("files") {
        Some(files) => files.cloned().collect(),
        None => {
            build_command().print_help()?;
            println!();
            return Ok(());
        }
    };

    let options = ExportOptions {
        format: export_format(&matches),
        output: matches.get_one::<String>("output").map(PathBuf::from),
        stat: StatOptions {
            default_glider: matches
                .get_one::<String>("glider")
                .cloned()
                .unwrap_or_default(),
            include_gliders: !matches.get_flag("no-gliders"),
        },
    };

    debug!("Input patterns: {file_patterns:?}");

    let mut visited = HashSet::new();
    let input_files = match expand_input_paths(&file_patterns, &mut visited) {
        Ok(files) => files,
        Err(e) => {
            error!("Error expanding input paths: {e:#}");
            std::process::exit(1);
        }
    };

    if input_files.is_empty() {
        error!("No IGC files found in the specified input paths: {file_patterns:?}");
        std::process::exit(1);
    }
    debug!("Found {} IGC files to process", input_files.len());

    // Any unreadable track aborts the run before the report is written
    let flights = match parse_igc_files(&input_files) {
        Ok(flights) => flights,
        Err(e) => {
            error!("{e:#}");
            std::process::exit(1);
        }
    };

    match export_report(&flights, &options) {
        Ok(report) => {
            info!(
                "Processed {} flights into {}",
                report.flights,
                report.output_path.display()
            );
            Ok(())
        }
        Err(e) => {
            error!("{e:#}");
            std::process::exit(1);
        }
    }
}
