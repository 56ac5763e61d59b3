use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use expense_tracker::cli::{handle_command, log_failure, Commands};
use expense_tracker::config::{paths::TrackerPaths, settings::Settings};
use expense_tracker::logging::{Event, EventLogger};
use expense_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "tracker",
    version,
    about = "Expense Tracker CLI",
    long_about = "Record, list, summarize and export personal expenses. \
                  Data lives in a single JSON file under the data directory."
)]
struct Cli {
    /// Directory holding the data file, event log and settings
    #[arg(long, global = true, env = "TRACKER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let argv: Vec<String> = std::env::args().skip(1).collect();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here; only real errors are logged
            if e.use_stderr() {
                let paths = match data_dir_arg(&argv) {
                    Some(dir) => Ok(TrackerPaths::with_base_dir(dir)),
                    None => TrackerPaths::new(),
                };
                let logger = paths
                    .map(|paths| EventLogger::new(paths.log_file()))
                    .unwrap_or_else(|_| EventLogger::disabled());
                logger.error(
                    Event::ArgumentError,
                    format!("Argument error: {}", first_line(&e.to_string())),
                );
            }
            e.exit();
        }
    };

    let paths = match cli.data_dir {
        Some(dir) => TrackerPaths::with_base_dir(dir),
        None => TrackerPaths::new()?,
    };

    let logger = EventLogger::new(paths.log_file());
    let joined = argv.join(" ");
    logger.info(
        Event::Command,
        format!(
            "Command called: {}",
            if joined.is_empty() { "(no args)" } else { joined.as_str() }
        ),
    );

    let settings = match Settings::load_or_create(&paths) {
        Ok(settings) => settings,
        Err(e) => {
            log_failure(&logger, cli.command.name(), &e);
            return Err(e.into());
        }
    };

    let storage = Storage::new(paths);
    handle_command(&storage, &logger, &settings, cli.command)?;

    Ok(())
}

fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or_default()
}

/// Value of `--data-dir` in raw arguments that clap rejected
fn data_dir_arg(args: &[String]) -> Option<PathBuf> {
    let mut found = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }
        if arg == "--data-dir" {
            found = iter.next().filter(|v| !v.starts_with('-')).map(PathBuf::from);
        } else if let Some(value) = arg.strip_prefix("--data-dir=") {
            found = Some(PathBuf::from(value));
        }
    }
    found.filter(|dir| !dir.as_os_str().is_empty())
}
