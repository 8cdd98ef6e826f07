mod config;
mod console;
mod error;
mod frames;
mod history;
mod input;
mod mouse;
mod paths;
mod tui;
mod wallconf;

use clap::{Parser, Subcommand};
use config::Settings;
use console::Severity;
use error::HistoryError;
use history::{HistoryCache, Removal};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use std::fs::File;
use std::path::{Path, PathBuf};
use tui::run_tui;
use wallconf::WallConf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// History cache file, overrides `history_file` from settings.toml
    #[arg(short, long, global = true)]
    cache: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recently used configurations
    #[command(subcommand)]
    History(HistoryCommand),

    /// Wallpaper configuration files
    #[command(subcommand)]
    Conf(ConfCommand),
}

#[derive(Subcommand, Debug)]
enum HistoryCommand {
    /// Print every entry, newest first
    List,
    /// Put a configuration path at the front
    Add { path: String },
    /// Print the entry at a 1-based position
    Get { index: usize },
    /// Remove the entry at a 1-based position
    Remove { index: usize },
    /// Remove every entry
    Clear,
    /// Browse the history interactively
    Browse,
}

#[derive(Subcommand, Debug)]
enum ConfCommand {
    /// Print a configuration and remember it as recently used
    Show { path: PathBuf },

    /// Create or update a configuration and remember it as recently used
    Write {
        path: PathBuf,

        /// Minimal compatible version string
        #[arg(long)]
        min_version: Option<String>,

        /// Directory holding the frames
        #[arg(long)]
        images: Option<String>,

        /// Seconds between two frames
        #[arg(long)]
        time: Option<f64>,

        /// Print debug info while running
        #[arg(long)]
        debug: Option<bool>,

        /// Image to set once instead of animating
        #[arg(long)]
        static_wallpaper: Option<String>,

        /// Start from empty values instead of the existing file
        #[arg(long)]
        reset: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse CLI flags
    let args = Args::parse();

    let browsing = matches!(args.command, Command::History(HistoryCommand::Browse));
    init_logging(args.verbose, browsing);

    // Load settings, --cache wins over the file
    let settings = Settings::load()?;
    let cache_file = args
        .cache
        .clone()
        .unwrap_or_else(|| settings.history_file.clone());

    let mut history = HistoryCache::init(&cache_file)?;
    log::debug!("using history {}", history.cache_file_path().display());

    match args.command {
        Command::History(cmd) => run_history(cmd, &mut history, &settings)?,
        Command::Conf(cmd) => run_conf(cmd, &mut history)?,
    }

    history.unref();
    Ok(())
}

fn init_logging(verbose: bool, browsing: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    // The TUI owns the terminal, so log to a file instead
    let result = if browsing {
        match open_log_file(&paths::default_log_file()) {
            Ok(file) => WriteLogger::init(level, simplelog::Config::default(), file),
            Err(e) => {
                console::emit(Severity::Warning, &format!("Logging disabled: {e}"));
                return;
            }
        }
    } else {
        TermLogger::init(
            level,
            simplelog::Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )
    };

    if let Err(e) = result {
        console::emit(Severity::Warning, &format!("Logging disabled: {e}"));
    }
}

fn open_log_file(log_file: &Path) -> Result<File, HistoryError> {
    let path = paths::normalize(log_file)?;
    File::options()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| HistoryError::io(path, e))
}

fn run_history(
    cmd: HistoryCommand,
    history: &mut HistoryCache,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        HistoryCommand::List => {
            if history.is_empty() {
                console::emit(Severity::Info, "History is empty");
            }
            for (i, path) in history.iter().enumerate() {
                println!("{:>2}. {path}", i + 1);
            }
        }
        HistoryCommand::Add { path } => {
            history.set(&path)?;
            console::emit(Severity::Success, &format!("Added {path}"));
        }
        HistoryCommand::Get { index } => match history.get(index)? {
            Some(path) => println!("{path}"),
            None => console::emit(Severity::Info, "History is empty"),
        },
        HistoryCommand::Remove { index } => {
            if let Removal::Removed(path) = history.clear_element(index)? {
                console::emit(Severity::Success, &format!("Removed {path}"));
            }
        }
        HistoryCommand::Clear => {
            history.clear_all()?;
            console::emit(Severity::Success, "History cleared");
        }
        HistoryCommand::Browse => {
            if let Some(path) = run_tui(history, settings)? {
                println!("{path}");
            }
        }
    }
    Ok(())
}

fn run_conf(cmd: ConfCommand, history: &mut HistoryCache) -> Result<(), Box<dyn std::error::Error>> {
    let conf_path = match cmd {
        ConfCommand::Show { path } => {
            let conf = wallconf::read_config(&path)?;
            println!("{}", path.display());
            for line in conf.summary() {
                println!("  {line}");
            }
            path
        }
        ConfCommand::Write {
            path,
            min_version,
            images,
            time,
            debug,
            static_wallpaper,
            reset,
        } => {
            let mut conf = if path.exists() {
                wallconf::read_config(&path)?
            } else {
                WallConf::default()
            };
            if reset {
                conf.clear();
            }
            if let Some(v) = min_version {
                conf.version = v;
            }
            if let Some(v) = images {
                conf.path = v;
            }
            if let Some(v) = time {
                conf.time = v;
            }
            if debug.is_some() {
                conf.debug = debug;
            }
            if let Some(v) = static_wallpaper {
                conf.static_wallpaper = v;
            }

            let canonical = paths::normalize(&path)?;
            wallconf::write_config(&conf, &canonical)?;
            console::emit(
                Severity::Success,
                &format!("Wrote {}", canonical.display()),
            );
            canonical
        }
    };

    // Remember it as the most recently used configuration
    let canonical = paths::normalize(&conf_path)?;
    let entry = history_entry(&canonical)?;
    history.set(entry)?;
    Ok(())
}

// The history stores text; a lossy conversion would record a path that does not exist.
fn history_entry(path: &Path) -> Result<&str, HistoryError> {
    path.to_str().ok_or_else(|| {
        HistoryError::InvalidArgument(format!(
            "{} is not valid UTF-8 and cannot be remembered",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_entry_keeps_utf8_paths() {
        assert_eq!(
            history_entry(Path::new("/etc/xawp/night.conf")).unwrap(),
            "/etc/xawp/night.conf"
        );
    }

    #[cfg(unix)]
    #[test]
    fn history_entry_rejects_non_utf8_paths() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"/etc/caf\xe9.conf"));
        assert!(matches!(
            history_entry(path),
            Err(HistoryError::InvalidArgument(_))
        ));
    }

    #[test]
    fn log_file_is_created_with_its_directory() {
        let dir = tempfile::tempdir().unwrap();
        let log_file = dir.path().join("logs/xawp.log");

        open_log_file(&log_file).unwrap();

        assert!(log_file.is_file());
    }

    #[test]
    fn unopenable_log_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();

        let err = open_log_file(dir.path()).unwrap_err();

        assert!(matches!(err, HistoryError::Io { .. }));
        assert!(err.to_string().contains(&dir.path().display().to_string()));
    }

    #[test]
    fn cli_flags_parse() {
        let args = Args::try_parse_from([
            "xawp", "--verbose", "conf", "write", "a.conf", "--min-version", "1.0", "--debug",
            "true", "--reset",
        ])
        .unwrap();

        assert!(args.verbose);
        match args.command {
            Command::Conf(ConfCommand::Write {
                min_version,
                debug,
                reset,
                ..
            }) => {
                assert_eq!(min_version.as_deref(), Some("1.0"));
                assert_eq!(debug, Some(true));
                assert!(reset);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
