//! Terminal logger for the `log` facade.
//!
//! Info lines print bare to stdout so command output reads like plain
//! `println!`. Warnings and errors go to stderr with a coloured prefix.
//! `--verbose` adds debug lines from the relsync crates, prefixed with a
//! timestamp. `--logfile` tees every emitted line to a file with ANSI codes
//! stripped.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use owo_colors::OwoColorize;
use owo_colors::Stream::{Stderr, Stdout};

use crate::CliError;

const OWN_TARGET_PREFIX: &str = "relsync";

pub(crate) struct CliLogger {
    level: LevelFilter,
    verbose: bool,
    file: Option<Mutex<File>>,
}

impl CliLogger {
    fn new(quiet: bool, verbose: bool, file: Option<File>) -> Self {
        let level = if quiet {
            LevelFilter::Warn
        } else if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        Self {
            level,
            verbose,
            file: file.map(Mutex::new),
        }
    }

    fn format_line(&self, record: &Record) -> String {
        let msg = record.args().to_string();
        let body = match record.level() {
            Level::Error => format!(
                "{} {}",
                "error:".if_supports_color(Stderr, |t| t.red()),
                msg
            ),
            Level::Warn => format!(
                "{} {}",
                "warning:".if_supports_color(Stderr, |t| t.yellow()),
                msg
            ),
            Level::Info => msg,
            Level::Debug | Level::Trace => format!(
                "{} {}",
                format!("[{}]", record.target()).if_supports_color(Stdout, |t| t.dimmed()),
                msg
            ),
        };
        if self.verbose {
            let ts = chrono::Local::now().format("%H:%M:%S%.3f");
            format!("{} {}", ts.if_supports_color(Stdout, |t| t.dimmed()), body)
        } else {
            body
        }
    }
}

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > self.level {
            return false;
        }
        // Dependencies only get through at warning level and above.
        metadata.level() <= Level::Warn || metadata.target().starts_with(OWN_TARGET_PREFIX)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = self.format_line(record);

        if record.level() <= Level::Warn {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }

        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let plain = strip_ansi_escapes::strip_str(&line);
                let _ = writeln!(f, "{plain}");
            }
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = f.flush();
            }
        }
    }
}

/// Install the CLI logger. Must be called once, before any logging.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let file = match logfile {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            Some(
                File::create(path)
                    .map_err(|e| CliError::other(format!("Cannot open log file {}: {e}", path.display())))?,
            )
        }
        None => None,
    };

    let logger = CliLogger::new(quiet, verbose, file);
    let level = logger.level;
    log::set_boxed_logger(Box::new(logger))
        .map_err(|e| CliError::runtime(format!("Failed to install logger: {e}")))?;
    log::set_max_level(level);
    Ok(())
}

/// Print an empty line at info level.
pub(crate) fn log_blank() {
    log::info!("");
}
