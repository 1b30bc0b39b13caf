use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::settings::{settings_path, Settings};
use crate::CliError;

/// Show the effective settings and where they came from.
pub(crate) fn run_config_show(settings: &Settings, db_override: Option<PathBuf>) -> Result<(), CliError> {
    let path = settings_path();

    log::info!(
        "{}",
        "relsync Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!(
        "  Database:      {}",
        settings
            .database_path(db_override)
            .display()
            .if_supports_color(Stdout, |t| t.cyan()),
    );
    crate::log_blank();

    let rendered = settings
        .to_toml()
        .map_err(|e| CliError::config(format!("Failed to render settings: {}", e)))?;
    for line in rendered.lines() {
        log::info!("  {line}");
    }
    Ok(())
}

pub(crate) fn run_config_path() -> Result<(), CliError> {
    println!("{}", settings_path().display());
    Ok(())
}

/// Write a settings file populated with defaults.
pub(crate) fn run_config_init(force: bool) -> Result<(), CliError> {
    let path = settings_path();
    if path.exists() && !force {
        log::warn!("Settings file already exists at {}", path.display());
        log::info!("Re-run with --force to overwrite it.");
        return Ok(());
    }

    Settings::default()
        .save(&path)
        .map_err(|e| CliError::config(format!("Failed to write {}: {}", path.display(), e)))?;

    log::info!(
        "{} {}",
        "Wrote default settings to".if_supports_color(Stdout, |t| t.green()),
        path.display(),
    );
    Ok(())
}
