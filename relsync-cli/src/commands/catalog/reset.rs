use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// SQLite side files that belong to the database.
fn companion_files(db_path: &Path) -> Vec<PathBuf> {
    ["-wal", "-shm"]
        .iter()
        .map(|suffix| {
            let mut name = db_path.as_os_str().to_owned();
            name.push(suffix);
            PathBuf::from(name)
        })
        .collect()
}

/// Delete the catalog database.
pub(crate) fn run_catalog_reset(db_path: &Path, confirm: bool) -> Result<(), CliError> {
    if !confirm {
        log::warn!(
            "This will permanently delete the catalog database at:\n  {}",
            db_path.display(),
        );
        log::info!("Re-run with --confirm to proceed:");
        log::info!("  relsync catalog reset --confirm");
        return Ok(());
    }

    if !db_path.exists() {
        log::info!("No catalog database found at {}", db_path.display());
        log::info!("Nothing to reset.");
        return Ok(());
    }

    let file_size = std::fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);

    std::fs::remove_file(db_path)
        .map_err(|e| CliError::other(format!("Failed to delete {}: {}", db_path.display(), e)))?;
    for side in companion_files(db_path) {
        if side.exists() {
            std::fs::remove_file(&side).map_err(|e| {
                CliError::other(format!("Failed to delete {}: {}", side.display(), e))
            })?;
        }
    }

    let size_mb = file_size as f64 / (1024.0 * 1024.0);
    log::info!(
        "{}",
        "Catalog database deleted.".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Path: {}", db_path.display());
    log::info!("  Freed: {:.1} MB", size_mb);
    crate::log_blank();
    log::info!("Run 'relsync catalog sync --from YYYY-MM' to rebuild.");

    Ok(())
}
