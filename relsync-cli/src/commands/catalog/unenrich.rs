use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use relsync_catalog::Period;

use crate::CliError;

use super::open_existing;

/// Clear match results for one month, or the whole catalog.
pub(crate) fn run_catalog_unenrich(
    db_path: &Path,
    period: Option<Period>,
    confirm: bool,
) -> Result<(), CliError> {
    let scope = match period {
        Some(p) => format!("entries from {p}"),
        None => "all entries".to_string(),
    };

    if !confirm {
        log::warn!("This will clear size, link and review state for {scope}.");
        log::info!("Re-run with --confirm to proceed.");
        return Ok(());
    }

    let Some(conn) = open_existing(db_path)? else {
        return Ok(());
    };

    let cleared = relsync_db::clear_enrichment(&conn, period)
        .map_err(|e| CliError::database(format!("Failed to clear matches: {}", e)))?;

    log::info!(
        "{} {} ({})",
        "Cleared".if_supports_color(Stdout, |t| t.bold()),
        scope,
        cleared,
    );
    log::info!("Run 'relsync catalog enrich' to search them again.");
    Ok(())
}
