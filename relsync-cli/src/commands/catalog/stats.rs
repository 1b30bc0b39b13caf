use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::open_existing;

pub(crate) fn run_catalog_stats(db_path: &Path) -> Result<(), CliError> {
    let Some(conn) = open_existing(db_path)? else {
        return Ok(());
    };

    let stats = relsync_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;

    log::info!(
        "{}",
        "Catalog Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Months:          {:>8}", stats.periods);
    log::info!("  Entries:         {:>8}", stats.entries);
    log::info!("  Linked:          {:>8}", stats.linked);
    log::info!("  Unlinked:        {:>8} (searched)", stats.unlinked_attempted);
    log::info!("  Never searched:  {:>8}", stats.never_attempted);
    log::info!("  Needs review:    {:>8}", stats.needs_review);
    log::info!("  Dedup merges:    {:>8}", stats.dedup_merges);

    Ok(())
}
