use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use relsync_catalog::Period;

use crate::CliError;

use super::open_existing;

/// Show which titles deduplication folded into which survivors.
pub(crate) fn run_catalog_merges(db_path: &Path, period: Option<Period>) -> Result<(), CliError> {
    let Some(conn) = open_existing(db_path)? else {
        return Ok(());
    };

    let merges = relsync_db::list_dedup_merges(&conn, period)
        .map_err(|e| CliError::database(format!("Failed to list merges: {}", e)))?;

    if merges.is_empty() {
        log::info!("No merges recorded.");
        return Ok(());
    }

    let mut current = None;
    for merge in &merges {
        if current != Some(merge.period) {
            current = Some(merge.period);
            log::info!(
                "{}:",
                merge.period.if_supports_color(Stdout, |t| t.bold()),
            );
        }
        log::info!(
            "  {} {}",
            merge.dropped_title,
            format!("-> {}", merge.kept_title).if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    crate::log_blank();
    log::info!("{} merges", merges.len());
    Ok(())
}
