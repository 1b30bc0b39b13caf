use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use relsync_db::EntryFilter;

use crate::CliError;

use super::open_existing;

/// List every month held in the catalog with its entry count.
pub(crate) fn run_catalog_periods(db_path: &Path) -> Result<(), CliError> {
    let Some(conn) = open_existing(db_path)? else {
        return Ok(());
    };

    let periods = relsync_db::list_distinct_periods(&conn)
        .map_err(|e| CliError::database(format!("Failed to list months: {}", e)))?;

    if periods.is_empty() {
        log::info!("The catalog is empty.");
        return Ok(());
    }

    let mut current_year = None;
    for period in &periods {
        if current_year != Some(period.year()) {
            current_year = Some(period.year());
            log::info!(
                "{}:",
                period.year().if_supports_color(Stdout, |t| t.bold()),
            );
        }
        let page = relsync_db::list_entries(&conn, &EntryFilter::period(*period), 1, 1)
            .map_err(|e| CliError::database(format!("Failed to count {}: {}", period, e)))?;
        log::info!("  {}  {:>5} entries", period, page.total);
    }

    crate::log_blank();
    log::info!("{} months", periods.len());
    Ok(())
}
