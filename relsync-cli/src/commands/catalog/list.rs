use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use relsync_db::{EntryFilter, StoredEntry};

use crate::CliError;

use super::{open_existing, truncate_str};

const TITLE_WIDTH: usize = 44;
const PUBLISHER_WIDTH: usize = 20;

/// Print one page of catalog entries, oldest month first.
pub(crate) fn run_catalog_list(
    db_path: &Path,
    year: Option<i32>,
    month: Option<u32>,
    page: u32,
    per_page: u32,
) -> Result<(), CliError> {
    let Some(conn) = open_existing(db_path)? else {
        return Ok(());
    };

    let filter = EntryFilter { year, month };
    let listing = relsync_db::list_entries(&conn, &filter, page, per_page)
        .map_err(|e| CliError::database(format!("Failed to list entries: {}", e)))?;

    if listing.total == 0 {
        log::info!("No entries match.");
        return Ok(());
    }

    log::info!(
        "  {:<7}  {:<title$}  {:<pubw$}  {:>10}  {}",
        "Month".if_supports_color(Stdout, |t| t.bold()),
        "Title".if_supports_color(Stdout, |t| t.bold()),
        "Publisher".if_supports_color(Stdout, |t| t.bold()),
        "Size".if_supports_color(Stdout, |t| t.bold()),
        "Link".if_supports_color(Stdout, |t| t.bold()),
        title = TITLE_WIDTH,
        pubw = PUBLISHER_WIDTH,
    );
    for stored in &listing.entries {
        log::info!("{}", format_row(stored));
    }

    crate::log_blank();
    log::info!(
        "  Page {} of {} ({} entries)",
        listing.page,
        listing.total_pages(),
        listing.total,
    );
    if listing.page < listing.total_pages() {
        log::info!(
            "  {}",
            format!("Next: --page {}", listing.page + 1).if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

fn format_row(stored: &StoredEntry) -> String {
    let entry = &stored.entry;
    let link = match (&entry.link, stored.needs_review) {
        (Some(_), true) => format!("{}", "review".if_supports_color(Stdout, |t| t.yellow())),
        (Some(_), false) => format!("{}", "yes".if_supports_color(Stdout, |t| t.green())),
        (None, _) => format!("{}", "-".if_supports_color(Stdout, |t| t.dimmed())),
    };
    format!(
        "  {:<7}  {:<title$}  {:<pubw$}  {:>10}  {}",
        entry.period.to_string(),
        truncate_str(&entry.title, TITLE_WIDTH),
        truncate_str(&entry.publisher, PUBLISHER_WIDTH),
        entry.size.as_deref().unwrap_or(""),
        link,
        title = TITLE_WIDTH,
        pubw = PUBLISHER_WIDTH,
    )
}
