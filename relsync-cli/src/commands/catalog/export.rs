use std::path::Path;

use relsync_db::{EntryFilter, StoredEntry};
use serde::Serialize;

use crate::CliError;

use super::open_existing;

/// One CSV line per catalog entry.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    period: String,
    title: &'a str,
    publisher: &'a str,
    size: &'a str,
    link: &'a str,
    annotation: &'a str,
    match_tier: &'a str,
    needs_review: bool,
}

impl<'a> From<&'a StoredEntry> for ExportRow<'a> {
    fn from(stored: &'a StoredEntry) -> Self {
        let entry = &stored.entry;
        Self {
            period: entry.period.to_string(),
            title: &entry.title,
            publisher: &entry.publisher,
            size: entry.size.as_deref().unwrap_or(""),
            link: entry.link.as_deref().unwrap_or(""),
            annotation: entry.annotation.as_deref().unwrap_or(""),
            match_tier: stored.match_tier.as_deref().unwrap_or(""),
            needs_review: stored.needs_review,
        }
    }
}

pub(crate) fn write_csv<W: std::io::Write>(
    entries: &[StoredEntry],
    out: W,
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    for stored in entries {
        writer.serialize(ExportRow::from(stored))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the catalog (optionally one year of it) to a CSV file.
pub(crate) fn run_catalog_export(
    db_path: &Path,
    out: &Path,
    year: Option<i32>,
) -> Result<(), CliError> {
    let Some(conn) = open_existing(db_path)? else {
        return Ok(());
    };

    let entries = relsync_db::all_entries(&conn, &EntryFilter { year, month: None })
        .map_err(|e| CliError::database(format!("Failed to read entries: {}", e)))?;

    let file = std::fs::File::create(out)?;
    write_csv(&entries, file)
        .map_err(|e| CliError::other(format!("Failed to write {}: {}", out.display(), e)))?;

    log::info!("Exported {} entries to {}", entries.len(), out.display());
    Ok(())
}
