use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::open_existing;

/// Show matches whose upload predates the release month.
pub(crate) fn run_catalog_review(db_path: &Path) -> Result<(), CliError> {
    let Some(conn) = open_existing(db_path)? else {
        return Ok(());
    };

    let entries = relsync_db::list_review_entries(&conn)
        .map_err(|e| CliError::database(format!("Failed to list review entries: {}", e)))?;

    if entries.is_empty() {
        log::info!("No matches need review.");
        return Ok(());
    }

    log::info!(
        "{}",
        format!("{} matches need review", entries.len()).if_supports_color(Stdout, |t| t.bold()),
    );
    for stored in &entries {
        let entry = &stored.entry;
        crate::log_blank();
        log::info!(
            "  {} {} {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            entry.period,
            entry.title.if_supports_color(Stdout, |t| t.bold()),
        );
        if let Some(label) = &stored.match_label {
            log::info!("    Matched:  {}", label);
        }
        if let Some(note) = &entry.annotation {
            log::info!("    Uploaded: {}", note);
        }
        if let Some(tier) = &stored.match_tier {
            log::info!(
                "    Tier:     {}",
                tier.if_supports_color(Stdout, |t| t.dimmed())
            );
        }
    }
    Ok(())
}
