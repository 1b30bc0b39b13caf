//! Write operations: batch upserts, match application, merge and fetch logs.

use relsync_catalog::{
    CatalogEntry, DedupMerge, Deduplicated, MatchResult, Period, Selection, TIMESTAMP_FORMAT,
};
use rusqlite::{params, Connection};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entry not found: '{title}' in {period}")]
    NotFound { period: String, title: String },
    #[error("Entry '{title}' belongs to {found}, not batch period {expected}")]
    PeriodMismatch {
        expected: String,
        found: String,
        title: String,
    },
}

/// Counts from persisting one batch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchStats {
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
}

// ── Catalog Entries ─────────────────────────────────────────────────────────

/// Upsert a deduplicated batch keyed by `(period, title)`.
///
/// Existing rows keep their enrichment; only a changed publisher is written.
/// The whole batch is applied in one transaction.
pub fn persist_catalog_batch(
    conn: &Connection,
    period: Period,
    entries: &[CatalogEntry],
) -> Result<BatchStats, OperationError> {
    let tx = conn.unchecked_transaction()?;
    let stats = upsert_entries(&tx, period, entries)?;
    tx.commit()?;
    Ok(stats)
}

/// Write one synced period in a single transaction: the surviving entries,
/// the rows deduplication folded away, and the fetch log line.
///
/// Nothing is written if any of the three fails.
pub fn persist_period(
    conn: &Connection,
    period: Period,
    batch: &Deduplicated,
    counts: &FetchCounts,
) -> Result<BatchStats, OperationError> {
    let tx = conn.unchecked_transaction()?;
    let stats = upsert_entries(&tx, period, &batch.entries)?;
    record_dedup_merges(&tx, period, &batch.merges)?;
    insert_fetch_log(&tx, period, counts)?;
    tx.commit()?;
    Ok(stats)
}

fn upsert_entries(
    conn: &Connection,
    period: Period,
    entries: &[CatalogEntry],
) -> Result<BatchStats, OperationError> {
    if let Some(stray) = entries.iter().find(|e| e.period != period) {
        return Err(OperationError::PeriodMismatch {
            expected: period.to_string(),
            found: stray.period.to_string(),
            title: stray.title.clone(),
        });
    }

    let mut stats = BatchStats::default();
    let period_str = period.to_string();

    for entry in entries {
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO catalog_entries (period, title, publisher)
             VALUES (?1, ?2, ?3)",
            params![period_str, entry.title, entry.publisher],
        )?;
        if inserted > 0 {
            stats.inserted += 1;
            continue;
        }

        let updated = conn.execute(
            "UPDATE catalog_entries SET publisher = ?3, updated_at = datetime('now')
             WHERE period = ?1 AND title = ?2 AND publisher != ?3",
            params![period_str, entry.title, entry.publisher],
        )?;
        if updated > 0 {
            stats.updated += 1;
        } else {
            stats.unchanged += 1;
        }
    }

    Ok(stats)
}

/// Write a match outcome onto a stored entry.
///
/// - `Confirmed`: size, link and label set; annotation and review flag cleared.
/// - `ConfirmedAnomalous`: as above, plus the observed upload time as the
///   annotation and the review flag set.
/// - `NoMatch`: all enrichment cleared.
pub fn apply_match_result(
    conn: &Connection,
    period: Period,
    title: &str,
    result: &MatchResult,
) -> Result<(), OperationError> {
    let period_str = period.to_string();
    let changed = match result {
        MatchResult::Confirmed(selection) => {
            write_selection(conn, &period_str, title, selection, None)?
        }
        MatchResult::ConfirmedAnomalous {
            selection,
            observed,
        } => {
            let annotation = observed.format(TIMESTAMP_FORMAT).to_string();
            write_selection(conn, &period_str, title, selection, Some(&annotation))?
        }
        MatchResult::NoMatch => conn.execute(
            "UPDATE catalog_entries SET
                 size = NULL, link = NULL, annotation = NULL,
                 match_label = NULL, match_tier = NULL, needs_review = 0,
                 matched_at = datetime('now'), updated_at = datetime('now')
             WHERE period = ?1 AND title = ?2",
            params![period_str, title],
        )?,
    };

    if changed == 0 {
        return Err(OperationError::NotFound {
            period: period_str,
            title: title.to_string(),
        });
    }
    Ok(())
}

fn write_selection(
    conn: &Connection,
    period: &str,
    title: &str,
    selection: &Selection,
    annotation: Option<&str>,
) -> Result<usize, OperationError> {
    let changed = conn.execute(
        "UPDATE catalog_entries SET
             size = ?3, link = ?4, annotation = ?5,
             match_label = ?6, match_tier = ?7, needs_review = ?8,
             matched_at = datetime('now'), updated_at = datetime('now')
         WHERE period = ?1 AND title = ?2",
        params![
            period,
            title,
            selection.size,
            selection.locator,
            annotation,
            selection.label,
            selection.tier.as_str(),
            annotation.is_some(),
        ],
    )?;
    Ok(changed)
}

/// Clear enrichment for every entry in a period, or all periods when `None`.
/// Returns the number of rows touched.
pub fn clear_enrichment(conn: &Connection, period: Option<Period>) -> Result<usize, OperationError> {
    let sql = "UPDATE catalog_entries SET
                   size = NULL, link = NULL, annotation = NULL,
                   match_label = NULL, match_tier = NULL, needs_review = 0,
                   matched_at = NULL, updated_at = datetime('now')";
    let changed = match period {
        Some(p) => conn.execute(
            &format!("{sql} WHERE period = ?1"),
            params![p.to_string()],
        )?,
        None => conn.execute(sql, [])?,
    };
    Ok(changed)
}

// ── Dedup Merges ────────────────────────────────────────────────────────────

/// Record rows folded away by deduplication. Re-recording the same fold is a no-op.
pub fn record_dedup_merges(
    conn: &Connection,
    period: Period,
    merges: &[DedupMerge],
) -> Result<usize, OperationError> {
    let period_str = period.to_string();
    let mut recorded = 0;
    for merge in merges {
        recorded += conn.execute(
            "INSERT INTO dedup_merges (period, dropped_title, dropped_publisher, kept_title)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(period, dropped_title, dropped_publisher) DO UPDATE SET
                 kept_title = excluded.kept_title",
            params![
                period_str,
                merge.dropped.title,
                merge.dropped.publisher,
                merge.kept_title,
            ],
        )?;
    }
    Ok(recorded)
}

// ── Fetch Log ───────────────────────────────────────────────────────────────

/// Row counts for one listing fetch.
#[derive(Debug, Default, Clone)]
pub struct FetchCounts {
    pub fetched: usize,
    pub kept: usize,
    pub merged: usize,
    pub rejected: usize,
}

/// Record a listing fetch. Returns the new row ID.
pub fn insert_fetch_log(
    conn: &Connection,
    period: Period,
    counts: &FetchCounts,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO fetch_log (period, fetched_at, rows_fetched, rows_kept, rows_merged, rows_rejected)
         VALUES (?1, datetime('now'), ?2, ?3, ?4, ?5)",
        params![
            period.to_string(),
            counts.fetched as i64,
            counts.kept as i64,
            counts.merged as i64,
            counts.rejected as i64,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
