//! Walk a range of periods: fetch listings, normalize, deduplicate, persist.

use std::sync::atomic::{AtomicBool, Ordering};

use relsync_catalog::{deduplicate_with_report, CatalogEntry, CatalogError, NoiseFilter, Period};
use relsync_db::{operations, BatchStats, FetchCounts};
use rusqlite::Connection;
use tokio::sync::mpsc::UnboundedSender;

use crate::error::SyncError;
use crate::source::ListingSource;

/// Statistics from a sync run.
#[derive(Debug, Default, Clone)]
pub struct SyncStats {
    pub periods_synced: u64,
    pub periods_empty: u64,
    pub periods_failed: u64,
    pub rows_fetched: u64,
    pub rows_rejected: u64,
    pub entries_merged: u64,
    pub entries_inserted: u64,
    pub entries_updated: u64,
    pub cancelled: bool,
}

/// Events emitted during a sync for real-time progress reporting.
#[derive(Debug)]
pub enum SyncEvent {
    Started {
        total: usize,
    },
    PeriodStarted {
        index: usize,
        period: Period,
    },
    PeriodEmpty {
        index: usize,
        period: Period,
    },
    PeriodDone {
        index: usize,
        period: Period,
        counts: FetchCounts,
        batch: BatchStats,
    },
    PeriodError {
        index: usize,
        period: Period,
        error: String,
    },
    Cancelled,
    Done {
        stats: SyncStats,
    },
}

/// Every period from `from` through `to`, inclusive.
pub fn period_range(from: Period, to: Period) -> Result<Vec<Period>, SyncError> {
    if from > to {
        let msg = format!("range start {from} is after end {to}");
        return Err(CatalogError::InvalidPeriod(msg).into());
    }
    Ok(from.range_inclusive(to))
}

/// Fetch, clean and persist every period in `periods`, in order.
///
/// A failed fetch is reported and skipped so later months still sync.
/// Database errors abort the run. Each period's entries, merge records and
/// fetch log line are written in one transaction, so stopping early keeps
/// the months already done and never half of one.
pub async fn sync_periods<S: ListingSource>(
    source: &S,
    conn: &Connection,
    filter: &NoiseFilter,
    periods: &[Period],
    cancel: &AtomicBool,
    events: &UnboundedSender<SyncEvent>,
) -> Result<SyncStats, SyncError> {
    let mut stats = SyncStats::default();
    let _ = events.send(SyncEvent::Started {
        total: periods.len(),
    });

    for (index, &period) in periods.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            stats.cancelled = true;
            let _ = events.send(SyncEvent::Cancelled);
            break;
        }
        let _ = events.send(SyncEvent::PeriodStarted { index, period });

        let rows = match source.fetch_catalog_page(period).await {
            Ok(rows) => rows,
            Err(e) => {
                log::debug!("Fetching {period} failed: {e}");
                stats.periods_failed += 1;
                let _ = events.send(SyncEvent::PeriodError {
                    index,
                    period,
                    error: e.to_string(),
                });
                continue;
            }
        };

        if rows.is_empty() {
            stats.periods_empty += 1;
            operations::insert_fetch_log(conn, period, &FetchCounts::default())?;
            let _ = events.send(SyncEvent::PeriodEmpty { index, period });
            continue;
        }

        let mut counts = FetchCounts {
            fetched: rows.len(),
            ..FetchCounts::default()
        };
        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            match CatalogEntry::from_raw(period, row) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    log::warn!("{e}");
                    counts.rejected += 1;
                }
            }
        }

        filter.normalize_entries(&mut entries);
        let deduped = deduplicate_with_report(entries);
        counts.kept = deduped.entries.len();
        counts.merged = deduped.merges.len();
        for merge in &deduped.merges {
            log::debug!(
                "{period}: '{}' folded into '{}'",
                merge.dropped.title,
                merge.kept_title
            );
        }

        let batch = operations::persist_period(conn, period, &deduped, &counts)?;

        stats.periods_synced += 1;
        stats.rows_fetched += counts.fetched as u64;
        stats.rows_rejected += counts.rejected as u64;
        stats.entries_merged += counts.merged as u64;
        stats.entries_inserted += batch.inserted as u64;
        stats.entries_updated += batch.updated as u64;

        let _ = events.send(SyncEvent::PeriodDone {
            index,
            period,
            counts,
            batch,
        });
    }

    let _ = events.send(SyncEvent::Done {
        stats: stats.clone(),
    });
    Ok(stats)
}
