//! Enrich stored entries with a link from the search index.
//!
//! For each entry needing a link, searches the index, picks a candidate
//! with the [`Matcher`], and writes the outcome back. Searches run one at a
//! time; pacing is the search client's job.

use std::sync::atomic::{AtomicBool, Ordering};

use relsync_catalog::{MatchResult, MatchTier, Matcher, Period};
use relsync_db::{operations, queries, EntryFilter};
use relsync_fetch::search_query;
use rusqlite::Connection;
use tokio::sync::mpsc::UnboundedSender;

use crate::error::SyncError;
use crate::source::SearchSource;

/// Stop after this many searches fail in a row; the index is likely down.
const CIRCUIT_BREAKER_THRESHOLD: u32 = 10;

/// Options for the enrichment pass.
#[derive(Debug, Clone, Default)]
pub struct EnrichOptions {
    /// Which entries to consider.
    pub filter: EntryFilter,
    /// Re-match entries that already have a link.
    pub force: bool,
    /// Maximum entries to process.
    pub limit: Option<u32>,
    /// Put the publisher in front of the title in search queries.
    pub include_publisher: bool,
}

/// Statistics from an enrichment run.
#[derive(Debug, Default, Clone)]
pub struct EnrichStats {
    pub processed: u64,
    /// Matched with a link.
    pub linked: u64,
    /// Matched by the last-resort fallback; size only, no link.
    pub fallback: u64,
    /// Matched, but uploaded before the entry's period began.
    pub anomalous: u64,
    pub not_found: u64,
    pub errors: u64,
    pub cancelled: bool,
}

/// Events emitted during enrichment for real-time progress reporting.
#[derive(Debug)]
pub enum EnrichEvent {
    Started {
        total: usize,
    },
    EntryMatched {
        index: usize,
        period: Period,
        title: String,
        label: String,
        tier: MatchTier,
        anomalous: bool,
    },
    EntryNotFound {
        index: usize,
        period: Period,
        title: String,
    },
    EntryError {
        index: usize,
        title: String,
        error: String,
    },
    FatalError {
        message: String,
    },
    Cancelled,
    Done {
        stats: EnrichStats,
    },
}

/// Search, select and apply a match for every entry the options select.
pub async fn enrich_entries<S: SearchSource>(
    source: &S,
    conn: &Connection,
    matcher: &Matcher,
    options: &EnrichOptions,
    cancel: &AtomicBool,
    events: &UnboundedSender<EnrichEvent>,
) -> Result<EnrichStats, SyncError> {
    let mut stats = EnrichStats::default();

    let entries = queries::entries_to_enrich(conn, &options.filter, options.force, options.limit)?;
    let total = entries.len();
    let _ = events.send(EnrichEvent::Started { total });
    if entries.is_empty() {
        log::debug!("No entries to enrich");
    }

    let mut consecutive_errors: u32 = 0;

    for (index, entry) in entries.into_iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            stats.cancelled = true;
            let _ = events.send(EnrichEvent::Cancelled);
            break;
        }

        let query = search_query(&entry, options.include_publisher);
        let candidates = match source.search_candidates(&query).await {
            Ok(c) => {
                consecutive_errors = 0;
                c
            }
            Err(e) => {
                consecutive_errors += 1;
                stats.processed += 1;
                stats.errors += 1;
                log::debug!("Search for '{}' failed: {}", entry.title, e);
                let _ = events.send(EnrichEvent::EntryError {
                    index,
                    title: entry.title.clone(),
                    error: e.to_string(),
                });

                if consecutive_errors >= CIRCUIT_BREAKER_THRESHOLD {
                    let message = format!(
                        "Circuit breaker: {consecutive_errors} consecutive search errors, stopping"
                    );
                    log::debug!("{message}");
                    let _ = events.send(EnrichEvent::FatalError { message });
                    break;
                }
                continue;
            }
        };

        let result = matcher.select(&entry, &candidates);
        operations::apply_match_result(conn, entry.period, &entry.title, &result)?;
        stats.processed += 1;

        match &result {
            MatchResult::NoMatch => {
                stats.not_found += 1;
                let _ = events.send(EnrichEvent::EntryNotFound {
                    index,
                    period: entry.period,
                    title: entry.title,
                });
            }
            MatchResult::Confirmed(selection) | MatchResult::ConfirmedAnomalous { selection, .. } => {
                let anomalous = result.is_anomalous();
                if anomalous {
                    stats.anomalous += 1;
                }
                if selection.locator.is_some() {
                    stats.linked += 1;
                } else {
                    stats.fallback += 1;
                }
                log::debug!(
                    "'{}' matched '{}' ({})",
                    entry.title,
                    selection.label,
                    selection.tier.as_str()
                );
                let _ = events.send(EnrichEvent::EntryMatched {
                    index,
                    period: entry.period,
                    title: entry.title,
                    label: selection.label.clone(),
                    tier: selection.tier,
                    anomalous,
                });
            }
        }
    }

    let _ = events.send(EnrichEvent::Done {
        stats: stats.clone(),
    });
    Ok(stats)
}
