//! Read queries for the catalog database.
//!
//! Provides period listing, filtered/paged entry reads, enrichment work
//! lists, the review and merge reports, and summary statistics.

use relsync_catalog::{CatalogEntry, Period};
use rusqlite::types::ToSql;
use rusqlite::{params, Connection};

use crate::operations::OperationError;

/// A stored catalog entry with its match bookkeeping.
#[derive(Debug, Clone)]
pub struct StoredEntry {
    pub entry: CatalogEntry,
    /// Label of the candidate that was selected, if any.
    pub match_label: Option<String>,
    pub match_tier: Option<String>,
    pub needs_review: bool,
    pub matched_at: Option<String>,
}

/// Year/month filter for entry listings. Either part may be omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl EntryFilter {
    pub fn period(period: Period) -> Self {
        Self {
            year: Some(period.year()),
            month: Some(period.month()),
        }
    }

    /// `WHERE` clause fragment and its single bound pattern.
    fn clause(&self) -> (&'static str, Option<String>) {
        match (self.year, self.month) {
            (Some(y), Some(m)) => ("WHERE period = ?1", Some(format!("{y:04}-{m:02}"))),
            (Some(y), None) => ("WHERE period LIKE ?1", Some(format!("{y:04}-%"))),
            (None, Some(m)) => ("WHERE period LIKE ?1", Some(format!("%-{m:02}"))),
            (None, None) => ("", None),
        }
    }
}

/// One page of entries plus the total count for the filter.
#[derive(Debug)]
pub struct EntryPage {
    pub entries: Vec<StoredEntry>,
    /// 1-based page number.
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

impl EntryPage {
    pub fn total_pages(&self) -> u32 {
        if self.per_page == 0 {
            return 0;
        }
        ((self.total.max(0) as u64).div_ceil(self.per_page as u64)) as u32
    }
}

const ENTRY_COLUMNS: &str = "period, title, publisher, size, link, annotation,
                             match_label, match_tier, needs_review, matched_at";

// ── Period Queries ──────────────────────────────────────────────────────────

/// All periods that have at least one entry, oldest first.
pub fn list_distinct_periods(conn: &Connection) -> Result<Vec<Period>, OperationError> {
    let mut stmt =
        conn.prepare("SELECT DISTINCT period FROM catalog_entries ORDER BY period")?;
    let rows = stmt.query_map([], |row| period_at(row, 0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Entry Queries ───────────────────────────────────────────────────────────

/// Page through entries in natural catalog order (`period`, `title`).
///
/// `page` is 1-based; page 0 is treated as page 1.
pub fn list_entries(
    conn: &Connection,
    filter: &EntryFilter,
    page: u32,
    per_page: u32,
) -> Result<EntryPage, OperationError> {
    let page = page.max(1);
    let (clause, pattern) = filter.clause();
    let bound: Vec<&dyn ToSql> = match &pattern {
        Some(p) => vec![p as &dyn ToSql],
        None => vec![],
    };

    let total: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM catalog_entries {clause}"),
        bound.as_slice(),
        |r| r.get(0),
    )?;

    let offset = (page as i64 - 1) * per_page as i64;
    let mut stmt = conn.prepare(&format!(
        "SELECT {ENTRY_COLUMNS} FROM catalog_entries {clause}
         ORDER BY period, title LIMIT {per_page} OFFSET {offset}"
    ))?;
    let rows = stmt.query_map(bound.as_slice(), row_to_stored_entry)?;
    let entries = rows.collect::<Result<Vec<_>, _>>()?;

    Ok(EntryPage {
        entries,
        page,
        per_page,
        total,
    })
}

/// Every entry matching the filter, unpaged.
pub fn all_entries(
    conn: &Connection,
    filter: &EntryFilter,
) -> Result<Vec<StoredEntry>, OperationError> {
    let (clause, pattern) = filter.clause();
    let bound: Vec<&dyn ToSql> = match &pattern {
        Some(p) => vec![p as &dyn ToSql],
        None => vec![],
    };
    let mut stmt = conn.prepare(&format!(
        "SELECT {ENTRY_COLUMNS} FROM catalog_entries {clause} ORDER BY period, title"
    ))?;
    let rows = stmt.query_map(bound.as_slice(), row_to_stored_entry)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Find one entry by its natural key.
pub fn find_entry(
    conn: &Connection,
    period: Period,
    title: &str,
) -> Result<Option<StoredEntry>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ENTRY_COLUMNS} FROM catalog_entries WHERE period = ?1 AND title = ?2"
    ))?;
    let result = stmt.query_row(params![period.to_string(), title], row_to_stored_entry);
    match result {
        Ok(e) => Ok(Some(e)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Entries the enrichment pass should visit.
///
/// Without `force`, entries that already have a link are skipped.
pub fn entries_to_enrich(
    conn: &Connection,
    filter: &EntryFilter,
    force: bool,
    limit: Option<u32>,
) -> Result<Vec<CatalogEntry>, OperationError> {
    let (clause, pattern) = filter.clause();
    let link_clause = match (force, clause.is_empty()) {
        (true, _) => "",
        (false, true) => "WHERE link IS NULL",
        (false, false) => "AND link IS NULL",
    };
    let limit_clause = limit.map(|l| format!("LIMIT {l}")).unwrap_or_default();
    let bound: Vec<&dyn ToSql> = match &pattern {
        Some(p) => vec![p as &dyn ToSql],
        None => vec![],
    };

    let mut stmt = conn.prepare(&format!(
        "SELECT {ENTRY_COLUMNS} FROM catalog_entries {clause} {link_clause}
         ORDER BY period, title {limit_clause}"
    ))?;
    let rows = stmt.query_map(bound.as_slice(), row_to_stored_entry)?;
    rows.map(|r| r.map(|s| s.entry))
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

/// Entries flagged for review (anomalous upload time).
pub fn list_review_entries(conn: &Connection) -> Result<Vec<StoredEntry>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ENTRY_COLUMNS} FROM catalog_entries WHERE needs_review = 1
         ORDER BY period, title"
    ))?;
    let rows = stmt.query_map([], row_to_stored_entry)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Dedup Merge Queries ─────────────────────────────────────────────────────

/// A recorded deduplication fold.
#[derive(Debug, Clone)]
pub struct MergeRow {
    pub period: Period,
    pub dropped_title: String,
    pub dropped_publisher: String,
    pub kept_title: String,
    pub created_at: String,
}

/// List recorded dedup folds, optionally for one period.
pub fn list_dedup_merges(
    conn: &Connection,
    period: Option<Period>,
) -> Result<Vec<MergeRow>, OperationError> {
    let (sql, bound) = match period {
        Some(p) => (
            "SELECT period, dropped_title, dropped_publisher, kept_title, created_at
             FROM dedup_merges WHERE period = ?1 ORDER BY period, kept_title, dropped_title",
            Some(p.to_string()),
        ),
        None => (
            "SELECT period, dropped_title, dropped_publisher, kept_title, created_at
             FROM dedup_merges ORDER BY period, kept_title, dropped_title",
            None,
        ),
    };
    let params: Vec<&dyn ToSql> = match &bound {
        Some(p) => vec![p as &dyn ToSql],
        None => vec![],
    };
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params.as_slice(), |row| {
        Ok(MergeRow {
            period: period_at(row, 0)?,
            dropped_title: row.get(1)?,
            dropped_publisher: row.get(2)?,
            kept_title: row.get(3)?,
            created_at: row.get(4)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Summary statistics for the catalog.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    pub periods: i64,
    pub entries: i64,
    pub linked: i64,
    /// Matched at some point but left without a link (no match or low-confidence fallback).
    pub unlinked_attempted: i64,
    pub never_attempted: i64,
    pub needs_review: i64,
    pub dedup_merges: i64,
}

/// Get overall catalog statistics.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let periods: i64 = conn.query_row(
        "SELECT COUNT(DISTINCT period) FROM catalog_entries",
        [],
        |r| r.get(0),
    )?;
    let entries: i64 = conn.query_row("SELECT COUNT(*) FROM catalog_entries", [], |r| r.get(0))?;
    let linked: i64 = conn.query_row(
        "SELECT COUNT(*) FROM catalog_entries WHERE link IS NOT NULL",
        [],
        |r| r.get(0),
    )?;
    let unlinked_attempted: i64 = conn.query_row(
        "SELECT COUNT(*) FROM catalog_entries WHERE link IS NULL AND matched_at IS NOT NULL",
        [],
        |r| r.get(0),
    )?;
    let never_attempted: i64 = conn.query_row(
        "SELECT COUNT(*) FROM catalog_entries WHERE matched_at IS NULL",
        [],
        |r| r.get(0),
    )?;
    let needs_review: i64 = conn.query_row(
        "SELECT COUNT(*) FROM catalog_entries WHERE needs_review = 1",
        [],
        |r| r.get(0),
    )?;
    let dedup_merges: i64 = conn.query_row("SELECT COUNT(*) FROM dedup_merges", [], |r| r.get(0))?;

    Ok(CatalogStats {
        periods,
        entries,
        linked,
        unlinked_attempted,
        never_attempted,
        needs_review,
        dedup_merges,
    })
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

fn period_at(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<Period> {
    let raw: String = row.get(idx)?;
    raw.parse::<Period>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })
}

fn row_to_stored_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredEntry> {
    Ok(StoredEntry {
        entry: CatalogEntry {
            period: period_at(row, 0)?,
            title: row.get(1)?,
            publisher: row.get(2)?,
            size: row.get(3)?,
            link: row.get(4)?,
            annotation: row.get(5)?,
        },
        match_label: row.get(6)?,
        match_tier: row.get(7)?,
        needs_review: row.get(8)?,
        matched_at: row.get(9)?,
    })
}
