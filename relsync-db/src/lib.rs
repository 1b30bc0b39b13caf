//! SQLite persistence layer for the release catalog.
//!
//! Provides schema creation, batch upserts, match application and the
//! read queries behind the CLI reports, backed by SQLite (via rusqlite
//! with the bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    apply_match_result, clear_enrichment, insert_fetch_log, persist_catalog_batch,
    persist_period, record_dedup_merges, BatchStats, FetchCounts, OperationError,
};
pub use queries::{
    all_entries, catalog_stats, entries_to_enrich, find_entry, list_dedup_merges,
    list_distinct_periods, list_entries, list_review_entries, CatalogStats, EntryFilter,
    EntryPage, MergeRow, StoredEntry,
};
pub use rusqlite::Connection;
pub use schema::{open_database, open_memory, SchemaError};
