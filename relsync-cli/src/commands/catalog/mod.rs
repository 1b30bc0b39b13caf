pub(crate) mod enrich;
pub(crate) mod export;
pub(crate) mod list;
pub(crate) mod merges;
pub(crate) mod periods;
pub(crate) mod reset;
pub(crate) mod review;
pub(crate) mod stats;
pub(crate) mod sync;
pub(crate) mod unenrich;

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use relsync_db::Connection;

use crate::CliError;

/// Open an existing catalog database.
///
/// Returns `Ok(None)` (after telling the user how to create one) when the
/// file does not exist, so read-only commands don't leave an empty file.
pub(crate) fn open_existing(db_path: &Path) -> Result<Option<Connection>, CliError> {
    if !db_path.exists() {
        log::warn!("No catalog database found at {}", db_path.display());
        log::info!("Run 'relsync catalog sync --from YYYY-MM' to create one.");
        return Ok(None);
    }
    open_or_create(db_path).map(Some)
}

/// Open the catalog database, creating it if needed.
pub(crate) fn open_or_create(db_path: &Path) -> Result<Connection, CliError> {
    relsync_db::open_database(db_path)
        .map_err(|e| CliError::database(format!("Failed to open catalog database: {}", e)))
}

/// Build a multi-threaded tokio runtime for the network passes.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))
}

/// Raise the returned flag on Ctrl-C. Must be called inside a runtime.
pub(crate) fn install_cancel_handler() -> Arc<AtomicBool> {
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, finishing the current item...");
            flag.store(true, Ordering::Relaxed);
        }
    });
    cancel
}

/// Truncate a string to at most `max` characters, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate_str("美少女万華鏡", 10), "美少女万華鏡");
        assert_eq!(truncate_str("美少女万華鏡 -罪と罰の少女-", 8), "美少女万華...");
        assert_eq!(truncate_str("abcdef", 2), "ab");
    }
}
