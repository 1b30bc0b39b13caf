//! Batch deduplication of catalog rows.
//!
//! Listing sites publish the same release several times with a trailing
//! qualifier ("Foo", "Foo 豪華版", "Foo DL"). Within one batch, a row whose
//! title, or whose title minus its last word, matches an already kept title
//! is folded into that earlier row.
//!
//! The rule is a heuristic: two distinct releases from one publisher that
//! share everything but a final word are merged too. Every fold is reported
//! in [`Deduplicated::merges`] so such cases can be reviewed.

use std::collections::HashSet;

use crate::types::CatalogEntry;

/// One row dropped by deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupMerge {
    /// The dropped row.
    pub dropped: CatalogEntry,
    /// Title of the kept row that absorbed it.
    pub kept_title: String,
}

/// Output of [`deduplicate_with_report`].
#[derive(Debug, Clone, Default)]
pub struct Deduplicated {
    /// Surviving rows, ordered by `(period, title)`.
    pub entries: Vec<CatalogEntry>,
    pub merges: Vec<DedupMerge>,
}

/// Title with its final whitespace-delimited word removed.
///
/// Leading and trailing whitespace is ignored. Returns the title unchanged
/// when it has no internal whitespace.
pub fn stem(title: &str) -> &str {
    match title.trim().rsplit_once(char::is_whitespace) {
        Some((head, _)) => head.trim_end(),
        None => title,
    }
}

/// Collapse qualifier-only duplicates within one batch.
pub fn deduplicate(entries: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
    deduplicate_with_report(entries).entries
}

/// Collapse qualifier-only duplicates and report which rows were folded.
pub fn deduplicate_with_report(mut entries: Vec<CatalogEntry>) -> Deduplicated {
    // Shorter titles first within a publisher, so a bare title is always
    // kept before its suffixed variants are visited.
    entries.sort_by(|a, b| {
        a.publisher
            .cmp(&b.publisher)
            .then_with(|| a.title.chars().count().cmp(&b.title.chars().count()))
            .then_with(|| a.title.cmp(&b.title))
    });

    let mut seen: HashSet<String> = HashSet::new();
    let mut kept = Vec::with_capacity(entries.len());
    let mut merges = Vec::new();

    for entry in entries {
        let stem = stem(&entry.title);
        let absorbed_by = if seen.contains(entry.title.as_str()) {
            Some(entry.title.clone())
        } else if seen.contains(stem) {
            Some(stem.to_string())
        } else {
            None
        };

        match absorbed_by {
            Some(kept_title) => merges.push(DedupMerge {
                dropped: entry,
                kept_title,
            }),
            None => {
                seen.insert(entry.title.clone());
                kept.push(entry);
            }
        }
    }

    kept.sort_by(|a, b| a.period.cmp(&b.period).then_with(|| a.title.cmp(&b.title)));

    Deduplicated {
        entries: kept,
        merges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_drops_last_word() {
        assert_eq!(stem("Foo Deluxe Edition"), "Foo Deluxe");
        assert_eq!(stem("Foo"), "Foo");
        assert_eq!(stem("Foo Bar  "), "Foo");
        assert_eq!(stem("Foo  Bar"), "Foo");
        assert_eq!(stem(" Foo Bar"), "Foo");
    }

    #[test]
    fn stem_ignores_edge_whitespace_without_inner_space() {
        assert_eq!(stem(" Foo"), " Foo");
        assert_eq!(stem("Foo "), "Foo ");
        assert_eq!(stem(""), "");
    }

    #[test]
    fn stem_splits_on_ideographic_space() {
        assert_eq!(stem("美少女万華鏡\u{3000}DL版"), "美少女万華鏡");
    }
}
