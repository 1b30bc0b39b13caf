use relsync_catalog::CatalogEntry;

/// Build the search string for an entry.
///
/// The title alone is the default. Including the publisher narrows results
/// for generic titles but misses uploads that omit it.
pub fn search_query(entry: &CatalogEntry, include_publisher: bool) -> String {
    let title = entry.title.trim();
    let publisher = entry.publisher.trim();
    if include_publisher && !publisher.is_empty() {
        format!("{publisher} {title}")
    } else {
        title.to_string()
    }
}
