//! Parser for distribution index search results.

use relsync_catalog::{parse_timestamp, sort_newest_first, Candidate};
use scraper::{ElementRef, Html};

use crate::error::FetchError;
use crate::listing::{cell_text, selector};

const MAGNET_PREFIX: &str = "magnet:?xt=urn:btih:";

/// Extract candidates from a search results page, newest first.
///
/// Every `tr` with at least five cells is a result:
/// 1. label: `title` of the view link in cell 1, else the cell text
/// 2. locator: the first magnet link in cell 2
/// 3. size: cell 3 text
/// 4. timestamp: cell 4 as `%Y-%m-%d %H:%M`
///
/// An unparseable date is logged and leaves the timestamp empty.
pub fn parse_search_page(html: &str) -> Result<Vec<Candidate>, FetchError> {
    let document = Html::parse_document(html);
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;
    let view_sel = selector(r#"a[href*="view"]:not(.comments)"#)?;
    let link_sel = selector("a[href]")?;

    let mut candidates = Vec::new();
    for row in document.select(&row_sel) {
        let cells: Vec<ElementRef> = row.select(&cell_sel).collect();
        if cells.len() < 5 {
            continue;
        }

        let label = cells[1]
            .select(&view_sel)
            .find_map(|a| a.value().attr("title"))
            .map(|t| t.trim().to_string())
            .unwrap_or_else(|| cell_text(cells[1]));

        let locator = cells[2]
            .select(&link_sel)
            .filter_map(|a| a.value().attr("href"))
            .find(|href| href.contains(MAGNET_PREFIX))
            .map(str::to_string);

        let date = cell_text(cells[4]);
        let timestamp = parse_timestamp(&date);
        if timestamp.is_none() {
            log::warn!("Unrecognized upload date '{date}' for '{label}'");
        }

        candidates.push(Candidate {
            timestamp,
            size: cell_text(cells[3]),
            label,
            locator,
        });
    }

    sort_newest_first(&mut candidates);
    Ok(candidates)
}

#[cfg(test)]
#[path = "tests/search_tests.rs"]
mod tests;
