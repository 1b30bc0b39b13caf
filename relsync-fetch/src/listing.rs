//! Parser for the monthly release listing page.

use relsync_catalog::RawRow;
use scraper::{ElementRef, Html, Selector};

use crate::error::FetchError;

/// Extract `{title, publisher}` rows from a listing page.
///
/// Release rows are `tr[bgcolor="#ffffff"]` with at least three cells; the
/// title is in the second cell and the publisher in the third. Rows with
/// fewer cells are skipped.
pub fn parse_listing_page(html: &str) -> Result<Vec<RawRow>, FetchError> {
    let document = Html::parse_document(html);
    let row_sel = selector(r##"tr[bgcolor="#ffffff"]"##)?;
    let cell_sel = selector("td")?;

    let mut rows = Vec::new();
    for row in document.select(&row_sel) {
        let cells: Vec<ElementRef> = row.select(&cell_sel).collect();
        if cells.len() < 3 {
            continue;
        }
        rows.push(RawRow {
            title: cell_text(cells[1]),
            publisher: cell_text(cells[2]),
        });
    }
    Ok(rows)
}

pub(crate) fn selector(css: &str) -> Result<Selector, FetchError> {
    Selector::parse(css).map_err(|e| FetchError::parse(format!("bad selector '{css}': {e}")))
}

pub(crate) fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
#[path = "tests/listing_tests.rs"]
mod tests;
