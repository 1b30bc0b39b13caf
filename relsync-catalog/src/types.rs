//! Data model types for the release catalog.
//!
//! These types represent catalog rows (one per real-world release), the
//! year-month period they belong to, and the ephemeral search candidates
//! evaluated during enrichment.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Timestamp format shared by search results, annotations, and the store.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Invalid period '{0}': expected YYYY-MM with month 01-12")]
    InvalidPeriod(String),
    #[error("Malformed catalog entry: {0}")]
    MalformedEntry(String),
}

// ── Period ──────────────────────────────────────────────────────────────────

/// A release period as stated by the listing source: a year and a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self, CatalogError> {
        if !(1..=12).contains(&month) || !(0..=9999).contains(&year) {
            return Err(CatalogError::InvalidPeriod(format!("{year}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Compact `YYMM` token used by uploaders to tag a release month
    /// (e.g. `2001` for January 2020).
    pub fn compact(&self) -> String {
        format!("{:02}{:02}", self.year.rem_euclid(100), self.month)
    }

    /// Midnight on the first day of the period.
    pub fn first_instant(&self) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or(NaiveDateTime::MIN)
    }

    /// The following month, rolling over into the next year after December.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Every period from `self` through `end`, inclusive. Empty if `end` precedes `self`.
    pub fn range_inclusive(self, end: Period) -> Vec<Period> {
        let mut periods = Vec::new();
        let mut current = self;
        while current <= end {
            periods.push(current);
            current = current.next();
        }
        periods
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CatalogError::InvalidPeriod(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Period::new(year, month).map_err(|_| invalid())
    }
}

// ── Catalog Entry ───────────────────────────────────────────────────────────

/// A row as parsed from a listing page, before it is tied to a period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub title: String,
    pub publisher: String,
}

/// One real-world release in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub period: Period,
    pub title: String,
    pub publisher: String,
    pub size: Option<String>,
    pub link: Option<String>,
    /// Free-form note; holds the observed upload time for anomalous matches.
    pub annotation: Option<String>,
}

impl CatalogEntry {
    /// Create an unenriched entry.
    pub fn new(period: Period, title: impl Into<String>, publisher: impl Into<String>) -> Self {
        Self {
            period,
            title: title.into(),
            publisher: publisher.into(),
            size: None,
            link: None,
            annotation: None,
        }
    }

    /// Build an entry from a scraped listing row, rejecting rows without a title.
    pub fn from_raw(period: Period, raw: RawRow) -> Result<Self, CatalogError> {
        let title = raw.title.trim();
        if title.is_empty() {
            return Err(CatalogError::MalformedEntry(format!(
                "row in {period} from '{}' has no title",
                raw.publisher.trim()
            )));
        }
        Ok(Self::new(period, title, raw.publisher.trim()))
    }
}

// ── Candidate ───────────────────────────────────────────────────────────────

/// One search result from the distribution index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Upload time; `None` if the source's date could not be parsed.
    pub timestamp: Option<NaiveDateTime>,
    /// Display size (e.g. "1.2 GiB"), opaque to matching.
    pub size: String,
    /// The result's own title, including uploader tags.
    pub label: String,
    /// Magnet link, if the result exposed one.
    pub locator: Option<String>,
}

/// Sort candidates newest first. Candidates without a timestamp go last;
/// the sort is stable so equal timestamps keep their source order.
pub fn sort_newest_first(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Parse a timestamp in [`TIMESTAMP_FORMAT`].
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT).ok()
}
