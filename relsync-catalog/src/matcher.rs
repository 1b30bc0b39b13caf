//! Candidate selection against a catalog entry.
//!
//! Search results come back matched by a loose full-text query, so most of
//! them are unrelated or re-uploads. Selection is tiered: uploader marker
//! plus release-month tag beats month tag alone, which beats anything that
//! merely looks plausible. Within a tier the newest candidate wins.
//!
//! 1. Primary marker and `YYMM` tag
//! 2. Secondary marker and `YYMM` tag
//! 3. `YYMM` tag alone
//! 4. Primary marker alone, else the newest candidate with its locator withheld

use std::fmt;

use chrono::NaiveDateTime;

use crate::types::{sort_newest_first, Candidate, CatalogEntry};

/// Uploader tags that identify trusted sources in candidate labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markers {
    pub primary: String,
    /// Tier 2 is skipped when unset.
    pub secondary: Option<String>,
}

impl Markers {
    pub fn new(primary: impl Into<String>, secondary: Option<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.filter(|s| !s.is_empty()),
        }
    }
}

/// Which rule selected a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchTier {
    MarkerAndPeriod,
    SecondaryMarkerAndPeriod,
    PeriodOnly,
    MarkerOnly,
    MostRecent,
}

impl MatchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MarkerAndPeriod => "marker+period",
            Self::SecondaryMarkerAndPeriod => "secondary+period",
            Self::PeriodOnly => "period",
            Self::MarkerOnly => "marker",
            Self::MostRecent => "most-recent",
        }
    }

    /// Whether the selection is trusted enough to expose its download locator.
    pub fn exposes_locator(&self) -> bool {
        !matches!(self, Self::MostRecent)
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The chosen candidate, as exposed to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub tier: MatchTier,
    pub label: String,
    pub size: String,
    /// Always `None` for [`MatchTier::MostRecent`].
    pub locator: Option<String>,
    pub timestamp: Option<NaiveDateTime>,
}

/// Outcome of matching one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Confirmed(Selection),
    /// The chosen candidate was uploaded before the entry's release period.
    ConfirmedAnomalous {
        selection: Selection,
        observed: NaiveDateTime,
    },
    NoMatch,
}

impl MatchResult {
    pub fn is_anomalous(&self) -> bool {
        matches!(self, Self::ConfirmedAnomalous { .. })
    }
}

/// Tiered candidate selector configured with the trusted-source markers.
#[derive(Debug, Clone)]
pub struct Matcher {
    markers: Markers,
}

impl Matcher {
    pub fn new(markers: Markers) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    /// Pick at most one candidate for `entry` and classify it.
    pub fn select(&self, entry: &CatalogEntry, candidates: &[Candidate]) -> MatchResult {
        let Some((tier, chosen)) = self.choose(entry, candidates) else {
            return MatchResult::NoMatch;
        };

        let selection = Selection {
            tier,
            label: chosen.label.clone(),
            size: chosen.size.clone(),
            locator: if tier.exposes_locator() {
                chosen.locator.clone()
            } else {
                None
            },
            timestamp: chosen.timestamp,
        };

        match chosen.timestamp {
            Some(observed) if observed < entry.period.first_instant() => {
                MatchResult::ConfirmedAnomalous {
                    selection,
                    observed,
                }
            }
            _ => MatchResult::Confirmed(selection),
        }
    }

    fn choose(&self, entry: &CatalogEntry, candidates: &[Candidate]) -> Option<(MatchTier, Candidate)> {
        if candidates.is_empty() {
            return None;
        }

        let mut ordered = candidates.to_vec();
        sort_newest_first(&mut ordered);

        let period_tag = entry.period.compact();
        let primary = self.markers.primary.as_str();
        let has_primary = |c: &Candidate| !primary.is_empty() && c.label.contains(primary);
        let has_period = |c: &Candidate| c.label.contains(period_tag.as_str());

        if let Some(c) = ordered.iter().find(|c| has_primary(c) && has_period(c)) {
            return Some((MatchTier::MarkerAndPeriod, c.clone()));
        }

        if let Some(secondary) = self.markers.secondary.as_deref().filter(|s| !s.is_empty()) {
            if let Some(c) = ordered
                .iter()
                .find(|c| c.label.contains(secondary) && has_period(c))
            {
                return Some((MatchTier::SecondaryMarkerAndPeriod, c.clone()));
            }
        }

        if let Some(c) = ordered.iter().find(|c| has_period(c)) {
            return Some((MatchTier::PeriodOnly, c.clone()));
        }

        if let Some(c) = ordered.iter().find(|c| has_primary(c)) {
            return Some((MatchTier::MarkerOnly, c.clone()));
        }

        ordered
            .into_iter()
            .next()
            .map(|c| (MatchTier::MostRecent, c))
    }
}
