use relsync_catalog::{
    parse_timestamp, Candidate, CatalogEntry, MatchResult, MatchTier, Matcher, Markers, Period,
};

fn entry(period: &str) -> CatalogEntry {
    let period: Period = period.parse().unwrap();
    CatalogEntry::new(period, "美少女万華鏡 -罪と罰の少女-", "ωstar")
}

fn candidate(label: &str, ts: Option<&str>, locator: &str) -> Candidate {
    Candidate {
        timestamp: ts.and_then(parse_timestamp),
        size: "1.5 GiB".to_string(),
        label: label.to_string(),
        locator: Some(locator.to_string()),
    }
}

fn matcher() -> Matcher {
    Matcher::new(Markers::new("girlcelly", Some("hentairules".to_string())))
}

fn expect_confirmed(result: MatchResult) -> relsync_catalog::Selection {
    match result {
        MatchResult::Confirmed(selection) => selection,
        other => panic!("Expected Confirmed, got {:?}", other),
    }
}

#[test]
fn no_candidates_is_no_match() {
    assert_eq!(matcher().select(&entry("2020-01"), &[]), MatchResult::NoMatch);
}

#[test]
fn marker_tier_beats_recency() {
    let candidates = vec![
        candidate("[200124] 美少女万華鏡 (period only)", Some("2020-02-01 12:00"), "magnet:B"),
        candidate("[girlcelly] [200124] 美少女万華鏡", Some("2020-01-25 12:00"), "magnet:A"),
    ];
    let selection = expect_confirmed(matcher().select(&entry("2020-01"), &candidates));
    assert_eq!(selection.tier, MatchTier::MarkerAndPeriod);
    assert_eq!(selection.locator.as_deref(), Some("magnet:A"));
}

#[test]
fn secondary_marker_beats_period_only() {
    let candidates = vec![
        candidate("[200124] upload", Some("2020-02-01 12:00"), "magnet:plain"),
        candidate("[hentairules] 200124 upload", Some("2020-01-30 12:00"), "magnet:secondary"),
    ];
    let selection = expect_confirmed(matcher().select(&entry("2020-01"), &candidates));
    assert_eq!(selection.tier, MatchTier::SecondaryMarkerAndPeriod);
    assert_eq!(selection.locator.as_deref(), Some("magnet:secondary"));
}

#[test]
fn secondary_tier_is_skipped_when_unset() {
    let m = Matcher::new(Markers::new("girlcelly", None));
    let candidates = vec![
        candidate("[200124] upload", Some("2020-02-01 12:00"), "magnet:plain"),
        candidate("[hentairules] 200124 upload", Some("2020-01-30 12:00"), "magnet:secondary"),
    ];
    let selection = expect_confirmed(m.select(&entry("2020-01"), &candidates));
    assert_eq!(selection.tier, MatchTier::PeriodOnly);
    assert_eq!(selection.locator.as_deref(), Some("magnet:plain"));
}

#[test]
fn newest_wins_within_a_tier() {
    let candidates = vec![
        candidate("[200124] older", Some("2020-01-25 12:00"), "magnet:old"),
        candidate("[200124] newer", Some("2020-03-01 12:00"), "magnet:new"),
    ];
    let selection = expect_confirmed(matcher().select(&entry("2020-01"), &candidates));
    assert_eq!(selection.label, "[200124] newer");
}

#[test]
fn marker_without_period_keeps_locator() {
    let candidates = vec![
        candidate("random upload", Some("2021-01-01 00:00"), "magnet:random"),
        candidate("[girlcelly] no date tag", Some("2020-06-01 00:00"), "magnet:marker"),
    ];
    let selection = expect_confirmed(matcher().select(&entry("2020-01"), &candidates));
    assert_eq!(selection.tier, MatchTier::MarkerOnly);
    assert_eq!(selection.locator.as_deref(), Some("magnet:marker"));
}

#[test]
fn last_resort_fallback_never_exposes_locator() {
    let candidates = vec![
        candidate("older unrelated", Some("2020-02-01 00:00"), "magnet:older"),
        candidate("newest unrelated", Some("2020-05-01 00:00"), "magnet:newest"),
    ];
    let selection = expect_confirmed(matcher().select(&entry("2020-01"), &candidates));
    assert_eq!(selection.tier, MatchTier::MostRecent);
    assert_eq!(selection.label, "newest unrelated");
    assert_eq!(selection.size, "1.5 GiB");
    assert_eq!(selection.locator, None);
}

#[test]
fn candidate_before_period_is_anomalous() {
    let candidates = vec![candidate("[girlcelly] [2001] leak", Some("2019-06-01 00:00"), "magnet:leak")];
    match matcher().select(&entry("2020-01"), &candidates) {
        MatchResult::ConfirmedAnomalous { selection, observed } => {
            assert_eq!(observed, parse_timestamp("2019-06-01 00:00").unwrap());
            assert_eq!(selection.locator.as_deref(), Some("magnet:leak"));
            assert_eq!(selection.tier, MatchTier::MarkerAndPeriod);
        }
        other => panic!("Expected ConfirmedAnomalous, got {:?}", other),
    }
}

#[test]
fn candidate_inside_period_is_confirmed() {
    let candidates = vec![candidate("[2001] upload", Some("2020-01-15 00:00"), "magnet:ok")];
    let result = matcher().select(&entry("2020-01"), &candidates);
    assert!(!result.is_anomalous());
    expect_confirmed(result);
}

#[test]
fn first_instant_of_period_is_not_anomalous() {
    let candidates = vec![candidate("[2001] upload", Some("2020-01-01 00:00"), "magnet:ok")];
    expect_confirmed(matcher().select(&entry("2020-01"), &candidates));
}

#[test]
fn unparsed_timestamp_never_flags() {
    let candidates = vec![candidate("[girlcelly] [2001] upload", None, "magnet:undated")];
    let selection = expect_confirmed(matcher().select(&entry("2020-01"), &candidates));
    assert_eq!(selection.timestamp, None);
    assert_eq!(selection.locator.as_deref(), Some("magnet:undated"));
}

#[test]
fn undated_candidates_rank_after_dated_ones() {
    let candidates = vec![
        candidate("[2001] undated", None, "magnet:undated"),
        candidate("[2001] dated", Some("2020-01-20 00:00"), "magnet:dated"),
    ];
    let selection = expect_confirmed(matcher().select(&entry("2020-01"), &candidates));
    assert_eq!(selection.label, "[2001] dated");
}

#[test]
fn anomalous_last_resort_still_hides_locator() {
    let candidates = vec![candidate("unrelated", Some("2018-01-01 00:00"), "magnet:x")];
    match matcher().select(&entry("2020-01"), &candidates) {
        MatchResult::ConfirmedAnomalous { selection, .. } => {
            assert_eq!(selection.tier, MatchTier::MostRecent);
            assert_eq!(selection.locator, None);
        }
        other => panic!("Expected ConfirmedAnomalous, got {:?}", other),
    }
}

#[test]
fn period_tag_uses_two_digit_year_and_month() {
    // 1912 is December 2019, not January 2020.
    let candidates = vec![
        candidate("[1912] wrong month", Some("2020-02-01 00:00"), "magnet:wrong"),
        candidate("[2001] right month", Some("2020-01-20 00:00"), "magnet:right"),
    ];
    let selection = expect_confirmed(matcher().select(&entry("2020-01"), &candidates));
    assert_eq!(selection.locator.as_deref(), Some("magnet:right"));
}
