use relsync_catalog::{CatalogEntry, MatchResult, MatchTier, Period, Selection};
use relsync_db::*;
use rusqlite::Connection;

fn period(s: &str) -> Period {
    s.parse().unwrap()
}

fn seeded() -> Connection {
    let conn = open_memory().unwrap();
    let batches: [(&str, &[&str]); 3] = [
        ("2019-12", &["Winter", "Snow"]),
        ("2020-01", &["Alpha", "Beta", "Gamma"]),
        ("2020-02", &["Delta"]),
    ];
    for (p, titles) in batches {
        let entries: Vec<CatalogEntry> = titles
            .iter()
            .map(|t| CatalogEntry::new(period(p), *t, "Acme"))
            .collect();
        persist_catalog_batch(&conn, period(p), &entries).unwrap();
    }
    conn
}

fn link(conn: &Connection, p: &str, title: &str) {
    apply_match_result(
        conn,
        period(p),
        title,
        &MatchResult::Confirmed(Selection {
            tier: MatchTier::PeriodOnly,
            label: format!("[x] {title}"),
            size: "1 GiB".to_string(),
            locator: Some(format!("magnet:{title}")),
            timestamp: None,
        }),
    )
    .unwrap();
}

#[test]
fn distinct_periods_are_sorted() {
    let conn = seeded();
    let periods: Vec<String> = list_distinct_periods(&conn)
        .unwrap()
        .iter()
        .map(|p| p.to_string())
        .collect();
    assert_eq!(periods, vec!["2019-12", "2020-01", "2020-02"]);
}

#[test]
fn empty_database_has_no_periods() {
    let conn = open_memory().unwrap();
    assert!(list_distinct_periods(&conn).unwrap().is_empty());
}

#[test]
fn list_entries_pages_in_catalog_order() {
    let conn = seeded();
    let first = list_entries(&conn, &EntryFilter::default(), 1, 4).unwrap();
    assert_eq!(first.total, 6);
    assert_eq!(first.total_pages(), 2);
    let titles: Vec<&str> = first.entries.iter().map(|e| e.entry.title.as_str()).collect();
    assert_eq!(titles, vec!["Snow", "Winter", "Alpha", "Beta"]);

    let second = list_entries(&conn, &EntryFilter::default(), 2, 4).unwrap();
    assert_eq!(second.entries.len(), 2);
    assert_eq!(second.entries[1].entry.title, "Delta");
}

#[test]
fn page_zero_is_first_page() {
    let conn = seeded();
    let page = list_entries(&conn, &EntryFilter::default(), 0, 50).unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.entries.len(), 6);
}

#[test]
fn filter_by_year_and_month() {
    let conn = seeded();
    let by_year = EntryFilter {
        year: Some(2020),
        month: None,
    };
    assert_eq!(list_entries(&conn, &by_year, 1, 50).unwrap().total, 4);

    let by_period = EntryFilter::period(period("2020-01"));
    assert_eq!(list_entries(&conn, &by_period, 1, 50).unwrap().total, 3);

    let by_month = EntryFilter {
        year: None,
        month: Some(12),
    };
    assert_eq!(list_entries(&conn, &by_month, 1, 50).unwrap().total, 2);
}

#[test]
fn find_entry_missing_is_none() {
    let conn = seeded();
    assert!(find_entry(&conn, period("2020-01"), "Nope").unwrap().is_none());
}

#[test]
fn enrichment_skips_linked_entries_unless_forced() {
    let conn = seeded();
    link(&conn, "2020-01", "Alpha");

    let pending = entries_to_enrich(&conn, &EntryFilter::default(), false, None).unwrap();
    assert_eq!(pending.len(), 5);
    assert!(pending.iter().all(|e| e.title != "Alpha"));

    let forced = entries_to_enrich(&conn, &EntryFilter::default(), true, None).unwrap();
    assert_eq!(forced.len(), 6);
}

#[test]
fn enrichment_respects_filter_and_limit() {
    let conn = seeded();
    link(&conn, "2020-01", "Alpha");
    let filter = EntryFilter::period(period("2020-01"));

    let pending = entries_to_enrich(&conn, &filter, false, None).unwrap();
    let titles: Vec<&str> = pending.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Beta", "Gamma"]);

    let limited = entries_to_enrich(&conn, &EntryFilter::default(), false, Some(2)).unwrap();
    assert_eq!(limited.len(), 2);
}

#[test]
fn all_entries_returns_everything_for_filter() {
    let conn = seeded();
    let filter = EntryFilter {
        year: Some(2019),
        month: None,
    };
    assert_eq!(all_entries(&conn, &filter).unwrap().len(), 2);
}

#[test]
fn stats_reflect_enrichment_state() {
    let conn = seeded();
    link(&conn, "2020-01", "Alpha");
    apply_match_result(&conn, period("2020-01"), "Beta", &MatchResult::NoMatch).unwrap();

    let stats = catalog_stats(&conn).unwrap();
    assert_eq!(
        stats,
        CatalogStats {
            periods: 3,
            entries: 6,
            linked: 1,
            unlinked_attempted: 1,
            never_attempted: 4,
            needs_review: 0,
            dedup_merges: 0,
        }
    );
}

#[test]
fn merges_filter_by_period() {
    let conn = seeded();
    let merge = |p: &str, dropped: &str, kept: &str| relsync_catalog::DedupMerge {
        dropped: CatalogEntry::new(period(p), dropped, "Acme"),
        kept_title: kept.to_string(),
    };
    record_dedup_merges(&conn, period("2020-01"), &[merge("2020-01", "Alpha DX", "Alpha")])
        .unwrap();
    record_dedup_merges(&conn, period("2020-02"), &[merge("2020-02", "Delta DX", "Delta")])
        .unwrap();

    assert_eq!(list_dedup_merges(&conn, None).unwrap().len(), 2);
    let jan = list_dedup_merges(&conn, Some(period("2020-01"))).unwrap();
    assert_eq!(jan.len(), 1);
    assert_eq!(jan[0].period, period("2020-01"));
}
