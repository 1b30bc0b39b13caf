use relsync_catalog::{deduplicate, deduplicate_with_report, CatalogEntry, Period};

fn period() -> Period {
    "2020-01".parse().unwrap()
}

fn entry(title: &str, publisher: &str) -> CatalogEntry {
    CatalogEntry::new(period(), title, publisher)
}

fn titles(entries: &[CatalogEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.title.as_str()).collect()
}

#[test]
fn qualifier_word_folds_into_bare_title() {
    let out = deduplicate(vec![entry("Foo Deluxe", "Studio"), entry("Foo", "Studio")]);
    assert_eq!(titles(&out), vec!["Foo"]);
}

#[test]
fn only_the_final_word_counts_as_qualifier() {
    // "Foo Deluxe Edition" stems to "Foo Deluxe", which was never kept.
    let out = deduplicate(vec![
        entry("Foo Deluxe Edition", "Studio"),
        entry("Foo", "Studio"),
    ]);
    assert_eq!(titles(&out), vec!["Foo", "Foo Deluxe Edition"]);

    // Dropped rows never enter the seen set, so the intermediate variant
    // does not pull the longest one in.
    let out = deduplicate(vec![
        entry("Foo Deluxe Edition", "Studio"),
        entry("Foo Deluxe", "Studio"),
        entry("Foo", "Studio"),
    ]);
    assert_eq!(titles(&out), vec!["Foo", "Foo Deluxe Edition"]);
}

#[test]
fn exact_duplicates_collapse() {
    let out = deduplicate(vec![entry("Foo", "Studio"), entry("Foo", "Studio")]);
    assert_eq!(titles(&out), vec!["Foo"]);
}

#[test]
fn distinct_titles_survive() {
    let out = deduplicate(vec![
        entry("Alpha", "Studio"),
        entry("Beta", "Studio"),
        entry("Gamma Ray", "Other"),
    ]);
    assert_eq!(titles(&out), vec!["Alpha", "Beta", "Gamma Ray"]);
}

#[test]
fn same_length_variants_do_not_absorb_each_other() {
    let out = deduplicate(vec![entry("Foo A", "Studio"), entry("Foo B", "Studio")]);
    assert_eq!(titles(&out), vec!["Foo A", "Foo B"]);
}

#[test]
fn output_is_sorted_by_period_then_title() {
    let jan: Period = "2020-01".parse().unwrap();
    let feb: Period = "2020-02".parse().unwrap();
    let out = deduplicate(vec![
        CatalogEntry::new(feb, "Zeta", "A"),
        CatalogEntry::new(jan, "Omega", "B"),
        CatalogEntry::new(jan, "Alpha", "C"),
    ]);
    let keys: Vec<(String, &str)> = out
        .iter()
        .map(|e| (e.period.to_string(), e.title.as_str()))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("2020-01".to_string(), "Alpha"),
            ("2020-01".to_string(), "Omega"),
            ("2020-02".to_string(), "Zeta"),
        ]
    );
}

#[test]
fn deduplicate_is_idempotent() {
    let input = vec![
        entry("Foo", "Studio"),
        entry("Foo Deluxe", "Studio"),
        entry("Foo Deluxe Edition", "Studio"),
        entry("Bar Extra", "Other"),
        entry("Bar", "Zeta"),
        entry("Baz", "Other"),
    ];
    let once = deduplicate(input);
    let twice = deduplicate(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn surviving_titles_ignore_arrival_order() {
    let input = vec![
        entry("Foo", "Studio"),
        entry("Foo Deluxe", "Studio"),
        entry("Foo Deluxe Edition", "Studio"),
        entry("Bar Extra", "Other"),
        entry("Bar", "Other"),
        entry("Qux", "Zeta"),
    ];
    let expected = titles(&deduplicate(input.clone()))
        .into_iter()
        .map(String::from)
        .collect::<Vec<_>>();

    let mut reversed = input.clone();
    reversed.reverse();
    let mut rotated = input;
    rotated.rotate_left(2);

    for variant in [reversed, rotated] {
        let got: Vec<String> = deduplicate(variant)
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(got, expected);
    }
}

#[test]
fn publisher_order_decides_cross_publisher_merges() {
    // "Acme" sorts before "Beta", so its shorter title is seen first.
    let out = deduplicate(vec![entry("Foo Special", "Beta"), entry("Foo", "Acme")]);
    assert_eq!(titles(&out), vec!["Foo"]);

    // Here the suffixed title's publisher sorts first; it is kept, and so is
    // the bare title, whose own stem is unseen.
    let out = deduplicate(vec![entry("Foo Special", "Acme"), entry("Foo", "Beta")]);
    assert_eq!(titles(&out), vec!["Foo", "Foo Special"]);
}

#[test]
fn report_names_the_absorbing_title() {
    let result = deduplicate_with_report(vec![
        entry("Foo", "Studio"),
        entry("Foo DL", "Studio"),
        entry("Foo", "Studio"),
    ]);
    assert_eq!(titles(&result.entries), vec!["Foo"]);
    assert_eq!(result.merges.len(), 2);
    assert!(result.merges.iter().all(|m| m.kept_title == "Foo"));
    let dropped: Vec<&str> = result
        .merges
        .iter()
        .map(|m| m.dropped.title.as_str())
        .collect();
    assert!(dropped.contains(&"Foo DL"));
}

#[test]
fn empty_batch_is_empty() {
    let result = deduplicate_with_report(Vec::new());
    assert!(result.entries.is_empty());
    assert!(result.merges.is_empty());
}

#[test]
fn empty_titles_collapse_like_any_other_title() {
    let out = deduplicate(vec![entry("", "Studio"), entry("", "Studio")]);
    assert_eq!(out.len(), 1);
}

#[test]
fn leading_space_title_is_not_folded_into_empty_title() {
    let out = deduplicate(vec![entry("", "Studio"), entry(" Foo", "Studio")]);
    let kept = titles(&out);
    assert!(kept.contains(&" Foo"), "kept: {kept:?}");
    assert_eq!(kept.len(), 2);
}
