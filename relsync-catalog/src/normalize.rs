//! Title normalization: strip configured noise substrings.
//!
//! Tokens are applied longest first. With `["限定版", "初回限定版"]`, removing
//! the shorter token first would leave a dangling `初回` behind.

use crate::noise::NoiseConfiguration;
use crate::types::CatalogEntry;

/// Pre-sorted noise token list, built once per run.
#[derive(Debug, Clone, Default)]
pub struct NoiseFilter {
    tokens: Vec<String>,
}

impl NoiseFilter {
    pub fn new(config: &NoiseConfiguration) -> Self {
        Self {
            tokens: config.merged_tokens(),
        }
    }

    /// Tokens in application order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn normalize(&self, title: &str) -> String {
        normalize(title, &self.tokens)
    }

    /// Rewrite every entry's title in place.
    pub fn normalize_entries(&self, entries: &mut [CatalogEntry]) {
        for entry in entries.iter_mut() {
            let cleaned = self.normalize(&entry.title);
            if cleaned != entry.title {
                entry.title = cleaned;
            }
        }
    }
}

/// Remove every occurrence of each token, in the order given, trimming
/// whitespace after each removal. `tokens` must already be sorted longest first.
pub fn normalize(title: &str, tokens: &[String]) -> String {
    let mut cleaned = title.to_string();
    for token in tokens {
        if token.is_empty() || !cleaned.contains(token.as_str()) {
            continue;
        }
        cleaned = cleaned.replace(token.as_str(), "").trim().to_string();
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(delete: &[&str], special: &[&str]) -> NoiseFilter {
        NoiseFilter::new(&NoiseConfiguration {
            delete: delete.iter().map(|s| s.to_string()).collect(),
            special: special.iter().map(|s| s.to_string()).collect(),
        })
    }

    #[test]
    fn strips_all_occurrences_and_trims() {
        let f = filter(&["通常版"], &[]);
        assert_eq!(f.normalize("通常版 Foo 通常版"), "Foo");
    }

    #[test]
    fn longer_token_wins_over_its_substring() {
        let f = filter(&["限定版"], &["初回限定版"]);
        assert_eq!(f.tokens()[0], "初回限定版");
        assert_eq!(f.normalize("Foo 初回限定版"), "Foo");
    }

    #[test]
    fn untouched_title_keeps_its_spacing() {
        let f = filter(&["DL版"], &[]);
        assert_eq!(f.normalize(" Foo Bar "), " Foo Bar ");
    }

    #[test]
    fn title_made_entirely_of_noise_becomes_empty() {
        let f = filter(&["DL版"], &[]);
        assert_eq!(f.normalize("DL版"), "");
    }

    #[test]
    fn normalizing_twice_is_a_no_op() {
        let f = filter(&["初回限定版", "通常版"], &["DL版", "【特典付き】"]);
        for title in [
            "Foo 初回限定版",
            "【特典付き】Bar DL版",
            "Baz",
            "通常版 Qux 通常版",
        ] {
            let once = f.normalize(title);
            assert_eq!(f.normalize(&once), once, "title: {title}");
        }
    }

    #[test]
    fn normalize_entries_rewrites_titles() {
        let f = filter(&["DL版"], &[]);
        let period = "2020-01".parse().unwrap();
        let mut entries = vec![
            CatalogEntry::new(period, "Foo DL版", "Studio"),
            CatalogEntry::new(period, "Bar", "Studio"),
        ];
        f.normalize_entries(&mut entries);
        assert_eq!(entries[0].title, "Foo");
        assert_eq!(entries[1].title, "Bar");
    }
}
