use super::*;
use relsync_catalog::parse_timestamp;

const SEARCH_PAGE: &str = r#"
<html><body>
<table class="torrent-list">
  <thead><tr><th>Category</th><th>Name</th><th>Link</th><th>Size</th><th>Date</th></tr></thead>
  <tbody>
    <tr>
      <td><a href="/?c=1_3">Games</a></td>
      <td>
        <a href="/view/100#comments" class="comments" title="3 comments">3</a>
        <a href="/view/100" title="[girlcelly] [180126] 美少女万華鏡 -罪と罰の少女-">[girlcelly] [180126] 美少女万華鏡</a>
      </td>
      <td>
        <a href="/download/100.torrent">torrent</a>
        <a href="magnet:?xt=urn:btih:AAAA&amp;dn=one">magnet</a>
      </td>
      <td>2.3 GiB</td>
      <td>2018-01-27 10:15</td>
    </tr>
    <tr>
      <td><a href="/?c=1_3">Games</a></td>
      <td>untitled upload</td>
      <td><a href="/download/101.torrent">torrent</a></td>
      <td>800 MiB</td>
      <td>2018-02-03 22:40</td>
    </tr>
    <tr>
      <td><a href="/?c=1_3">Games</a></td>
      <td><a href="/view/102" title="[180126] broken date">x</a></td>
      <td><a href="magnet:?xt=urn:btih:CCCC">magnet</a></td>
      <td>1.0 GiB</td>
      <td>yesterday</td>
    </tr>
  </tbody>
</table>
</body></html>
"#;

#[test]
fn results_are_sorted_newest_first_with_undated_last() {
    let candidates = parse_search_page(SEARCH_PAGE).unwrap();
    assert_eq!(candidates.len(), 3);
    assert_eq!(candidates[0].label, "untitled upload");
    assert_eq!(
        candidates[1].label,
        "[girlcelly] [180126] 美少女万華鏡 -罪と罰の少女-"
    );
    assert_eq!(candidates[2].timestamp, None);
}

#[test]
fn label_prefers_view_link_title_over_comment_link() {
    let candidates = parse_search_page(SEARCH_PAGE).unwrap();
    assert!(candidates.iter().all(|c| c.label != "3 comments"));
}

#[test]
fn locator_is_first_magnet_link() {
    let candidates = parse_search_page(SEARCH_PAGE).unwrap();
    let marked = candidates
        .iter()
        .find(|c| c.label.starts_with("[girlcelly]"))
        .unwrap();
    assert_eq!(marked.locator.as_deref(), Some("magnet:?xt=urn:btih:AAAA&dn=one"));
    assert_eq!(marked.size, "2.3 GiB");
    assert_eq!(marked.timestamp, parse_timestamp("2018-01-27 10:15"));
}

#[test]
fn missing_magnet_is_none() {
    let candidates = parse_search_page(SEARCH_PAGE).unwrap();
    assert_eq!(candidates[0].locator, None);
}

#[test]
fn header_only_page_has_no_candidates() {
    let page = "<table><tr><th>a</th><th>b</th><th>c</th><th>d</th><th>e</th></tr></table>";
    assert!(parse_search_page(page).unwrap().is_empty());
}
