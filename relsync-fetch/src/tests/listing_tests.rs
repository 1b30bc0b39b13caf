use super::*;

const LISTING_PAGE: &str = r##"
<html><body>
<table>
  <tr bgcolor="#cccccc"><td>発売日</td><td>タイトル</td><td>ブランド</td></tr>
  <tr bgcolor="#ffffff">
    <td>01/26</td>
    <td><a href="/soft.phtml?id=1">  美少女万華鏡 -罪と罰の少女- 通常版 </a></td>
    <td>ωstar</td>
    <td>9,800円</td>
  </tr>
  <tr bgcolor="#ffffff">
    <td>01/26</td>
    <td>Foo</td>
    <td> Acme </td>
  </tr>
  <tr bgcolor="#ffffff"><td>only</td><td>two cells</td></tr>
</table>
</body></html>
"##;

#[test]
fn extracts_title_and_publisher() {
    let rows = parse_listing_page(LISTING_PAGE).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].title, "美少女万華鏡 -罪と罰の少女- 通常版");
    assert_eq!(rows[0].publisher, "ωstar");
    assert_eq!(rows[1].title, "Foo");
    assert_eq!(rows[1].publisher, "Acme");
}

#[test]
fn header_rows_are_ignored() {
    let rows = parse_listing_page(LISTING_PAGE).unwrap();
    assert!(rows.iter().all(|r| r.title != "タイトル"));
}

#[test]
fn page_without_rows_is_empty() {
    let rows = parse_listing_page("<html><body><p>no releases</p></body></html>").unwrap();
    assert!(rows.is_empty());
}
