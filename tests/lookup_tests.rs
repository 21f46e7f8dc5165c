use amt_iprange::lookup::{lookup_all, summarize};
use amt_iprange::parse::{TokenKind, parse_input};
use amt_iprange::store::RangeStore;

fn seeded_store() -> RangeStore {
    let s = RangeStore::open_in_memory().unwrap_or_else(|e| panic!("open store: {e}"));
    s.insert_many(&parse_input("192.168.1.0/24"), "TeamLan")
        .unwrap_or_else(|e| panic!("{e}"));
    s.insert_many(&parse_input("192.168.0.0/16"), "TeamCampus")
        .unwrap_or_else(|e| panic!("{e}"));
    s.insert_many(&parse_input("10.0.0.1-10.0.0.50"), "TeamDc")
        .unwrap_or_else(|e| panic!("{e}"));
    s
}

#[test]
fn results_follow_input_order_with_invalid_in_the_middle() {
    let s = seeded_store();
    let results = lookup_all(&s, "192.168.1.1, not-an-ip, 10.0.0.1");
    assert_eq!(results.len(), 3);

    let inputs: Vec<&str> = results.iter().map(|r| r.token.original_text.as_str()).collect();
    assert_eq!(inputs, vec!["192.168.1.1", "not-an-ip", "10.0.0.1"]);

    assert!(results[0].found);
    let first: Vec<&str> = results[0].owners.iter().map(String::as_str).collect();
    assert_eq!(first, vec!["TeamCampus", "TeamLan"]);

    assert!(!results[1].found);
    assert!(results[1].owners.is_empty());
    assert_eq!(results[1].token.kind(), TokenKind::Invalid);
    assert!(results[1].error.is_some());

    assert!(results[2].found);
    assert!(results[2].owners.contains("TeamDc"));
}

#[test]
fn unowned_address_is_valid_but_not_found() {
    let s = seeded_store();
    let results = lookup_all(&s, "8.8.8.8");
    assert_eq!(results.len(), 1);
    assert!(!results[0].found);
    assert!(results[0].error.is_none());
    assert_eq!(results[0].token.kind(), TokenKind::Single);
}

#[test]
fn cidr_and_range_queries_use_overlap() {
    let s = seeded_store();
    let results = lookup_all(&s, "10.0.0.48/28 10.0.0.51-10.0.0.60 192.168.200.0/24");
    assert!(results[0].found); // 10.0.0.48-63 は .48-.50 で重なる
    assert!(!results[1].found);
    let third: Vec<&str> = results[2].owners.iter().map(String::as_str).collect();
    assert_eq!(third, vec!["TeamCampus"]);
}

#[test]
fn summary_counts_each_outcome() {
    let s = seeded_store();
    let results = lookup_all(&s, "192.168.1.1 8.8.8.8 bad 1.2.3.4/40");
    let summary = summarize(&results);
    assert_eq!(summary.total, 4);
    assert_eq!(summary.found, 1);
    assert_eq!(summary.not_found, 1);
    assert_eq!(summary.invalid, 2);
}

#[test]
fn empty_input_yields_no_results() {
    let s = seeded_store();
    assert!(lookup_all(&s, " \n, ").is_empty());
}

#[test]
fn store_error_on_one_token_does_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let path = dir.path().join("ranges.db");
    let s = RangeStore::open(&path).unwrap_or_else(|e| panic!("open: {e}"));
    s.insert_many(&parse_input("1.1.1.0/24"), "TeamGone")
        .unwrap_or_else(|e| panic!("{e}"));

    // 別接続からテーブルを消し、照会をストアエラーにする
    let other = rusqlite::Connection::open(&path).unwrap_or_else(|e| panic!("second conn: {e}"));
    other
        .execute_batch("DROP TABLE ip_ranges;")
        .unwrap_or_else(|e| panic!("drop: {e}"));

    let results = lookup_all(&s, "1.1.1.1 bad 2.2.2.2");
    assert_eq!(results.len(), 3);
    let inputs: Vec<&str> = results.iter().map(|r| r.token.original_text.as_str()).collect();
    assert_eq!(inputs, vec!["1.1.1.1", "bad", "2.2.2.2"]);
    assert!(results.iter().all(|r| !r.found && r.owners.is_empty()));

    for i in [0, 2] {
        let err = results[i].error.as_deref().unwrap_or_default();
        assert!(err.starts_with("store failure:"), "{err}");
        assert_eq!(results[i].token.kind(), TokenKind::Single);
    }
    assert_eq!(
        results[1].error.as_deref(),
        Some("invalid IP address format: bad")
    );
}
