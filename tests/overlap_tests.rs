use amt_iprange::ipv4_codec::encode;
use amt_iprange::ipv4_utils::IpInterval;
use amt_iprange::overlap::{find_shared_ranges, resolve, shared_ranges};
use amt_iprange::parse::parse_input;
use amt_iprange::store::RangeStore;
use std::collections::BTreeSet;

fn store() -> RangeStore {
    RangeStore::open_in_memory().unwrap_or_else(|e| panic!("open store: {e}"))
}

fn iv(start: u32, end: u32) -> IpInterval {
    IpInterval::new(start, end).unwrap_or_else(|e| panic!("{e}"))
}

fn owners(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn partial_overlap_matches_and_disjoint_does_not() {
    let s = store();
    s.insert(iv(15, 25), "B").unwrap_or_else(|e| panic!("{e}"));

    let got = resolve(&s, iv(10, 20)).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(got, owners(&["B"]));

    let got = resolve(&s, iv(30, 40)).unwrap_or_else(|e| panic!("{e}"));
    assert!(got.is_empty());

    // 端点だけの接触も一致する
    let got = resolve(&s, iv(25, 30)).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(got, owners(&["B"]));
    let got = resolve(&s, iv(26, 30)).unwrap_or_else(|e| panic!("{e}"));
    assert!(got.is_empty());
}

#[test]
fn single_ip_returns_every_overlapping_owner() {
    let s = store();
    s.insert(iv(0, 255), "TeamA").unwrap_or_else(|e| panic!("{e}"));
    s.insert(iv(50, 100), "TeamB").unwrap_or_else(|e| panic!("{e}"));
    s.insert(iv(80, 80), "TeamC").unwrap_or_else(|e| panic!("{e}"));

    let first = resolve(&s, IpInterval::single(80)).unwrap_or_else(|e| panic!("{e}"));
    let got: Vec<&str> = first.iter().map(String::as_str).collect();
    assert_eq!(got, vec!["TeamA", "TeamB", "TeamC"]);

    // 書き込みがなければ何度呼んでも同じ結果
    let second = resolve(&s, IpInterval::single(80)).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(first, second);

    let got = resolve(&s, IpInterval::single(101)).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(got, owners(&["TeamA"]));
}

#[test]
fn owner_with_several_matching_rows_is_reported_once() {
    let s = store();
    s.insert_many(&parse_input("10.0.0.0/24 10.0.0.128/25 10.0.0.7"), "TeamDup")
        .unwrap_or_else(|e| panic!("{e}"));
    s.insert_many(&parse_input("10.0.0.0/24"), "TeamDup")
        .unwrap_or_else(|e| panic!("{e}"));

    let q = encode("10.0.0.200").unwrap_or_else(|e| panic!("{e}"));
    let got = resolve(&s, IpInterval::single(q)).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(got, owners(&["TeamDup"]));
}

#[test]
fn query_range_spanning_several_rows() {
    let s = store();
    s.insert_many(&parse_input("192.168.1.0/24"), "Net1")
        .unwrap_or_else(|e| panic!("{e}"));
    s.insert_many(&parse_input("192.168.3.0/24"), "Net3")
        .unwrap_or_else(|e| panic!("{e}"));
    s.insert_many(&parse_input("192.168.9.0/24"), "Net9")
        .unwrap_or_else(|e| panic!("{e}"));

    let q = parse_input("192.168.0.0/22")[0]
        .interval()
        .unwrap_or_else(|| panic!("no interval"));
    let got = resolve(&s, q).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(got, owners(&["Net1", "Net3"]));

    let got = resolve(&s, iv(0, u32::MAX)).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(got, owners(&["Net1", "Net3", "Net9"]));
}

#[test]
fn shared_ranges_lists_cross_team_intersections() {
    let s = store();
    let a = s.insert(iv(0, 255), "TeamA").unwrap_or_else(|e| panic!("{e}"));
    let b = s.insert(iv(50, 100), "TeamB").unwrap_or_else(|e| panic!("{e}"));
    let c = s.insert(iv(80, 80), "TeamC").unwrap_or_else(|e| panic!("{e}"));
    // 同じチーム同士の重なりは報告しない
    s.insert(iv(10, 20), "TeamA").unwrap_or_else(|e| panic!("{e}"));
    // どこにも重ならない
    s.insert(iv(1000, 2000), "TeamD").unwrap_or_else(|e| panic!("{e}"));

    let shared = shared_ranges(&s).unwrap_or_else(|e| panic!("{e}"));
    let got: Vec<(u32, u32, &str, i64, &str, i64)> = shared
        .iter()
        .map(|x| {
            (
                x.intersection.start(),
                x.intersection.end(),
                x.owner_a.as_str(),
                x.range_a,
                x.owner_b.as_str(),
                x.range_b,
            )
        })
        .collect();
    assert_eq!(
        got,
        vec![
            (50, 100, "TeamA", a, "TeamB", b),
            (80, 80, "TeamA", a, "TeamC", c),
            (80, 80, "TeamB", b, "TeamC", c),
        ]
    );
}

#[test]
fn shared_ranges_of_disjoint_rows_is_empty() {
    let s = store();
    s.insert(iv(0, 9), "X").unwrap_or_else(|e| panic!("{e}"));
    s.insert(iv(10, 19), "Y").unwrap_or_else(|e| panic!("{e}"));
    let rows = s.list(None).unwrap_or_else(|e| panic!("{e}"));
    assert!(find_shared_ranges(&rows).is_empty());
}
