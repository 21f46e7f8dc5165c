use crate::error::AppError;
use crate::ipv4_utils::IpInterval;
use crate::store::{OwnedRange, RangeStore};
use rusqlite::params;
use std::collections::BTreeSet;

/// クエリ区間と交差する行の owner を重複なしで返す。
/// 包含ではなく交差判定 (`s <= qe AND e >= qs`) なので部分的な重なりも一致する。
/// 単一IPも `qs == qe` として同じ経路で解決する。
pub fn resolve(store: &RangeStore, query: IpInterval) -> Result<BTreeSet<String>, AppError> {
    let mut stmt = store.conn().prepare_cached(
        "SELECT DISTINCT team FROM ip_ranges \
         WHERE start_ip_long <= ?1 AND end_ip_long >= ?2 \
         ORDER BY team",
    )?;
    let owners = stmt
        .query_map(params![query.end(), query.start()], |row| row.get::<_, String>(0))?
        .collect::<Result<BTreeSet<_>, _>>()?;
    Ok(owners)
}

/// 異なるチームが共同で持っている区間
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedRange {
    pub intersection: IpInterval,
    pub owner_a: String,
    pub range_a: i64,
    pub owner_b: String,
    pub range_b: i64,
}

/// 保存済みの行から、owner が異なり区間が重なる組をすべて列挙する。
/// 開始アドレス順に走査し、まだ終わっていない行だけを比較対象として残す。
pub fn find_shared_ranges(rows: &[OwnedRange]) -> Vec<SharedRange> {
    let mut sorted: Vec<&OwnedRange> = rows.iter().collect();
    sorted.sort_by_key(|r| (r.interval.start(), r.interval.end(), r.id));

    let mut active: Vec<&OwnedRange> = Vec::new();
    let mut result = Vec::new();

    for row in sorted {
        let start = row.interval.start();
        // 現在の開始位置より前に終わった行は以後どれとも交差しない
        active.retain(|a| a.interval.end() >= start);

        for other in &active {
            if other.owner == row.owner {
                continue;
            }
            if let Some(intersection) = other.interval.intersection(&row.interval) {
                result.push(make_shared(intersection, other, row));
            }
        }
        active.push(row);
    }

    result.sort_by(|x, y| {
        (x.intersection, &x.owner_a, &x.owner_b, x.range_a, x.range_b).cmp(&(
            y.intersection,
            &y.owner_a,
            &y.owner_b,
            y.range_a,
            y.range_b,
        ))
    });
    result
}

/// ストア全体の共同所有区間
pub fn shared_ranges(store: &RangeStore) -> Result<Vec<SharedRange>, AppError> {
    let rows = store.list(None)?;
    Ok(find_shared_ranges(&rows))
}

// owner名の小さい方を a 側に置く
fn make_shared(intersection: IpInterval, x: &OwnedRange, y: &OwnedRange) -> SharedRange {
    let (a, b) = if (&x.owner, x.id) <= (&y.owner, y.id) {
        (x, y)
    } else {
        (y, x)
    };
    SharedRange {
        intersection,
        owner_a: a.owner.clone(),
        range_a: a.id,
        owner_b: b.owner.clone(),
        range_b: b.id,
    }
}
