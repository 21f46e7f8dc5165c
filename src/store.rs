use crate::constants::LARGE_RANGE_WARN_SIZE;
use crate::error::AppError;
use crate::ipv4_utils::IpInterval;
use crate::parse::ParsedToken;
use crate::schema;
use chrono::Utc;
use log::{debug, warn};
use rusqlite::{Connection, Row, params, types::Type};
use serde::Serialize;
use std::path::Path;

/// 担当チームごとのIP範囲を保持する永続ストア (SQLite)。
/// 接続の寿命は呼び出し側（リクエスト単位・テストフィクスチャ）が持つ。
pub struct RangeStore {
    conn: Connection,
}

/// 保存済みの1行。範囲は圧縮された1区間として持つ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedRange {
    pub id: i64,
    pub interval: IpInterval,
    pub owner: String,
    pub created_at: String,
}

impl OwnedRange {
    pub fn start_ip(&self) -> String {
        self.interval.start_ip()
    }

    pub fn end_ip(&self) -> String {
        self.interval.end_ip()
    }
}

/// `insert_many` の結果。Invalidトークンは1件ごとにエラー文字列になる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkInsertReport {
    pub added: usize,
    pub errors: Vec<String>,
}

/// チームごとの集計
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerSummary {
    pub owner: String,
    pub ranges: usize,
    pub addresses: u64,
}

const SELECT_COLUMNS: &str = "id, start_ip_long, end_ip_long, team, created_at";

impl RangeStore {
    /// 指定パスのDBを開く（なければ作成）。
    pub fn open(path: &Path) -> Result<Self, AppError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        schema::initialize(&conn)?;
        debug!("range store opened: {}", path.display());
        Ok(Self { conn })
    }

    /// インメモリDB（テスト用）
    pub fn open_in_memory() -> Result<Self, AppError> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// 1区間を1行として追加する。既存行との重複・統合は行わない。
    pub fn insert(&self, interval: IpInterval, owner: &str) -> Result<i64, AppError> {
        validate_owner(owner)?;
        let id = insert_row(&self.conn, interval, owner)?;
        debug!("inserted range {} for {} (id={})", interval, owner, id);
        Ok(id)
    }

    /// 整数の境界値から追加する。start > end ならストアに触れずに失敗する。
    pub fn insert_bounds(&self, start: u32, end: u32, owner: &str) -> Result<i64, AppError> {
        let interval = IpInterval::new(start, end)?;
        self.insert(interval, owner)
    }

    /// 解析済みトークン列をまとめて登録する。
    /// 範囲・CIDRは展開せず1行に圧縮し、バッチ全体を1トランザクションで確定する。
    pub fn insert_many(
        &self,
        tokens: &[ParsedToken],
        owner: &str,
    ) -> Result<BulkInsertReport, AppError> {
        validate_owner(owner)?;
        let mut report = BulkInsertReport::default();

        let tx = self.conn.unchecked_transaction()?;
        for token in tokens {
            let interval = match (token.interval(), token.error()) {
                (Some(iv), _) => iv,
                (None, err) => {
                    report.errors.push(format!(
                        "{}: {}",
                        token.original_text,
                        err.unwrap_or("invalid input")
                    ));
                    continue;
                }
            };
            insert_row(&tx, interval, owner)?;
            report.added += 1;
        }
        tx.commit()?;

        debug!(
            "bulk insert for {}: {} added, {} rejected",
            owner,
            report.added,
            report.errors.len()
        );
        Ok(report)
    }

    /// ownerが prefix で始まる行をすべて削除する（LIKEのワイルドカードは使わない）。
    pub fn delete_by_owner_prefix(&self, prefix: &str) -> Result<usize, AppError> {
        if prefix.is_empty() {
            return Err(AppError::InvalidInput(
                "owner prefix must not be empty".into(),
            ));
        }
        let n = self.conn.execute(
            "DELETE FROM ip_ranges WHERE substr(team, 1, length(?1)) = ?1",
            params![prefix],
        )?;
        debug!("deleted {} range(s) with owner prefix {:?}", n, prefix);
        Ok(n)
    }

    pub fn delete_by_owner_exact(&self, name: &str) -> Result<usize, AppError> {
        let n = self
            .conn
            .execute("DELETE FROM ip_ranges WHERE team = ?1", params![name])?;
        debug!("deleted {} range(s) owned by {:?}", n, name);
        Ok(n)
    }

    /// 1行だけ削除する。該当行があれば true。
    pub fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let n = self
            .conn
            .execute("DELETE FROM ip_ranges WHERE id = ?1", params![id])?;
        Ok(n > 0)
    }

    /// 開始アドレス順の一覧。owner指定時は完全一致で絞り込む。
    pub fn list(&self, owner: Option<&str>) -> Result<Vec<OwnedRange>, AppError> {
        let rows = match owner {
            Some(owner) => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM ip_ranges WHERE team = ?1 \
                     ORDER BY start_ip_long, end_ip_long, id"
                ))?;
                let rows = stmt
                    .query_map(params![owner], row_to_owned_range)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
            None => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM ip_ranges \
                     ORDER BY start_ip_long, end_ip_long, id"
                ))?;
                let rows = stmt
                    .query_map([], row_to_owned_range)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
        };
        Ok(rows)
    }

    pub fn owners(&self) -> Result<Vec<OwnerSummary>, AppError> {
        let mut stmt = self.conn.prepare(
            "SELECT team, COUNT(*), SUM(end_ip_long - start_ip_long + 1) \
             FROM ip_ranges GROUP BY team ORDER BY team",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(OwnerSummary {
                    owner: row.get(0)?,
                    ranges: row.get::<_, i64>(1)? as usize,
                    addresses: row.get::<_, i64>(2)? as u64,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn count(&self) -> Result<usize, AppError> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM ip_ranges", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

/// 上限は設けないが、/8 を超える範囲は登録時に警告対象になる
pub fn is_large_range(interval: IpInterval) -> bool {
    interval.size() > LARGE_RANGE_WARN_SIZE
}

fn validate_owner(owner: &str) -> Result<(), AppError> {
    if owner.trim().is_empty() {
        return Err(AppError::InvalidInput("owner name must not be empty".into()));
    }
    Ok(())
}

// Transaction も Deref で Connection として渡せる
fn insert_row(conn: &Connection, interval: IpInterval, owner: &str) -> Result<i64, AppError> {
    if is_large_range(interval) {
        warn!(
            "large range {} ({} addresses) stored as a single row for {}",
            interval,
            interval.size(),
            owner
        );
    }
    conn.execute(
        "INSERT INTO ip_ranges (start_ip, end_ip, team, start_ip_long, end_ip_long, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            interval.start_ip(),
            interval.end_ip(),
            owner,
            interval.start(),
            interval.end(),
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn row_to_owned_range(row: &Row<'_>) -> Result<OwnedRange, rusqlite::Error> {
    let start: u32 = row.get(1)?;
    let end: u32 = row.get(2)?;
    let interval = IpInterval::new(start, end)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Integer, Box::new(e)))?;
    Ok(OwnedRange {
        id: row.get(0)?,
        interval,
        owner: row.get(3)?,
        created_at: row.get(4)?,
    })
}
