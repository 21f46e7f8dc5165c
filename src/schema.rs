use rusqlite::Connection;

/// ip_ranges テーブルと索引を作成する。既存DBに対しても安全に再実行できる。
pub fn initialize(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS ip_ranges (
             id            INTEGER PRIMARY KEY AUTOINCREMENT,
             start_ip      TEXT    NOT NULL,
             end_ip        TEXT    NOT NULL,
             team          TEXT    NOT NULL CHECK (length(team) > 0),
             start_ip_long INTEGER NOT NULL CHECK (start_ip_long BETWEEN 0 AND 4294967295),
             end_ip_long   INTEGER NOT NULL CHECK (end_ip_long BETWEEN 0 AND 4294967295),
             created_at    TEXT    NOT NULL,
             CHECK (start_ip_long <= end_ip_long)
         );
         CREATE INDEX IF NOT EXISTS idx_ip_ranges_start ON ip_ranges (start_ip_long);
         CREATE INDEX IF NOT EXISTS idx_ip_ranges_end   ON ip_ranges (end_ip_long);
         CREATE INDEX IF NOT EXISTS idx_ip_ranges_team  ON ip_ranges (team);",
    )
}
