/// 定数の共通化

/// `--db` 未指定かつ環境変数もない場合のDBファイル
pub const DEFAULT_DB_PATH: &str = "amt_ip_ranges.db";

/// DBパスを上書きする環境変数
pub const DB_PATH_ENV: &str = "AMT_DB_PATH";

/// これを超える範囲は受け付けるが警告を出す (/8 = 2^24)
pub const LARGE_RANGE_WARN_SIZE: u64 = 1 << 24;

/// レポートヘッダーのタイムスタンプ書式
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
