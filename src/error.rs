use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ドット区切りIPv4として解釈できない
    #[error("invalid IP address format: {0}")]
    InvalidFormat(String),

    // CIDRのベースアドレス・プレフィックス長が不正
    #[error("invalid CIDR: {0}")]
    InvalidCidr(String),

    // 開始IPが終了IPより大きい
    #[error("start IP must be less than or equal to end IP ({start} > {end})")]
    InvalidRange { start: String, end: String },

    // SQLite側の失敗（接続・制約違反など）
    #[error("store failure: {0}")]
    Store(#[from] rusqlite::Error),

    // IOまわりのエラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // JSON出力時のシリアライズ失敗
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // 特定の入力が不正だった場合など
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
