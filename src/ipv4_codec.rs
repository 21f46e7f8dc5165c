//! ドット区切りIPv4文字列と符号なし32bit整数の相互変換。
//! 4オクテット・各0-255・余計な文字なし、以外はすべて拒否する。
use crate::error::AppError;
use std::net::Ipv4Addr;

/// "a.b.c.d" を `(a<<24)|(b<<16)|(c<<8)|d` に変換する。
pub fn encode(text: &str) -> Result<u32, AppError> {
    encode_addr(text).map(u32::from)
}

/// `encode` と同じ検証で `Ipv4Addr` を返す。
pub fn encode_addr(text: &str) -> Result<Ipv4Addr, AppError> {
    // 成分数・オクテット範囲・前後の空白はstdのパーサがまとめて弾く
    text.parse::<Ipv4Addr>()
        .map_err(|_| AppError::InvalidFormat(text.to_string()))
}

/// 任意のu32をドット区切り表記に戻す。失敗しない。
pub fn decode(value: u32) -> String {
    Ipv4Addr::from(value).to_string()
}
