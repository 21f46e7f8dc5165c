//! AMT のIP所有者照会エンジン。
//!
//! チームごとのIPv4範囲・CIDRブロックを圧縮された区間としてSQLiteに保存し、
//! 単一IP・範囲・CIDRの照会に対して重なるすべての所有チームを返す。
pub mod cli;
pub mod commands;
pub mod common;
pub mod constants;
pub mod error;
pub mod ipv4_codec;
pub mod ipv4_utils;
pub mod lookup;
pub mod output;
pub mod output_common;
pub mod overlap;
pub mod parse;
pub mod schema;
pub mod store;
