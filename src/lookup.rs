use crate::overlap::resolve;
use crate::parse::{ParsedToken, TokenKind, parse_input};
use crate::store::RangeStore;
use log::{debug, warn};
use std::collections::BTreeSet;

/// 入力トークン1件ぶんの照会結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    pub token: ParsedToken,
    pub owners: BTreeSet<String>,
    pub found: bool,
    /// トークンの解析エラー、またはこのトークンの照会中に起きたストアエラー
    pub error: Option<String>,
}

/// 結果一覧の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupSummary {
    pub total: usize,
    pub found: usize,
    pub not_found: usize,
    pub invalid: usize,
}

/// 自由入力を解析し、各トークンを所有チームに解決する。
/// 出力順は入力順と一致し、1件の失敗で残りを打ち切らない。
pub fn lookup_all(store: &RangeStore, raw_text: &str) -> Vec<LookupResult> {
    let tokens = parse_input(raw_text);
    lookup_tokens(store, tokens)
}

pub fn lookup_tokens(store: &RangeStore, tokens: Vec<ParsedToken>) -> Vec<LookupResult> {
    let results: Vec<LookupResult> = tokens
        .into_iter()
        .map(|token| lookup_token(store, token))
        .collect();
    debug!("looked up {} token(s)", results.len());
    results
}

fn lookup_token(store: &RangeStore, token: ParsedToken) -> LookupResult {
    let interval = match token.interval() {
        Some(iv) => iv,
        None => {
            let error = token.error().map(str::to_string);
            return LookupResult {
                token,
                owners: BTreeSet::new(),
                found: false,
                error,
            };
        }
    };

    match resolve(store, interval) {
        Ok(owners) => LookupResult {
            found: !owners.is_empty(),
            token,
            owners,
            error: None,
        },
        Err(e) => {
            warn!("lookup of {} failed: {}", token.original_text, e);
            LookupResult {
                token,
                owners: BTreeSet::new(),
                found: false,
                error: Some(e.to_string()),
            }
        }
    }
}

pub fn summarize(results: &[LookupResult]) -> LookupSummary {
    let mut summary = LookupSummary {
        total: results.len(),
        ..LookupSummary::default()
    };
    for r in results {
        if r.token.kind() == TokenKind::Invalid {
            summary.invalid += 1;
        } else if r.found {
            summary.found += 1;
        } else {
            summary.not_found += 1;
        }
    }
    summary
}
