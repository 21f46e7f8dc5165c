use crate::common::OutputFormat;
use crate::error::AppError;
use crate::lookup::{LookupResult, summarize};
use crate::output_common::make_header;
use crate::overlap::SharedRange;
use crate::parse::TokenKind;
use crate::store::{OwnedRange, OwnerSummary};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::Write;

#[derive(Serialize)]
struct LookupRecord<'a> {
    input: &'a str,
    kind: TokenKind,
    start_ip: Option<String>,
    end_ip: Option<String>,
    owners: &'a BTreeSet<String>,
    found: bool,
    error: Option<&'a str>,
}

#[derive(Serialize)]
struct RangeRecord<'a> {
    id: i64,
    start_ip: String,
    end_ip: String,
    start_ip_long: u32,
    end_ip_long: u32,
    team: &'a str,
    addresses: u64,
    cidrs: Vec<String>,
    created_at: &'a str,
}

#[derive(Serialize)]
struct SharedRecord<'a> {
    start_ip: String,
    end_ip: String,
    owner_a: &'a str,
    range_a: i64,
    owner_b: &'a str,
    range_b: i64,
}

/// 照会結果を入力順のままレポートにする
pub fn render_lookup(
    results: &[LookupResult],
    format: OutputFormat,
    now_str: &str,
) -> Result<String, AppError> {
    match format {
        OutputFormat::Json => {
            let records: Vec<LookupRecord<'_>> = results
                .iter()
                .map(|r| {
                    let interval = r.token.interval();
                    LookupRecord {
                        input: &r.token.original_text,
                        kind: r.token.kind(),
                        start_ip: interval.map(|iv| iv.start_ip()),
                        end_ip: interval.map(|iv| iv.end_ip()),
                        owners: &r.owners,
                        found: r.found,
                        error: r.error.as_deref(),
                    }
                })
                .collect();
            Ok(format!("{}\n", serde_json::to_string_pretty(&records)?))
        }
        OutputFormat::Txt => {
            let s = summarize(results);
            let mut out = make_header(
                now_str,
                "IP ownership lookup",
                &format!(
                    "Inputs: {} (found {}, not found {}, invalid {})",
                    s.total, s.found, s.not_found, s.invalid
                ),
            );
            for r in results {
                let range = r
                    .token
                    .interval()
                    .map(|iv| format!("{}-{}", iv.start_ip(), iv.end_ip()))
                    .unwrap_or_else(|| "-".to_string());
                let detail = match (&r.error, r.found) {
                    (Some(e), _) => format!("error: {}", e),
                    (None, true) => r.owners.iter().cloned().collect::<Vec<_>>().join(", "),
                    (None, false) => "(no owner)".to_string(),
                };
                let _ = writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    r.token.original_text,
                    r.token.kind(),
                    range,
                    detail
                );
            }
            Ok(out)
        }
    }
}

/// 保存済み範囲の一覧。各行は覆うCIDR列も併記する。
pub fn render_ranges(
    rows: &[OwnedRange],
    format: OutputFormat,
    now_str: &str,
) -> Result<String, AppError> {
    match format {
        OutputFormat::Json => {
            let records: Vec<RangeRecord<'_>> = rows
                .iter()
                .map(|r| RangeRecord {
                    id: r.id,
                    start_ip: r.start_ip(),
                    end_ip: r.end_ip(),
                    start_ip_long: r.interval.start(),
                    end_ip_long: r.interval.end(),
                    team: &r.owner,
                    addresses: r.interval.size(),
                    cidrs: cidr_strings(r),
                    created_at: &r.created_at,
                })
                .collect();
            Ok(format!("{}\n", serde_json::to_string_pretty(&records)?))
        }
        OutputFormat::Txt => {
            let mut out = make_header(
                now_str,
                "IP ranges",
                &format!("Ranges: {}", rows.len()),
            );
            for r in rows {
                let _ = writeln!(
                    out,
                    "{}\t{}-{}\t{}\t{}\t{}",
                    r.id,
                    r.start_ip(),
                    r.end_ip(),
                    r.owner,
                    r.interval.size(),
                    cidr_strings(r).join(" ")
                );
            }
            Ok(out)
        }
    }
}

pub fn render_owners(
    owners: &[OwnerSummary],
    format: OutputFormat,
    now_str: &str,
) -> Result<String, AppError> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(owners)?)),
        OutputFormat::Txt => {
            let mut out = make_header(now_str, "Teams", &format!("Teams: {}", owners.len()));
            for o in owners {
                let _ = writeln!(
                    out,
                    "{}\t{} range(s)\t{} address(es)",
                    o.owner, o.ranges, o.addresses
                );
            }
            Ok(out)
        }
    }
}

/// 共同所有区間のレポート
pub fn render_shared(
    shared: &[SharedRange],
    format: OutputFormat,
    now_str: &str,
) -> Result<String, AppError> {
    match format {
        OutputFormat::Json => {
            let records: Vec<SharedRecord<'_>> = shared
                .iter()
                .map(|s| SharedRecord {
                    start_ip: s.intersection.start_ip(),
                    end_ip: s.intersection.end_ip(),
                    owner_a: &s.owner_a,
                    range_a: s.range_a,
                    owner_b: &s.owner_b,
                    range_b: s.range_b,
                })
                .collect();
            Ok(format!("{}\n", serde_json::to_string_pretty(&records)?))
        }
        OutputFormat::Txt => {
            let mut out = make_header(
                now_str,
                "Jointly owned ranges",
                &format!("Overlaps: {}", shared.len()),
            );
            for s in shared {
                let _ = writeln!(
                    out,
                    "{}-{}\t{} (#{})\t{} (#{})",
                    s.intersection.start_ip(),
                    s.intersection.end_ip(),
                    s.owner_a,
                    s.range_a,
                    s.owner_b,
                    s.range_b
                );
            }
            Ok(out)
        }
    }
}

fn cidr_strings(row: &OwnedRange) -> Vec<String> {
    row.interval
        .to_cidrs()
        .iter()
        .map(|net| net.to_string())
        .collect()
}
