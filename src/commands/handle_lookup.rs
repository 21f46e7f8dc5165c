use crate::cli::LookupArgs;
use crate::commands::{collect_input_text, now_str};
use crate::error::AppError;
use crate::lookup::{LookupResult, lookup_all};
use crate::output::render_lookup;
use crate::output_common::emit;
use crate::store::RangeStore;

/// 照会画面に相当する処理。結果は入力順のまま出力する。
pub fn run_lookup(store: &RangeStore, args: &LookupArgs) -> Result<Vec<LookupResult>, AppError> {
    let text = collect_input_text(&args.input)?;
    let results = lookup_all(store, &text);
    let report = render_lookup(&results, args.format.output_format, &now_str())?;
    emit(args.output.as_ref(), &report, args.mode)?;
    Ok(results)
}
