use crate::cli::AddArgs;
use crate::commands::collect_input_text;
use crate::error::AppError;
use crate::parse::parse_input;
use crate::store::{BulkInsertReport, RangeStore};

/// 管理画面の一括登録に相当する処理
pub fn run_add(store: &RangeStore, args: &AddArgs) -> Result<BulkInsertReport, AppError> {
    let text = collect_input_text(&args.input)?;
    let tokens = parse_input(&text);
    let report = store.insert_many(&tokens, &args.team)?;

    println!("Added {} range(s) for {}", report.added, args.team);
    for e in &report.errors {
        eprintln!("Skipped {}", e);
    }
    Ok(report)
}
