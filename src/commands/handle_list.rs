use crate::cli::{FormatArgs, ListArgs};
use crate::commands::now_str;
use crate::common::WriteMode;
use crate::error::AppError;
use crate::output::{render_owners, render_ranges, render_shared};
use crate::output_common::emit;
use crate::overlap::shared_ranges;
use crate::store::RangeStore;
use std::path::PathBuf;

pub fn run_list(store: &RangeStore, args: &ListArgs) -> Result<(), AppError> {
    let rows = store.list(args.team.as_deref())?;
    let report = render_ranges(&rows, args.format.output_format, &now_str())?;
    emit(None::<PathBuf>, &report, WriteMode::Overwrite)
}

pub fn run_teams(store: &RangeStore, args: &FormatArgs) -> Result<(), AppError> {
    let owners = store.owners()?;
    let report = render_owners(&owners, args.output_format, &now_str())?;
    emit(None::<PathBuf>, &report, WriteMode::Overwrite)
}

/// 複数チームで重なっている区間の一覧
pub fn run_shared(store: &RangeStore, args: &FormatArgs) -> Result<(), AppError> {
    let shared = shared_ranges(store)?;
    if shared.is_empty() {
        println!("[shared] No range is owned by more than one team");
        return Ok(());
    }
    let report = render_shared(&shared, args.output_format, &now_str())?;
    emit(None::<PathBuf>, &report, WriteMode::Overwrite)
}
