use crate::cli::RemoveArgs;
use crate::error::AppError;
use crate::store::RangeStore;

/// 削除対象の指定はclap側で1つに絞られている
pub fn run_remove(store: &RangeStore, args: &RemoveArgs) -> Result<usize, AppError> {
    let removed = if let Some(team) = &args.team {
        store.delete_by_owner_exact(team)?
    } else if let Some(prefix) = &args.prefix {
        store.delete_by_owner_prefix(prefix)?
    } else if let Some(id) = args.id {
        usize::from(store.delete_by_id(id)?)
    } else {
        return Err(AppError::InvalidInput(
            "specify --team, --prefix or --id".into(),
        ));
    };

    println!("Removed {} range(s)", removed);
    Ok(removed)
}
