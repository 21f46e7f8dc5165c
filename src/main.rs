use amt_iprange::cli::{Cli, Command};
use amt_iprange::commands::{handle_add, handle_list, handle_lookup, handle_remove};
use amt_iprange::error::AppError;
use amt_iprange::store::RangeStore;
use clap::Parser;
use log::debug;

fn main() {
    let args = Cli::parse();
    init_logger(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// RUST_LOG があればそれを優先し、なければ --verbose で debug に上げる
fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

/// アプリケーションのメインロジック
fn run(args: Cli) -> Result<(), AppError> {
    // ストアはこの実行の間だけ開いておく
    let store = RangeStore::open(&args.db_path)?;
    debug!("using database {}", args.db_path.display());

    match &args.command {
        Command::Add(a) => {
            handle_add::run_add(&store, a)?;
        }
        Command::Remove(a) => {
            handle_remove::run_remove(&store, a)?;
        }
        Command::Lookup(a) => {
            handle_lookup::run_lookup(&store, a)?;
        }
        Command::List(a) => handle_list::run_list(&store, a)?,
        Command::Teams(a) => handle_list::run_teams(&store, a)?,
        Command::Shared(a) => handle_list::run_shared(&store, a)?,
    }
    Ok(())
}
