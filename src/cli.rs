use crate::common::{OutputFormat, WriteMode};
use crate::constants::{DB_PATH_ENV, DEFAULT_DB_PATH};
use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLIの定義
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Manage team ownership of IPv4 ranges and look up who owns an IP, range or CIDR block."
)]
pub struct Cli {
    #[arg(
        long = "db",
        env = DB_PATH_ENV,
        default_value = DEFAULT_DB_PATH,
        global = true,
        help = "Path to the SQLite database holding the IP ranges."
    )]
    pub db_path: PathBuf,

    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        help = "Enable debug logging (RUST_LOG takes precedence when set)."
    )]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Assign IPs, ranges or CIDR blocks to a team
    Add(AddArgs),
    /// Remove ranges by team, team-name prefix or row id
    Remove(RemoveArgs),
    /// Resolve IPs, ranges or CIDR blocks to their owning teams
    Lookup(LookupArgs),
    /// List stored ranges
    List(ListArgs),
    /// Show every team with its range count
    Teams(FormatArgs),
    /// Show ranges owned jointly by more than one team
    Shared(FormatArgs),
}

/// 入力の与え方は位置引数とファイルの両方を許す
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    #[arg(
        num_args = 0..,
        help = "IPs, ranges (a.b.c.d-e.f.g.h) or CIDR blocks, separated by spaces or commas.\nExample: 10.0.0.1 10.0.1.0/24 192.168.0.1-192.168.0.9"
    )]
    pub inputs: Vec<String>,

    #[arg(
        short = 'f',
        long = "file",
        help = "Read additional inputs from a file (whitespace, comma or newline separated)."
    )]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(short = 't', long = "team", help = "Team that owns the given ranges.")]
    pub team: String,

    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("target")
        .required(true)
        .args(["team", "prefix", "id"])
))]
pub struct RemoveArgs {
    #[arg(short = 't', long = "team", help = "Remove every range owned by exactly this team.")]
    pub team: Option<String>,

    #[arg(
        short = 'p',
        long = "prefix",
        help = "Remove every range whose team name starts with this prefix."
    )]
    pub prefix: Option<String>,

    #[arg(long = "id", help = "Remove a single range by its row id.")]
    pub id: Option<i64>,
}

#[derive(Args, Debug)]
pub struct LookupArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub format: FormatArgs,

    #[arg(
        short = 'o',
        long = "output",
        help = "Write the report to this file instead of stdout."
    )]
    pub output: Option<PathBuf>,

    #[arg(
        short = 'm',
        long = "mode",
        default_value = "overwrite",
        hide_default_value = true,
        value_parser = clap::value_parser!(WriteMode),
        help = "Select file output mode: 'append' or 'overwrite'.\ndefault: overwrite"
    )]
    pub mode: WriteMode,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(short = 't', long = "team", help = "Only list ranges owned by this team.")]
    pub team: Option<String>,

    #[command(flatten)]
    pub format: FormatArgs,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct FormatArgs {
    #[arg(
        long = "format",
        default_value = "txt",
        hide_default_value = true,
        value_parser = clap::value_parser!(OutputFormat),
        help = "Select output format: 'txt' or 'json'.\ndefault: txt"
    )]
    pub output_format: OutputFormat,
}
