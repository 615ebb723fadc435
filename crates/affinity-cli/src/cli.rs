use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Affinity CLI - builds group-derived pair and triple compatibility tables and searches for the highest-scoring five-role combinations.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of worker threads for table construction and search.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build (or load from cache) the score tables and print a summary.
    Tables(TablesArgs),
    /// Look up the pair score of two entities.
    Pair(PairArgs),
    /// Look up the triple score of three entities.
    Triple(TripleArgs),
    /// Score one explicit five-role combination.
    Score(ScoreArgs),
    /// Find the single best combination for a parent.
    Best(BestArgs),
    /// List the highest-scoring combinations for a parent.
    Top(TopArgs),
}

/// Where the score tables come from; shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct TableSource {
    /// Path to the group table (CSV with id, score, category, members columns).
    #[arg(short, long = "groups", value_name = "PATH")]
    pub groups: Option<PathBuf>,

    /// Directory holding the cached score tables.
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Neither read nor write the score cache.
    #[arg(long, conflicts_with = "cache_dir")]
    pub no_cache: bool,

    /// Recompute the tables even if a cache exists, then overwrite it.
    #[arg(long)]
    pub rebuild: bool,
}

#[derive(Args, Debug)]
pub struct TablesArgs {
    #[command(flatten)]
    pub source: TableSource,

    /// Number of highest-scoring pairs and triples to list.
    #[arg(long, value_name = "INT", default_value_t = 10)]
    pub show: usize,

    /// List every partner of this entity with its pair score.
    #[arg(long, value_name = "NAME")]
    pub entity: Option<String>,
}

#[derive(Args, Debug)]
pub struct PairArgs {
    #[command(flatten)]
    pub source: TableSource,

    pub first: String,
    pub second: String,
}

#[derive(Args, Debug)]
pub struct TripleArgs {
    #[command(flatten)]
    pub source: TableSource,

    pub first: String,
    pub second: String,
    pub third: String,
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub source: TableSource,

    pub parent: String,
    pub grandparent1: String,
    pub grandparent2: String,
    pub chromo1: String,
    pub chromo2: String,

    /// Print the seven individual pair and triple terms.
    #[arg(long)]
    pub breakdown: bool,
}

#[derive(Args, Debug)]
pub struct BestArgs {
    #[command(flatten)]
    pub source: TableSource,

    pub parent: String,
}

#[derive(Args, Debug)]
pub struct TopArgs {
    #[command(flatten)]
    pub source: TableSource,

    pub parent: String,

    /// Number of combinations to list; overrides `search.top-n` from the config file.
    #[arg(short = 'n', long, value_name = "INT")]
    pub count: Option<usize>,
}
