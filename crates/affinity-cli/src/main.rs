mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod report;
mod utils;

use crate::cli::{Cli, Commands};
use crate::commands::Context;
use crate::config::PartialConfig;
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!(
        "🚀 Affinity CLI v{} starting up.",
        env!("CARGO_PKG_VERSION")
    );
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let context = Context {
        config: PartialConfig::load(cli.config.as_deref())?,
        threads: cli.threads,
    };

    let command_result = match cli.command {
        Commands::Tables(args) => {
            info!("Dispatching to 'tables' command.");
            commands::tables::run(args, context)
        }
        Commands::Pair(args) => {
            info!("Dispatching to 'pair' command.");
            commands::lookup::run_pair(args, context)
        }
        Commands::Triple(args) => {
            info!("Dispatching to 'triple' command.");
            commands::lookup::run_triple(args, context)
        }
        Commands::Score(args) => {
            info!("Dispatching to 'score' command.");
            commands::score::run(args, context)
        }
        Commands::Best(args) => {
            info!("Dispatching to 'best' command.");
            commands::search::run_best(args, context)
        }
        Commands::Top(args) => {
            info!("Dispatching to 'top' command.");
            commands::search::run_top(args, context)
        }
    };

    match &command_result {
        Ok(_) => info!("✅ Command completed successfully."),
        Err(e) => error!("❌ Command failed: {}", e),
    }
    command_result
}
