use super::{Context, load_tables};
use crate::cli::{BestArgs, TopArgs};
use crate::error::Result;
use crate::report;
use crate::utils::progress::CliProgressHandler;
use affinity::engine::progress::ProgressReporter;
use affinity::workflows::search::FiveRoleSearch;
use tracing::{info, warn};

pub fn run_best(args: BestArgs, context: Context) -> Result<()> {
    let settings = context.settings(&args.source, None)?;
    let tables = load_tables(&settings)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let search = FiveRoleSearch::new(&tables, settings.search).with_reporter(&reporter);

    println!(
        "Searching {} candidates for parent '{}'...",
        search.candidate_count(&args.parent)?,
        args.parent
    );
    let best = search.best_combination(&args.parent)?;
    info!("Best combination for '{}' scores {}.", args.parent, best.score);

    println!("{}", report::format_combination(tables.universe(), &best));
    Ok(())
}

pub fn run_top(args: TopArgs, context: Context) -> Result<()> {
    let settings = context.settings(&args.source, args.count)?;
    let tables = load_tables(&settings)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let search = FiveRoleSearch::new(&tables, settings.search).with_reporter(&reporter);

    println!(
        "Searching {} candidates for the top {} combination(s) of parent '{}'...",
        search.candidate_count(&args.parent)?,
        settings.top_n,
        args.parent
    );
    let outcome = search.search(&args.parent, settings.top_n)?;
    info!(
        "Examined {} candidates; best score {}.",
        outcome.candidates_examined, outcome.best.score
    );

    if outcome.top.is_empty() {
        warn!("No combinations requested (top-n is 0).");
        println!("No combinations requested.");
    } else {
        print!("{}", report::format_ranking(tables.universe(), &outcome.top));
    }
    Ok(())
}
