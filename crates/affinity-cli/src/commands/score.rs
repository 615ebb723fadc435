use super::{Context, load_tables};
use crate::cli::ScoreArgs;
use crate::error::Result;
use crate::report;
use affinity::core::models::assignment::ScoredCombination;
use affinity::workflows::search::FiveRoleSearch;

pub fn run(args: ScoreArgs, context: Context) -> Result<()> {
    let settings = context.settings(&args.source, None)?;
    let tables = load_tables(&settings)?;
    let search = FiveRoleSearch::new(&tables, settings.search);

    let assignment = search.specific_assignment(
        &args.parent,
        &args.grandparent1,
        &args.grandparent2,
        &args.chromo1,
        &args.chromo2,
    )?;
    let breakdown = search.scorer().breakdown(&assignment.into());

    println!(
        "{}",
        report::format_combination(
            tables.universe(),
            &ScoredCombination {
                assignment,
                score: breakdown.total(),
            }
        )
    );
    if args.breakdown {
        print!(
            "{}",
            report::format_breakdown(tables.universe(), assignment, &breakdown)
        );
    }
    Ok(())
}
