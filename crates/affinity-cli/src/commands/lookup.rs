use super::{Context, load_tables};
use crate::cli::{PairArgs, TripleArgs};
use crate::error::Result;
use affinity::core::tables::Tables;
use affinity::engine::error::EngineError;

fn ensure_known(tables: &Tables, names: &[&str]) -> Result<()> {
    match names.iter().find(|name| !tables.universe().contains(name)) {
        Some(name) => Err(EngineError::UnknownEntity {
            name: name.to_string(),
        }
        .into()),
        None => Ok(()),
    }
}

pub fn run_pair(args: PairArgs, context: Context) -> Result<()> {
    let settings = context.settings(&args.source, None)?;
    let tables = load_tables(&settings)?;
    ensure_known(&tables, &[args.first.as_str(), args.second.as_str()])?;

    let score = tables.pair_score(&args.first, &args.second);
    println!("{} + {}: {}", args.first, args.second, score);
    Ok(())
}

pub fn run_triple(args: TripleArgs, context: Context) -> Result<()> {
    let settings = context.settings(&args.source, None)?;
    let tables = load_tables(&settings)?;
    ensure_known(&tables, &[
        args.first.as_str(),
        args.second.as_str(),
        args.third.as_str(),
    ])?;

    let score = tables.triple_score(&args.first, &args.second, &args.third);
    println!(
        "{} + {} + {}: {}",
        args.first, args.second, args.third, score
    );
    Ok(())
}
