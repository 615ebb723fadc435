use crate::core::index::GroupScoreIndex;
use crate::core::io::groups::GroupInput;
use crate::core::tables::Tables;
use crate::engine::cache::ScoreCache;
use crate::engine::config::BuildConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::{pair_scores, triple_scores};
use tracing::{info, instrument, warn};

/// Returns the score tables, restoring them from the cache when possible.
///
/// A usable cache short-circuits everything: the group input is not even read. On a
/// miss (or with `force_rebuild`) the tables are computed from scratch and, if a cache
/// directory is configured, written back before returning. A failed write is logged and
/// the freshly built tables are still returned.
#[instrument(skip_all, name = "tables_workflow")]
pub fn build_or_load(
    input: GroupInput,
    config: &BuildConfig,
    reporter: &ProgressReporter,
) -> Result<Tables, EngineError> {
    let cache = config.cache_dir.as_ref().map(ScoreCache::new);

    if let Some(cache) = cache.as_ref().filter(|_| !config.force_rebuild) {
        reporter.report(Progress::PhaseStart {
            name: "Loading Cache",
        });
        let cached = cache.load();
        reporter.report(Progress::PhaseFinish);

        if let Some(tables) = cached {
            info!(
                "Using cached tables from {:?}; skipping recomputation.",
                cache.directory()
            );
            return Ok(tables);
        }
    }

    let tables = build(input, config, reporter)?;

    if let Some(cache) = &cache {
        reporter.report(Progress::PhaseStart {
            name: "Saving Cache",
        });
        if let Err(e) = cache.save(&tables) {
            warn!("Could not write cache at {:?}: {}", cache.directory(), e);
        }
        reporter.report(Progress::PhaseFinish);
    }
    Ok(tables)
}

/// Computes the score tables from group input, ignoring any cache.
#[instrument(skip_all, name = "tables_build")]
pub fn build(
    input: GroupInput,
    config: &BuildConfig,
    reporter: &ProgressReporter,
) -> Result<Tables, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Indexing Groups",
    });
    let index = GroupScoreIndex::build(input.into_groups()?)?;
    info!(
        "Indexed {} groups over {} entities.",
        index.groups().len(),
        index.universe().len()
    );
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Pair Scores",
    });
    let pairs = pair_scores::run(&index);
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Triple Scores",
    });
    let triples = triple_scores::run(&index, config.workers.resolve(), reporter)?;
    reporter.report(Progress::PhaseFinish);

    let tables = Tables::new(index.universe().clone(), pairs, triples);
    info!(
        "Built tables with {} pair and {} triple entries.",
        tables.pair_entries(),
        tables.triple_entries()
    );
    Ok(tables)
}
