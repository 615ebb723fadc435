use crate::core::index::GroupScoreIndex;
use crate::core::tables::TripleScoreTable;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::utils::enumeration::{CombinationCursor, combinations_count};
use crate::engine::utils::partition::{self, Partition};
use crate::engine::utils::pool;
use tracing::{debug, info, instrument, trace};

/// Scores every unordered triple of the universe in parallel.
///
/// The sorted-triple enumeration is cut into contiguous partitions, one per worker.
/// Each triple belongs to exactly one partition, so the partial tables have disjoint
/// keys and merge by plain union.
#[instrument(skip_all, name = "triple_scores_task", fields(workers = workers))]
pub fn run(
    index: &GroupScoreIndex,
    workers: usize,
    reporter: &ProgressReporter,
) -> Result<TripleScoreTable, EngineError> {
    let universe_size = index.universe().len();
    let total = combinations_count(universe_size, 3).ok_or(EngineError::SearchSpaceOverflow {
        universe: universe_size,
    })?;
    let partitions = partition::contiguous(total, workers);

    info!(
        "Scoring {} triples across {} partition(s).",
        total,
        partitions.len()
    );
    reporter.report(Progress::TaskStart { total_steps: total });

    let partials = pool::run_partitions(workers, &partitions, |part| {
        let table = score_partition(index, part);
        reporter.report(Progress::TaskAdvance { steps: part.len });
        table
    })?;

    let mut table = TripleScoreTable::new();
    for partial in partials {
        table.extend(partial);
    }
    reporter.report(Progress::TaskFinish);

    debug!("Triple table holds {} non-zero entries.", table.len());
    Ok(table)
}

fn score_partition(index: &GroupScoreIndex, part: &Partition) -> TripleScoreTable {
    let universe = index.universe();
    let ids: Vec<_> = universe.ids().collect();
    let mut cursor = CombinationCursor::<3>::at_rank(ids.len(), part.start);
    let mut table = TripleScoreTable::new();

    for _ in 0..part.len {
        let Some(&[i, j, k]) = cursor.current() else {
            break;
        };
        let (a, b, c) = (ids[i], ids[j], ids[k]);
        table.insert(a, b, c, index.shared_score(&[a, b, c]));
        cursor.advance();
    }

    trace!(
        partition = part.index,
        start = part.start,
        len = part.len,
        entries = table.len(),
        "Triple partition complete."
    );
    table
}
