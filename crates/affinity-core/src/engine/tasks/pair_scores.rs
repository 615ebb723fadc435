use crate::core::index::GroupScoreIndex;
use crate::core::models::ids::EntityId;
use crate::core::tables::PairScoreTable;
use itertools::Itertools;
use tracing::{debug, instrument};

/// Scores every unordered pair of the universe on the calling thread.
#[instrument(skip_all, name = "pair_scores_task")]
pub fn run(index: &GroupScoreIndex) -> PairScoreTable {
    let ids: Vec<EntityId> = index.universe().ids().collect();
    let mut table = PairScoreTable::new();
    for (a, b) in ids.iter().copied().tuple_combinations() {
        table.insert(a, b, index.shared_score(&[a, b]));
    }
    debug!("Pair table holds {} non-zero entries.", table.len());
    table
}
