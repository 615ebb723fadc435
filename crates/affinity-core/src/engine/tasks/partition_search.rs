use crate::core::models::assignment::FiveRoleAssignment;
use crate::core::models::ids::EntityId;
use crate::core::scoring::CompatibilityScorer;
use crate::engine::state::{BoundedTopN, RankedCandidate};
use crate::engine::utils::enumeration::PermutationCursor;
use crate::engine::utils::partition::Partition;
use tracing::trace;

/// Free slots filled per candidate: grandparent1, grandparent2, chromo1, chromo2.
pub const FREE_SLOTS: usize = 4;

/// What one worker found in its partition.
#[derive(Debug, Clone)]
pub struct PartitionOutcome {
    pub best: Option<RankedCandidate>,
    pub top: BoundedTopN,
    pub examined: u64,
}

impl PartitionOutcome {
    pub fn empty(top_n: usize) -> Self {
        Self {
            best: None,
            top: BoundedTopN::new(top_n),
            examined: 0,
        }
    }

    /// Folds another outcome into this one; the result is independent of merge order.
    pub fn merge(&mut self, other: PartitionOutcome) {
        self.best = match (self.best, other.best) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        self.top.absorb(other.top);
        self.examined += other.examined;
    }
}

/// Scores every candidate of `part`.
///
/// Candidates are ordered 4-tuples of distinct entries of `candidates`, enumerated
/// lexicographically; a candidate's sequence number is its rank in that global
/// enumeration, so ties resolve identically however the range is partitioned.
pub fn run(
    scorer: &CompatibilityScorer,
    parent: EntityId,
    candidates: &[EntityId],
    part: &Partition,
    top_n: usize,
) -> PartitionOutcome {
    let mut outcome = PartitionOutcome::empty(top_n);
    let mut cursor = PermutationCursor::<FREE_SLOTS>::at_rank(candidates.len(), part.start);

    for sequence in part.start..part.end() {
        let Some(slots) = cursor.current() else {
            break;
        };
        let assignment = FiveRoleAssignment::from_slots(parent, slots.map(|i| candidates[i]));
        let candidate = RankedCandidate {
            score: scorer.score(&assignment.into()),
            sequence,
            assignment,
        };

        if outcome.best.is_none_or(|best| candidate > best) {
            outcome.best = Some(candidate);
        }
        outcome.top.offer(candidate);
        outcome.examined += 1;
        cursor.advance();
    }

    trace!(
        partition = part.index,
        start = part.start,
        examined = outcome.examined,
        best = outcome.best.map(|c| c.score),
        "Search partition complete."
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::universe::Universe;
    use crate::core::tables::{PairScoreTable, Tables, TripleScoreTable};
    use crate::engine::utils::partition::contiguous;

    fn tables() -> Tables {
        let universe = Universe::from_names(["A", "B", "C", "D", "E", "F"]);
        let id = |name| universe.id_of(name).unwrap();
        let mut pairs = PairScoreTable::new();
        pairs.insert(id("A"), id("C"), 5);
        pairs.insert(id("A"), id("D"), 5);
        pairs.insert(id("C"), id("D"), 2);
        let mut triples = TripleScoreTable::new();
        triples.insert(id("A"), id("C"), id("E"), 3);
        Tables::new(universe, pairs, triples)
    }

    fn search_all(tables: &Tables, parts: usize, top_n: usize) -> PartitionOutcome {
        let universe = tables.universe();
        let parent = universe.id_of("A").unwrap();
        let candidates: Vec<EntityId> = universe.ids().filter(|&id| id != parent).collect();
        let scorer = CompatibilityScorer::new(tables);

        let mut merged = PartitionOutcome::empty(top_n);
        for part in contiguous(120, parts) {
            merged.merge(run(&scorer, parent, &candidates, &part, top_n));
        }
        merged
    }

    #[test]
    fn examines_every_ordered_candidate() {
        let outcome = search_all(&tables(), 1, 3);

        // Five remaining entities: 5 * 4 * 3 * 2 = 120 ordered selections.
        assert_eq!(outcome.examined, 120);
    }

    #[test]
    fn best_is_the_first_enumerated_maximum() {
        let tables = tables();
        let outcome = search_all(&tables, 1, 1);
        let best = outcome.best.unwrap();

        // Pairs A-C, A-D, C-D give 12; A-C-E adds 3 once E sits in a slot next to C.
        // (C, D, B, E) is the lexicographically first of the tuples reaching 15.
        assert_eq!(best.score, 15);
        assert_eq!(
            best.assignment.names(tables.universe()),
            ["A", "C", "D", "B", "E"]
        );
        assert_eq!(best.sequence, first_sequence_of(&tables, ["C", "D", "B", "E"]));
    }

    fn first_sequence_of(tables: &Tables, slots: [&str; 4]) -> u64 {
        let universe = tables.universe();
        let parent = universe.id_of("A").unwrap();
        let candidates: Vec<EntityId> = universe.ids().filter(|&id| id != parent).collect();
        let wanted = slots.map(|name| universe.id_of(name).unwrap());
        let mut cursor = PermutationCursor::<FREE_SLOTS>::at_rank(candidates.len(), 0);
        let mut sequence = 0;
        while let Some(current) = cursor.current() {
            if current.map(|i| candidates[i]) == wanted {
                return sequence;
            }
            sequence += 1;
            cursor.advance();
        }
        panic!("candidate not enumerated");
    }

    #[test]
    fn splitting_the_range_does_not_change_results() {
        let tables = tables();
        let reference = search_all(&tables, 1, 10);

        for parts in [2, 7, 120] {
            let split = search_all(&tables, parts, 10);
            assert_eq!(split.best, reference.best);
            assert_eq!(split.examined, reference.examined);
            assert_eq!(split.top.clone().into_ranked(), reference.top.clone().into_ranked());
        }
    }

    #[test]
    fn top_candidates_start_with_best() {
        let outcome = search_all(&tables(), 3, 5);
        let ranked = outcome.top.into_ranked();

        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked.first(), outcome.best.as_ref());
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }
}
