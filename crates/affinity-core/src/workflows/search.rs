use crate::core::models::assignment::{FiveRoleAssignment, ScoredCombination};
use crate::core::models::ids::EntityId;
use crate::core::scoring::{CompatibilityScorer, ScoreBreakdown};
use crate::core::tables::Tables;
use crate::engine::config::SearchConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::partition_search::{self, FREE_SLOTS, PartitionOutcome};
use crate::engine::utils::enumeration::permutations_count;
use crate::engine::utils::{partition, pool};
use std::collections::HashSet;
use tracing::{info, instrument};

/// Result of one exhaustive search around a parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub best: ScoredCombination,
    /// Highest-scoring combinations, best first; `top[0] == best` whenever non-empty.
    pub top: Vec<ScoredCombination>,
    pub candidates_examined: u64,
}

/// Finds the best five-role combinations for a fixed parent.
///
/// Every ordered selection of four distinct non-parent entities is scored through the
/// seven-role mapping. Candidates are numbered by their rank in the lexicographic
/// enumeration over the sorted universe; among equal scores the lower rank wins, for
/// any worker count.
pub struct FiveRoleSearch<'a> {
    tables: &'a Tables,
    scorer: CompatibilityScorer<'a>,
    config: SearchConfig,
    reporter: Option<&'a ProgressReporter<'a>>,
}

impl<'a> FiveRoleSearch<'a> {
    pub fn new(tables: &'a Tables, config: SearchConfig) -> Self {
        Self {
            tables,
            scorer: CompatibilityScorer::new(tables),
            config,
            reporter: None,
        }
    }

    pub fn with_reporter(mut self, reporter: &'a ProgressReporter<'a>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn scorer(&self) -> CompatibilityScorer<'a> {
        self.scorer
    }

    /// Number of candidates a search around `parent` examines: `P(U - 1, 4)`.
    pub fn candidate_count(&self, parent: &str) -> Result<u64, EngineError> {
        self.resolve(parent)?;
        self.count_for(self.tables.universe().len() - 1)
    }

    pub fn best_combination(&self, parent: &str) -> Result<ScoredCombination, EngineError> {
        Ok(self.search(parent, 1)?.best)
    }

    pub fn top_n_combinations(
        &self,
        parent: &str,
        n: usize,
    ) -> Result<Vec<ScoredCombination>, EngineError> {
        Ok(self.search(parent, n)?.top)
    }

    /// Runs the full search once, keeping the best combination and the top `n`.
    #[instrument(skip_all, name = "five_role_search", fields(parent = parent, top_n = n))]
    pub fn search(&self, parent: &str, n: usize) -> Result<SearchReport, EngineError> {
        let universe = self.tables.universe();
        let parent_id = self.resolve(parent)?;
        let candidates: Vec<EntityId> = universe.ids().filter(|&id| id != parent_id).collect();
        if candidates.len() < FREE_SLOTS {
            return Err(EngineError::InsufficientUniverse {
                required: FREE_SLOTS,
                available: candidates.len(),
            });
        }
        let total = self.count_for(candidates.len())?;
        let n = usize::try_from(total).map_or(n, |total| n.min(total));

        let workers = self.config.workers.resolve();
        let partitions = partition::contiguous(total, workers);
        info!(
            "Searching {} candidates for parent '{}' across {} partition(s).",
            total,
            parent,
            partitions.len()
        );
        self.report(Progress::TaskStart { total_steps: total });

        let outcomes = pool::run_partitions(workers, &partitions, |part| {
            let outcome = partition_search::run(&self.scorer, parent_id, &candidates, part, n);
            self.report(Progress::TaskAdvance {
                steps: outcome.examined,
            });
            outcome
        })?;

        let mut merged = PartitionOutcome::empty(n);
        for outcome in outcomes {
            merged.merge(outcome);
        }
        self.report(Progress::TaskFinish);

        let best = merged
            .best
            .ok_or(EngineError::InsufficientUniverse {
                required: FREE_SLOTS,
                available: candidates.len(),
            })?
            .into_scored();
        info!(
            score = best.score,
            examined = merged.examined,
            "Search complete."
        );

        Ok(SearchReport {
            best,
            top: merged
                .top
                .into_ranked()
                .into_iter()
                .map(|c| c.into_scored())
                .collect(),
            candidates_examined: merged.examined,
        })
    }

    /// Validates and maps an explicit combination without scoring it.
    ///
    /// All five names must be universe members and pairwise distinct; unknown names are
    /// reported before duplicates.
    pub fn specific_assignment(
        &self,
        parent: &str,
        grandparent1: &str,
        grandparent2: &str,
        chromo1: &str,
        chromo2: &str,
    ) -> Result<FiveRoleAssignment, EngineError> {
        let names = [parent, grandparent1, grandparent2, chromo1, chromo2];
        let [p, g1, g2, c1, c2] = names.map(|name| self.resolve(name));
        let assignment = FiveRoleAssignment::from_slots(p?, [g1?, g2?, c1?, c2?]);

        let mut seen = HashSet::with_capacity(names.len());
        if let Some(name) = names.iter().find(|name| !seen.insert(**name)) {
            return Err(EngineError::DuplicateEntity {
                name: name.to_string(),
            });
        }
        Ok(assignment)
    }

    pub fn score_specific(
        &self,
        parent: &str,
        grandparent1: &str,
        grandparent2: &str,
        chromo1: &str,
        chromo2: &str,
    ) -> Result<i64, EngineError> {
        let assignment =
            self.specific_assignment(parent, grandparent1, grandparent2, chromo1, chromo2)?;
        Ok(self.scorer.score(&assignment.into()))
    }

    /// Like [`Self::score_specific`], with the seven individual terms.
    pub fn breakdown_specific(
        &self,
        parent: &str,
        grandparent1: &str,
        grandparent2: &str,
        chromo1: &str,
        chromo2: &str,
    ) -> Result<ScoreBreakdown, EngineError> {
        let assignment =
            self.specific_assignment(parent, grandparent1, grandparent2, chromo1, chromo2)?;
        Ok(self.scorer.breakdown(&assignment.into()))
    }

    fn resolve(&self, name: &str) -> Result<EntityId, EngineError> {
        self.tables
            .universe()
            .id_of(name)
            .ok_or_else(|| EngineError::UnknownEntity {
                name: name.to_string(),
            })
    }

    fn count_for(&self, candidates: usize) -> Result<u64, EngineError> {
        permutations_count(candidates, FREE_SLOTS).ok_or(EngineError::SearchSpaceOverflow {
            universe: self.tables.universe().len(),
        })
    }

    fn report(&self, event: Progress) {
        if let Some(reporter) = self.reporter {
            reporter.report(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::group::Group;
    use crate::engine::config::{BuildConfigBuilder, SearchConfigBuilder};
    use crate::workflows::tables;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn build(groups: Vec<Group>) -> Tables {
        let config = BuildConfigBuilder::new().workers(2).build().unwrap();
        tables::build(groups.into(), &config, &ProgressReporter::new()).unwrap()
    }

    fn scenario() -> Tables {
        build(vec![
            Group::new(1, 10, ["A", "B", "C"]),
            Group::new(2, 0, ["D", "E", "F"]),
        ])
    }

    fn richer() -> Tables {
        build(vec![
            Group::new(1, 10, ["A", "B", "C"]),
            Group::new(2, 4, ["B", "C", "D", "none"]),
            Group::new(3, -3, ["A", "E", "G"]),
            Group::new(4, 6, ["A", "D", "F", "G"]),
            Group::new(5, 2, ["C", "F", "G", "H"]),
        ])
    }

    fn searcher(tables: &Tables, workers: usize) -> FiveRoleSearch<'_> {
        let config = SearchConfigBuilder::new().workers(workers).build().unwrap();
        FiveRoleSearch::new(tables, config)
    }

    fn names(tables: &Tables, combination: &ScoredCombination) -> [String; 5] {
        combination
            .assignment
            .names(tables.universe())
            .map(str::to_string)
    }

    #[test]
    fn single_group_scenario_picks_first_maximum() {
        let tables = scenario();
        let best = searcher(&tables, 3).best_combination("A").unwrap();

        // B and C as grandparents hit all three pair terms and the A-C-B triple term.
        assert_eq!(best.score, 40);
        assert_eq!(names(&tables, &best), ["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn examines_every_ordered_candidate() {
        let tables = scenario();
        let search = searcher(&tables, 4);

        let report = search.search("A", 5).unwrap();

        assert_eq!(search.candidate_count("A").unwrap(), 5 * 4 * 3 * 2);
        assert_eq!(report.candidates_examined, 120);
    }

    #[test]
    fn top_n_is_sorted_bounded_and_led_by_best() {
        let tables = richer();
        let search = searcher(&tables, 2);
        let total = search.candidate_count("B").unwrap() as usize;
        let best = search.best_combination("B").unwrap();

        for n in [1, 3, 17, total, total + 10] {
            let top = search.top_n_combinations("B", n).unwrap();
            assert_eq!(top.len(), n.min(total));
            assert_eq!(top[0], best);
            assert!(top.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }

    #[test]
    fn top_zero_is_empty_but_best_is_still_found() {
        let tables = scenario();
        let report = searcher(&tables, 2).search("A", 0).unwrap();

        assert!(report.top.is_empty());
        assert_eq!(report.best.score, 40);
    }

    #[test]
    fn oversized_top_n_returns_every_candidate() {
        let tables = scenario();
        let report = searcher(&tables, 4).search("A", usize::MAX).unwrap();

        assert_eq!(report.top.len(), 120);
        assert_eq!(report.top[0], report.best);
        assert!(report.top.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn equal_scores_keep_enumeration_order() {
        let tables = scenario();
        let top = searcher(&tables, 8).top_n_combinations("A", 12).unwrap();

        // Twelve candidates reach 40: grandparents {B, C} in either order, chromos from {D, E, F}.
        assert!(top.iter().all(|c| c.score == 40));
        let ordered: Vec<_> = top.iter().map(|c| c.assignment).collect();
        let mut sorted = ordered.clone();
        sorted.sort();
        assert_eq!(ordered, sorted);
    }

    #[test]
    fn worker_count_does_not_change_results() {
        let tables = richer();
        let reference = searcher(&tables, 1).search("C", 25).unwrap();

        for workers in [2, 8] {
            assert_eq!(searcher(&tables, workers).search("C", 25).unwrap(), reference);
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let tables = richer();
        let search = searcher(&tables, 4);

        let first = search.search("A", 10).unwrap();
        let second = search.search("A", 10).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn progress_covers_every_candidate() {
        let tables = scenario();
        let advanced = AtomicU64::new(0);
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::TaskAdvance { steps } = event {
                advanced.fetch_add(steps, Ordering::Relaxed);
            }
        }));

        searcher(&tables, 3)
            .with_reporter(&reporter)
            .search("F", 2)
            .unwrap();
        drop(reporter);

        assert_eq!(advanced.into_inner(), 120);
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let tables = scenario();
        let search = searcher(&tables, 2);

        assert!(matches!(
            search.best_combination("Z"),
            Err(EngineError::UnknownEntity { name }) if name == "Z"
        ));
        assert!(matches!(
            search.candidate_count("Z"),
            Err(EngineError::UnknownEntity { .. })
        ));
    }

    #[test]
    fn small_universe_is_rejected_before_searching() {
        let tables = build(vec![Group::new(1, 5, ["A", "B", "C", "D"])]);
        let search = searcher(&tables, 2);

        assert!(matches!(
            search.top_n_combinations("A", 3),
            Err(EngineError::InsufficientUniverse {
                required: 4,
                available: 3
            })
        ));
    }

    #[test]
    fn score_specific_applies_the_role_mapping() {
        let tables = scenario();
        let search = searcher(&tables, 1);

        assert_eq!(search.score_specific("A", "B", "C", "D", "E").unwrap(), 40);
        // Only the A-B pair term and the A-B-C triple term (via chromo1) apply.
        assert_eq!(search.score_specific("A", "B", "D", "C", "E").unwrap(), 20);
        assert_eq!(search.score_specific("D", "E", "F", "A", "B").unwrap(), 0);

        let breakdown = search.breakdown_specific("A", "B", "C", "D", "E").unwrap();
        assert_eq!(breakdown.total(), 40);
        assert_eq!(breakdown.pair_sum(), 30);
    }

    #[test]
    fn specific_combination_is_validated() {
        let tables = scenario();
        let search = searcher(&tables, 1);

        assert!(matches!(
            search.score_specific("A", "B", "B", "Q", "E"),
            Err(EngineError::UnknownEntity { name }) if name == "Q"
        ));
        assert!(matches!(
            search.score_specific("A", "B", "C", "D", "B"),
            Err(EngineError::DuplicateEntity { name }) if name == "B"
        ));
    }

    fn arb_tables() -> impl Strategy<Value = Tables> {
        const NAMES: [&str; 7] = ["p", "q", "r", "s", "t", "u", "v"];
        prop::collection::vec(
            (-9i64..10, prop::collection::btree_set(0usize..NAMES.len(), 2..6)),
            1..6,
        )
        .prop_map(|rows| {
            let mut groups: Vec<Group> = rows
                .into_iter()
                .enumerate()
                .map(|(id, (score, members))| {
                    Group::new(id as i64, score, members.into_iter().map(|i| NAMES[i]))
                })
                .collect();
            groups.push(Group::new(-1, 0, NAMES));
            build(groups)
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn partitioned_search_matches_single_worker(
            tables in arb_tables(),
            workers in 2usize..9,
            n in 0usize..40,
        ) {
            let reference = searcher(&tables, 1).search("p", n).unwrap();
            let split = searcher(&tables, workers).search("p", n).unwrap();

            prop_assert_eq!(split, reference);
        }
    }
}
