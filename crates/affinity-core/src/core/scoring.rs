use crate::core::models::assignment::SevenRoleAssignment;
use crate::core::tables::{PairScoreTable, Tables, TripleScoreTable};
use std::fmt;

/// The individual terms of a seven-role score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    /// `(target, parent1)`, `(target, parent2)`, `(parent1, parent2)`.
    pub pair_terms: [i64; 3],
    /// `(target, parent1, grandparent1)`, `(target, parent1, grandparent2)`,
    /// `(target, parent2, grandparent3)`, `(target, parent2, grandparent4)`.
    pub triple_terms: [i64; 4],
}

impl ScoreBreakdown {
    pub fn pair_sum(&self) -> i64 {
        self.pair_terms.iter().sum()
    }

    pub fn triple_sum(&self) -> i64 {
        self.triple_terms.iter().sum()
    }

    pub fn total(&self) -> i64 {
        self.pair_sum() + self.triple_sum()
    }
}

impl fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pairs {:?} = {}, triples {:?} = {}, total = {}",
            self.pair_terms,
            self.pair_sum(),
            self.triple_terms,
            self.triple_sum(),
            self.total()
        )
    }
}

/// Scores seven-role assignments against a pair and a triple table.
///
/// The scorer only borrows the tables, so one instance can be shared by every search
/// worker.
#[derive(Debug, Clone, Copy)]
pub struct CompatibilityScorer<'a> {
    pairs: &'a PairScoreTable,
    triples: &'a TripleScoreTable,
}

impl<'a> CompatibilityScorer<'a> {
    pub fn new(tables: &'a Tables) -> Self {
        Self::from_tables(tables.pairs(), tables.triples())
    }

    pub fn from_tables(pairs: &'a PairScoreTable, triples: &'a TripleScoreTable) -> Self {
        Self { pairs, triples }
    }

    /// Total compatibility of `a`.
    ///
    /// ```text
    /// P(target, parent1) + P(target, parent2) + P(parent1, parent2)
    /// + T(target, parent1, grandparent1) + T(target, parent1, grandparent2)
    /// + T(target, parent2, grandparent3) + T(target, parent2, grandparent4)
    /// ```
    #[inline]
    pub fn score(&self, a: &SevenRoleAssignment) -> i64 {
        let p = |x, y| self.pairs.get(x, y);
        let t = |x, y, z| self.triples.get(x, y, z);

        p(a.target, a.parent1)
            + p(a.target, a.parent2)
            + p(a.parent1, a.parent2)
            + t(a.target, a.parent1, a.grandparent1)
            + t(a.target, a.parent1, a.grandparent2)
            + t(a.target, a.parent2, a.grandparent3)
            + t(a.target, a.parent2, a.grandparent4)
    }

    pub fn breakdown(&self, a: &SevenRoleAssignment) -> ScoreBreakdown {
        ScoreBreakdown {
            pair_terms: [
                self.pairs.get(a.target, a.parent1),
                self.pairs.get(a.target, a.parent2),
                self.pairs.get(a.parent1, a.parent2),
            ],
            triple_terms: [
                self.triples.get(a.target, a.parent1, a.grandparent1),
                self.triples.get(a.target, a.parent1, a.grandparent2),
                self.triples.get(a.target, a.parent2, a.grandparent3),
                self.triples.get(a.target, a.parent2, a.grandparent4),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::assignment::FiveRoleAssignment;
    use crate::core::models::ids::EntityId;
    use crate::core::models::universe::Universe;

    fn ids<const N: usize>() -> [EntityId; N] {
        std::array::from_fn(EntityId::new)
    }

    fn tables() -> Tables {
        let [t, p1, p2, g1, g2, g3, g4] = ids::<7>();
        let mut pairs = PairScoreTable::new();
        pairs.insert(t, p1, 1);
        pairs.insert(t, p2, 2);
        pairs.insert(p1, p2, 4);
        let mut triples = TripleScoreTable::new();
        triples.insert(t, p1, g1, 10);
        triples.insert(t, p1, g2, 20);
        triples.insert(t, p2, g3, 40);
        triples.insert(t, p2, g4, 80);
        Tables::new(
            Universe::from_names(["t", "p1", "p2", "g1", "g2", "g3", "g4"]),
            pairs,
            triples,
        )
    }

    #[test]
    fn score_sums_every_formula_term() {
        let tables = tables();
        let [t, p1, p2, g1, g2, g3, g4] = ids::<7>();
        let assignment = SevenRoleAssignment {
            target: t,
            parent1: p1,
            parent2: p2,
            grandparent1: g1,
            grandparent2: g2,
            grandparent3: g3,
            grandparent4: g4,
        };

        let scorer = CompatibilityScorer::new(&tables);
        let breakdown = scorer.breakdown(&assignment);

        assert_eq!(scorer.score(&assignment), 157);
        assert_eq!(breakdown.pair_terms, [1, 2, 4]);
        assert_eq!(breakdown.triple_terms, [10, 20, 40, 80]);
        assert_eq!(breakdown.total(), 157);
    }

    #[test]
    fn score_is_independent_of_storage_order() {
        let tables = tables();
        let [t, p1, p2, g1, g2, g3, g4] = ids::<7>();
        let swapped_grandparents = SevenRoleAssignment {
            target: t,
            parent1: p1,
            parent2: p2,
            grandparent1: g2,
            grandparent2: g1,
            grandparent3: g4,
            grandparent4: g3,
        };

        assert_eq!(CompatibilityScorer::new(&tables).score(&swapped_grandparents), 157);
    }

    #[test]
    fn missing_entries_contribute_zero() {
        let tables = tables();
        let [t, _, _, g1, g2, g3, g4] = ids::<7>();
        let assignment = SevenRoleAssignment {
            target: t,
            parent1: g1,
            parent2: g2,
            grandparent1: g3,
            grandparent2: g4,
            grandparent3: g3,
            grandparent4: g4,
        };

        assert_eq!(CompatibilityScorer::new(&tables).score(&assignment), 0);
    }

    #[test]
    fn five_role_mapping_feeds_the_seven_role_formula() {
        let tables = tables();
        let [t, p1, p2, g1, g2, ..] = ids::<7>();
        let five = FiveRoleAssignment::from_slots(t, [p1, p2, g1, g2]);
        let scorer = CompatibilityScorer::new(&tables);

        // parent1 = p1, parent2 = p2, grandparents = g1, g2, g2, p1.
        let breakdown = scorer.breakdown(&five.into());

        assert_eq!(breakdown.pair_terms, [1, 2, 4]);
        assert_eq!(breakdown.triple_terms, [10, 20, 0, 0]);
        assert_eq!(scorer.score(&five.into()), 37);
    }
}
