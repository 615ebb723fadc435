//! Immutable pair and triple score tables.
//!
//! Each table stores one value per unordered entity set under a canonical (sorted) key,
//! so lookups are order-insensitive by construction. Only non-zero scores are stored;
//! an absent key reads as zero.

use crate::core::models::ids::EntityId;
use crate::core::models::universe::Universe;
use std::collections::HashMap;

/// An unordered pair or triple of entities, kept in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScoreKey {
    Pair(EntityId, EntityId),
    Triple(EntityId, EntityId, EntityId),
}

impl ScoreKey {
    pub fn pair(a: EntityId, b: EntityId) -> Self {
        let [a, b] = canonical_pair(a, b);
        ScoreKey::Pair(a, b)
    }

    pub fn triple(a: EntityId, b: EntityId, c: EntityId) -> Self {
        let [a, b, c] = canonical_triple(a, b, c);
        ScoreKey::Triple(a, b, c)
    }

    pub fn members(&self) -> Vec<EntityId> {
        match *self {
            ScoreKey::Pair(a, b) => vec![a, b],
            ScoreKey::Triple(a, b, c) => vec![a, b, c],
        }
    }
}

#[inline]
fn canonical_pair(a: EntityId, b: EntityId) -> [EntityId; 2] {
    if a <= b { [a, b] } else { [b, a] }
}

#[inline]
fn canonical_triple(a: EntityId, b: EntityId, c: EntityId) -> [EntityId; 3] {
    let mut key = [a, b, c];
    key.sort_unstable();
    key
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairScoreTable {
    scores: HashMap<[EntityId; 2], i64>,
}

impl PairScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, a: EntityId, b: EntityId) -> i64 {
        self.scores
            .get(&canonical_pair(a, b))
            .copied()
            .unwrap_or(0)
    }

    /// Records the score of `{a, b}`; zero scores are not stored.
    pub fn insert(&mut self, a: EntityId, b: EntityId, score: i64) {
        let key = canonical_pair(a, b);
        if score == 0 {
            self.scores.remove(&key);
        } else {
            self.scores.insert(key, score);
        }
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScoreKey, i64)> + '_ {
        self.scores
            .iter()
            .map(|(&[a, b], &score)| (ScoreKey::Pair(a, b), score))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripleScoreTable {
    scores: HashMap<[EntityId; 3], i64>,
}

impl TripleScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, a: EntityId, b: EntityId, c: EntityId) -> i64 {
        self.scores
            .get(&canonical_triple(a, b, c))
            .copied()
            .unwrap_or(0)
    }

    /// Records the score of `{a, b, c}`; zero scores are not stored.
    pub fn insert(&mut self, a: EntityId, b: EntityId, c: EntityId, score: i64) {
        let key = canonical_triple(a, b, c);
        if score == 0 {
            self.scores.remove(&key);
        } else {
            self.scores.insert(key, score);
        }
    }

    /// Union with a table built over a disjoint set of keys.
    pub fn extend(&mut self, other: TripleScoreTable) {
        self.scores.extend(other.scores);
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScoreKey, i64)> + '_ {
        self.scores
            .iter()
            .map(|(&[a, b, c], &score)| (ScoreKey::Triple(a, b, c), score))
    }
}

/// The entity universe together with its pair and triple tables.
///
/// Built once (or restored from cache) and then shared read-only by every consumer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
    universe: Universe,
    pairs: PairScoreTable,
    triples: TripleScoreTable,
}

impl Tables {
    pub fn new(universe: Universe, pairs: PairScoreTable, triples: TripleScoreTable) -> Self {
        Self {
            universe,
            pairs,
            triples,
        }
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn pairs(&self) -> &PairScoreTable {
        &self.pairs
    }

    pub fn triples(&self) -> &TripleScoreTable {
        &self.triples
    }

    pub fn score(&self, key: ScoreKey) -> i64 {
        match key {
            ScoreKey::Pair(a, b) => self.pairs.get(a, b),
            ScoreKey::Triple(a, b, c) => self.triples.get(a, b, c),
        }
    }

    /// Pair score by entity name; unknown names score zero.
    pub fn pair_score(&self, a: &str, b: &str) -> i64 {
        match (self.universe.id_of(a), self.universe.id_of(b)) {
            (Some(a), Some(b)) => self.pairs.get(a, b),
            _ => 0,
        }
    }

    /// Triple score by entity name; unknown names score zero.
    pub fn triple_score(&self, a: &str, b: &str, c: &str) -> i64 {
        match (
            self.universe.id_of(a),
            self.universe.id_of(b),
            self.universe.id_of(c),
        ) {
            (Some(a), Some(b), Some(c)) => self.triples.get(a, b, c),
            _ => 0,
        }
    }

    pub fn pair_entries(&self) -> usize {
        self.pairs.len()
    }

    pub fn triple_entries(&self) -> usize {
        self.triples.len()
    }
}
