use crate::core::models::assignment::{FiveRoleAssignment, ScoredCombination};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Upper bound on the heap space reserved up front; larger sets grow on demand.
const RESERVE_LIMIT: usize = 1024;

/// A scored candidate tagged with its global enumeration position.
///
/// The ordering is the canonical ranking: a higher score ranks higher, and among equal
/// scores the candidate enumerated first ranks higher. Sequence numbers are unique across
/// the whole search, so the order is total and merge order never changes a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedCandidate {
    pub score: i64,
    pub sequence: u64,
    pub assignment: FiveRoleAssignment,
}

impl RankedCandidate {
    pub fn into_scored(self) -> ScoredCombination {
        ScoredCombination {
            assignment: self.assignment,
            score: self.score,
        }
    }
}

impl Ord for RankedCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .cmp(&other.score)
            .then_with(|| other.sequence.cmp(&self.sequence))
            .then_with(|| self.assignment.cmp(&other.assignment))
    }
}

impl PartialOrd for RankedCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Keeps the `capacity` highest-ranked candidates seen so far.
///
/// Backed by a min-heap whose root is the weakest retained candidate; a new candidate
/// replaces the root only if it ranks strictly higher.
#[derive(Debug, Clone)]
pub struct BoundedTopN {
    capacity: usize,
    heap: BinaryHeap<Reverse<RankedCandidate>>,
}

impl BoundedTopN {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity.min(RESERVE_LIMIT)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The weakest retained candidate.
    pub fn floor(&self) -> Option<&RankedCandidate> {
        self.heap.peek().map(|Reverse(candidate)| candidate)
    }

    /// Offers a candidate; returns whether it was retained.
    pub fn offer(&mut self, candidate: RankedCandidate) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(candidate));
            return true;
        }
        match self.heap.peek_mut() {
            Some(mut root) if candidate > root.0 => {
                *root = Reverse(candidate);
                true
            }
            _ => false,
        }
    }

    /// Merges another bounded set into this one.
    pub fn absorb(&mut self, other: BoundedTopN) {
        for Reverse(candidate) in other.heap {
            self.offer(candidate);
        }
    }

    /// Retained candidates, best first.
    pub fn into_ranked(self) -> Vec<RankedCandidate> {
        // Ascending order of Reverse<_> is descending rank.
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(candidate)| candidate)
            .collect()
    }
}
