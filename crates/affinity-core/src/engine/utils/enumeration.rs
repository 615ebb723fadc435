//! Lexicographic enumeration of k-combinations and k-permutations over `0..n`, with
//! random access by rank so that a partition can start anywhere without enumerating
//! its predecessors.

/// Number of k-combinations of n items, or `None` on overflow.
pub fn combinations_count(n: usize, k: usize) -> Option<u64> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut acc: u64 = 1;
    for i in 0..k {
        // Exact at every step: acc * (n - i) is divisible by (i + 1).
        acc = acc.checked_mul((n - i) as u64)? / (i as u64 + 1);
    }
    Some(acc)
}

/// Number of ordered k-permutations of n items, or `None` on overflow.
pub fn permutations_count(n: usize, k: usize) -> Option<u64> {
    if k > n {
        return Some(0);
    }
    (0..k).try_fold(1u64, |acc, i| acc.checked_mul((n - i) as u64))
}

/// Walks ordered selections of `K` distinct indices from `0..n` in lexicographic order.
#[derive(Debug, Clone)]
pub struct PermutationCursor<const K: usize> {
    n: usize,
    slots: [usize; K],
    exhausted: bool,
}

impl<const K: usize> PermutationCursor<K> {
    /// Positions the cursor on the permutation with lexicographic rank `rank`.
    pub fn at_rank(n: usize, rank: u64) -> Self {
        let total = permutations_count(n, K).unwrap_or(u64::MAX);
        if rank >= total {
            return Self {
                n,
                slots: [0; K],
                exhausted: true,
            };
        }

        let mut slots = [0; K];
        let mut used = vec![false; n];
        let mut remainder = rank;
        for pos in 0..K {
            let block = permutations_count(n - pos - 1, K - pos - 1).unwrap_or(u64::MAX);
            let mut skip = remainder / block;
            remainder %= block;
            let chosen = (0..n)
                .filter(|&idx| !used[idx])
                .find(|_| {
                    let hit = skip == 0;
                    skip = skip.saturating_sub(1);
                    hit
                })
                .unwrap_or(0);
            used[chosen] = true;
            slots[pos] = chosen;
        }

        Self {
            n,
            slots,
            exhausted: false,
        }
    }

    pub fn current(&self) -> Option<&[usize; K]> {
        (!self.exhausted).then_some(&self.slots)
    }

    /// Moves to the next permutation; returns `false` once the enumeration is done.
    pub fn advance(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        for pos in (0..K).rev() {
            let mut candidate = self.slots[pos] + 1;
            while candidate < self.n && self.slots[..pos].contains(&candidate) {
                candidate += 1;
            }
            if candidate < self.n {
                self.slots[pos] = candidate;
                for fill in pos + 1..K {
                    self.slots[fill] = (0..self.n)
                        .find(|idx| !self.slots[..fill].contains(idx))
                        .unwrap_or(0);
                }
                return true;
            }
        }
        self.exhausted = true;
        false
    }
}

/// Walks strictly increasing selections of `K` indices from `0..n` in lexicographic order.
#[derive(Debug, Clone)]
pub struct CombinationCursor<const K: usize> {
    n: usize,
    slots: [usize; K],
    exhausted: bool,
}

impl<const K: usize> CombinationCursor<K> {
    /// Positions the cursor on the combination with lexicographic rank `rank`.
    pub fn at_rank(n: usize, rank: u64) -> Self {
        let total = combinations_count(n, K).unwrap_or(u64::MAX);
        if rank >= total {
            return Self {
                n,
                slots: [0; K],
                exhausted: true,
            };
        }

        let mut slots = [0; K];
        let mut remainder = rank;
        let mut next = 0;
        for pos in 0..K {
            let mut value = next;
            loop {
                let tail = combinations_count(n - value - 1, K - pos - 1).unwrap_or(u64::MAX);
                if remainder < tail {
                    break;
                }
                remainder -= tail;
                value += 1;
            }
            slots[pos] = value;
            next = value + 1;
        }

        Self {
            n,
            slots,
            exhausted: false,
        }
    }

    pub fn current(&self) -> Option<&[usize; K]> {
        (!self.exhausted).then_some(&self.slots)
    }

    pub fn advance(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        for pos in (0..K).rev() {
            if self.slots[pos] < self.n - K + pos {
                self.slots[pos] += 1;
                for fill in pos + 1..K {
                    self.slots[fill] = self.slots[fill - 1] + 1;
                }
                return true;
            }
        }
        self.exhausted = true;
        false
    }
}
