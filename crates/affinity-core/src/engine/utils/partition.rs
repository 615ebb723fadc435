/// A contiguous slice `[start, start + len)` of a global enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub index: usize,
    pub start: u64,
    pub len: u64,
}

impl Partition {
    pub fn end(&self) -> u64 {
        self.start + self.len
    }
}

/// Splits `total` items into at most `parts` contiguous, non-empty partitions whose
/// sizes differ by at most one.
pub fn contiguous(total: u64, parts: usize) -> Vec<Partition> {
    let parts = (parts.max(1) as u64).min(total);
    if parts == 0 {
        return Vec::new();
    }

    let base = total / parts;
    let extra = total % parts;
    let mut start = 0;

    (0..parts)
        .map(|i| {
            let len = base + u64::from(i < extra);
            let partition = Partition {
                index: i as usize,
                start,
                len,
            };
            start += len;
            partition
        })
        .collect()
}
