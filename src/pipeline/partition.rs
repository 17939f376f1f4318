//! Row partitioning across workers.
//!
//! Rows are split into contiguous bands. When the row count does not divide
//! evenly, the first `height % workers` workers take one extra row each, so
//! band sizes differ by at most one and the assignment is reproducible.

use std::ops::Range;

/// Half-open interval of image rows, `start..end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "row range {start}..{end} is reversed");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, row: usize) -> bool {
        self.start <= row && row < self.end
    }

    /// True if every row of `other` is also in `self`.
    pub fn covers(&self, other: RowRange) -> bool {
        other.is_empty() || (self.start <= other.start && other.end <= self.end)
    }

    pub fn iter(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for RowRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Owned row bands, one per worker, in worker order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionPlan {
    ranges: Vec<RowRange>,
}

impl PartitionPlan {
    /// Split `height` rows across `worker_count` workers.
    ///
    /// # Panics
    /// If `worker_count` is 0. Callers validate the count first.
    pub fn new(height: usize, worker_count: usize) -> Self {
        assert!(worker_count >= 1, "partition plan needs at least one worker");

        let base = height / worker_count;
        let remainder = height % worker_count;

        let mut ranges = Vec::with_capacity(worker_count);
        let mut start = 0;
        for worker in 0..worker_count {
            let rows = base + usize::from(worker < remainder);
            ranges.push(RowRange::new(start, start + rows));
            start += rows;
        }

        Self { ranges }
    }

    pub fn ranges(&self) -> &[RowRange] {
        &self.ranges
    }

    pub fn worker_count(&self) -> usize {
        self.ranges.len()
    }

    /// Assert that the bands tile `0..height` exactly, in order.
    ///
    /// A plan that fails this check would silently drop or duplicate output
    /// rows, so it panics rather than returning an error.
    pub fn verify(&self, height: usize) {
        let mut cursor = 0;
        for (worker, range) in self.ranges.iter().enumerate() {
            assert_eq!(
                range.start, cursor,
                "worker {worker} starts at row {} but the previous band ended at {cursor}",
                range.start
            );
            cursor = range.end;
        }
        assert_eq!(cursor, height, "partition plan covers {cursor} of {height} rows");
    }
}

/// Shorthand for [`PartitionPlan::new`].
pub fn plan(height: usize, worker_count: usize) -> PartitionPlan {
    PartitionPlan::new(height, worker_count)
}
