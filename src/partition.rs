//! Column partitioning for the parallel engine.

use std::ops::Range;

/// Half-open column range `[begin, end)` owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRange {
    pub begin: usize,
    pub end: usize,
}

impl ColumnRange {
    pub fn width(&self) -> usize {
        self.end - self.begin
    }

    pub fn as_range(&self) -> Range<usize> {
        self.begin..self.end
    }
}

/// Splits `[0, size)` into `workers` contiguous column ranges.
///
/// Every range is `size / workers` wide except the last, which also takes
/// the remaining `size % workers` columns.
///
/// Callers guarantee `workers <= size`; with more workers than columns all
/// but the last range are empty.
///
/// # Panics
///
/// Panics if `workers` is zero.
///
/// # Example
///
/// ```
/// use mmm::partition::{partition_columns, ColumnRange};
///
/// let ranges = partition_columns(10, 3);
/// assert_eq!(ranges, vec![
///     ColumnRange { begin: 0, end: 3 },
///     ColumnRange { begin: 3, end: 6 },
///     ColumnRange { begin: 6, end: 10 },
/// ]);
/// ```
pub fn partition_columns(size: usize, workers: usize) -> Vec<ColumnRange> {
    assert!(workers > 0, "at least one worker is required");

    let per_worker = size / workers;
    (0..workers)
        .map(|w| {
            let begin = w * per_worker;
            let end = if w == workers - 1 {
                size
            } else {
                (w + 1) * per_worker
            };
            ColumnRange { begin, end }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_even_split() {
        let ranges = partition_columns(8, 4);
        assert_eq!(ranges.len(), 4);
        assert!(ranges.iter().all(|r| r.width() == 2));
        assert_eq!(ranges[3].as_range(), 6..8);
    }

    #[test]
    fn test_remainder_goes_to_last() {
        let ranges = partition_columns(11, 4);
        let widths: Vec<usize> = ranges.iter().map(ColumnRange::width).collect();
        assert_eq!(widths, vec![2, 2, 2, 5]);
    }

    #[test]
    fn test_single_worker_owns_everything() {
        assert_eq!(partition_columns(7, 1), vec![ColumnRange { begin: 0, end: 7 }]);
    }

    #[test]
    fn test_one_column_per_worker() {
        let ranges = partition_columns(5, 5);
        for (w, r) in ranges.iter().enumerate() {
            assert_eq!(r.as_range(), w..w + 1);
        }
    }

    #[test]
    #[should_panic(expected = "at least one worker")]
    fn test_zero_workers_panics() {
        partition_columns(4, 0);
    }

    proptest! {
        #[test]
        fn prop_partition_covers_columns_exactly_once(
            (size, workers) in (1usize..512).prop_flat_map(|n| (Just(n), 1..=n))
        ) {
            let ranges = partition_columns(size, workers);
            prop_assert_eq!(ranges.len(), workers);
            prop_assert_eq!(ranges[0].begin, 0);
            prop_assert_eq!(ranges[workers - 1].end, size);

            for pair in ranges.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].begin);
            }
            for r in &ranges[..workers - 1] {
                prop_assert_eq!(r.width(), size / workers);
                prop_assert!(r.begin < r.end);
            }
            prop_assert_eq!(
                ranges[workers - 1].width(),
                size / workers + size % workers
            );
        }
    }
}
