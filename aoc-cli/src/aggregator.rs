//! Re-orders results arriving from worker threads.
//!
//! Workers finish in any order, but output must follow `(year, day, part)`.
//! Keys still outstanding and results waiting for an earlier key live in two
//! min-heaps; a result is released once it is the smallest outstanding key.

use crate::executor::SolverResult;
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

/// Output position of a result; derives ascending `(year, day, part)` order
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

/// Result waiting in the pending heap, ordered by key only
struct Pending {
    key: ResultKey,
    result: SolverResult,
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Pending {}

pub struct ResultAggregator {
    expected: BinaryHeap<Reverse<ResultKey>>,
    pending: BinaryHeap<Reverse<Pending>>,
}

impl ResultAggregator {
    pub fn new(expected_keys: impl IntoIterator<Item = ResultKey>) -> Self {
        Self {
            expected: expected_keys.into_iter().map(Reverse).collect(),
            pending: BinaryHeap::new(),
        }
    }

    /// Buffer `result` and return every result now releasable, in order
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.push(Reverse(Pending {
            key: ResultKey::from(&result),
            result,
        }));

        let mut ready = Vec::new();
        while let (Some(Reverse(next)), Some(Reverse(top))) =
            (self.expected.peek(), self.pending.peek())
        {
            if top.key != *next {
                break;
            }
            self.expected.pop();
            if let Some(Reverse(pending)) = self.pending.pop() {
                ready.push(pending.result);
            }
        }
        ready
    }

    /// Everything still buffered, in order; used once the channel closes
    pub fn drain(&mut self) -> Vec<SolverResult> {
        let mut results = Vec::with_capacity(self.pending.len());
        while let Some(Reverse(pending)) = self.pending.pop() {
            results.push(pending.result);
        }
        results
    }

    /// Keys no result has arrived for, in order
    pub fn missing(&self) -> Vec<ResultKey> {
        let arrived: HashSet<ResultKey> = self.pending.iter().map(|Reverse(p)| p.key).collect();
        let mut keys: Vec<_> = self
            .expected
            .iter()
            .map(|Reverse(k)| *k)
            .filter(|k| !arrived.contains(k))
            .collect();
        keys.sort();
        keys
    }

    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use proptest::prelude::*;

    fn key(year: u16, day: u8, part: u8) -> ResultKey {
        ResultKey { year, day, part }
    }

    fn result(year: u16, day: u8, part: u8) -> SolverResult {
        SolverResult {
            year,
            day,
            part,
            answer: Ok(format!("{year}-{day}-{part}")),
            parse_duration: Some(TimeDelta::microseconds(40)),
            solve_duration: TimeDelta::microseconds(120),
        }
    }

    fn keys_of(results: &[SolverResult]) -> Vec<ResultKey> {
        results.iter().map(ResultKey::from).collect()
    }

    #[test]
    fn test_releases_immediately_when_in_order() {
        let mut agg = ResultAggregator::new([key(2023, 1, 1), key(2023, 1, 2)]);

        assert_eq!(keys_of(&agg.add(result(2023, 1, 1))), vec![key(2023, 1, 1)]);
        assert!(!agg.is_complete());
        assert_eq!(keys_of(&agg.add(result(2023, 1, 2))), vec![key(2023, 1, 2)]);
        assert!(agg.is_complete());
    }

    #[test]
    fn test_holds_back_until_gap_filled() {
        let mut agg = ResultAggregator::new([
            key(2023, 3, 2),
            key(2022, 25, 1),
            key(2023, 3, 1),
            key(2023, 1, 1),
        ]);

        assert!(agg.add(result(2023, 3, 2)).is_empty());
        assert!(agg.add(result(2023, 1, 1)).is_empty());

        let ready = agg.add(result(2022, 25, 1));
        assert_eq!(keys_of(&ready), vec![key(2022, 25, 1), key(2023, 1, 1)]);

        let ready = agg.add(result(2023, 3, 1));
        assert_eq!(keys_of(&ready), vec![key(2023, 3, 1), key(2023, 3, 2)]);
        assert!(agg.is_complete());
        assert!(agg.drain().is_empty());
    }

    #[test]
    fn test_missing_and_drain() {
        let mut agg = ResultAggregator::new([key(2023, 2, 1), key(2023, 2, 2), key(2023, 3, 1)]);

        assert!(agg.add(result(2023, 3, 1)).is_empty());
        assert!(agg.add(result(2023, 2, 2)).is_empty());
        assert_eq!(agg.missing(), vec![key(2023, 2, 1)]);

        assert_eq!(
            keys_of(&agg.drain()),
            vec![key(2023, 2, 2), key(2023, 3, 1)]
        );
        assert!(!agg.is_complete());
    }

    proptest! {
        #[test]
        fn prop_any_arrival_order_comes_out_sorted(
            keys in prop::collection::btree_set((2015u16..2035, 1u8..=25, 1u8..=2), 1..40)
                .prop_map(|set| set.into_iter().map(|(y, d, p)| key(y, d, p)).collect::<Vec<_>>())
                .prop_shuffle()
        ) {
            let mut agg = ResultAggregator::new(keys.clone());
            let mut released = Vec::new();
            for k in &keys {
                released.extend(keys_of(&agg.add(result(k.year, k.day, k.part))));
            }

            let mut sorted = keys;
            sorted.sort();
            prop_assert_eq!(released, sorted);
            prop_assert!(agg.is_complete());
        }
    }
}
