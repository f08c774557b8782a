//! Deterministic training split.

use crate::domain::{Dataset, Record};

/// Fraction of the dataset used for interactive play.
pub const TRAIN_FRACTION: f64 = 0.8;

/// The `floor(0.8 × N)` prefix of a parsed dataset.
///
/// Created once per dataset load and never mutated. The 20% suffix is held
/// out entirely: only its length is kept for reporting, its records are
/// never exposed to scoring.
#[derive(Debug, Clone)]
pub struct TrainingStream {
    records: Vec<Record>,
    holdout_len: usize,
}

impl TrainingStream {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Number of records withheld from play.
    pub fn holdout_len(&self) -> usize {
        self.holdout_len
    }
}

/// Split a dataset into its training stream.
///
/// Always takes the first `floor(0.8 × N)` records in file order; no
/// shuffling, no randomness. Same input, same output.
pub fn split(dataset: Dataset) -> TrainingStream {
    let total = dataset.len();
    let take = (total as f64 * TRAIN_FRACTION).floor() as usize;

    let mut records = dataset.records;
    records.truncate(take);

    TrainingStream {
        records,
        holdout_len: total - take,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::test_support::dataset_of;

    #[test]
    fn takes_floor_of_eighty_percent() {
        for (total, expected) in [(100, 80), (10, 8), (9, 7), (5, 4), (1, 0), (0, 0)] {
            let stream = split(dataset_of(total));
            assert_eq!(stream.len(), expected, "total={total}");
            assert_eq!(stream.holdout_len(), total - expected, "total={total}");
        }
    }

    #[test]
    fn keeps_the_prefix_in_order() {
        let stream = split(dataset_of(10));
        for i in 0..8 {
            let record = stream.get(i).unwrap();
            assert_eq!(record.income().unwrap(), (i as f64 + 1.0) * 1000.0);
        }
        assert!(stream.get(8).is_none());
    }

    #[test]
    fn splitting_is_deterministic() {
        let a = split(dataset_of(13));
        let b = split(dataset_of(13));
        assert_eq!(a.len(), b.len());
        for i in 0..a.len() {
            assert_eq!(
                a.get(i).unwrap().field(crate::domain::COL_INCOME),
                b.get(i).unwrap().field(crate::domain::COL_INCOME),
            );
        }
    }
}
