//! Interactive session engine: training split, cyclic cursor, guess
//! scoring, and outcome accounting.
//!
//! A [`Session`] owns all per-dataset state. Loading a new level constructs
//! a fresh session and replaces the old one wholesale; nothing is ever
//! merged, so a failed reload leaves the previous session fully usable.

pub mod cursor;
pub mod evaluate;
pub mod outcome;
pub mod split;

pub use cursor::RecordCursor;
pub use evaluate::evaluate;
pub use outcome::{DEFAULT_LOSS, OutcomeTracker, REPAYMENT_PROFIT};
pub use split::{TRAIN_FRACTION, TrainingStream, split};

use crate::domain::{Dataset, Guess, GuessReport, OutcomeStatistics, Record};
use crate::error::AppError;

/// One training session over a loaded dataset.
#[derive(Debug, Clone)]
pub struct Session {
    stream: TrainingStream,
    cursor: RecordCursor,
    tracker: OutcomeTracker,
}

impl Session {
    /// Split the dataset and start at the first training record with zeroed
    /// statistics.
    pub fn new(dataset: Dataset) -> Self {
        Self {
            stream: split(dataset),
            cursor: RecordCursor::new(),
            tracker: OutcomeTracker::new(),
        }
    }

    pub fn stream(&self) -> &TrainingStream {
        &self.stream
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// The record currently shown to the user, or `None` when no usable
    /// records survived parsing/splitting.
    pub fn current(&self) -> Option<&Record> {
        self.cursor.current(&self.stream)
    }

    pub fn stats(&self) -> OutcomeStatistics {
        self.tracker.snapshot()
    }

    /// Score one guess against the current record: evaluate, record the
    /// outcome, advance the cursor. Fully processed before the next guess
    /// can be accepted.
    ///
    /// Returns `Ok(None)` on an empty stream (explicit no-data signal). On a
    /// malformed record (unparseable income/score or out-of-domain
    /// repayment flag) the error propagates and no state changes.
    pub fn guess(&mut self, guess: Guess) -> Result<Option<GuessReport>, AppError> {
        let Some(record) = self.cursor.current(&self.stream) else {
            return Ok(None);
        };

        let income = record.income()?;
        let credit_score = record.credit_score()?;
        let evaluation = evaluate(record, guess)?;

        self.tracker.record(guess, evaluation.actual);
        self.cursor.advance(&self.stream);

        Ok(Some(GuessReport {
            income,
            credit_score,
            guess,
            actual: evaluation.actual,
            correct: evaluation.correct,
            stats: self.tracker.snapshot(),
        }))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;

    use crate::domain::{COL_CREDIT_SCORE, COL_INCOME, COL_REPAY, Dataset, Record};

    /// Records with income `1000 × (i + 1)`, score `500 + i`, alternating
    /// repayment starting at repaid.
    pub fn dataset_of(n: usize) -> Dataset {
        let records = (0..n)
            .map(|i| {
                let mut fields = HashMap::new();
                fields.insert(COL_INCOME.to_string(), format!("{}", (i + 1) * 1000));
                fields.insert(COL_CREDIT_SCORE.to_string(), format!("{}", 500 + i));
                fields.insert(COL_REPAY.to_string(), format!("{}", (i + 1) % 2));
                Record::new(fields)
            })
            .collect::<Vec<_>>();
        Dataset {
            rows_read: records.len(),
            rows_dropped: 0,
            records,
        }
    }

    pub fn record_with_repay(raw: &str) -> Record {
        let mut fields = HashMap::new();
        fields.insert(COL_INCOME.to_string(), "52000".to_string());
        fields.insert(COL_CREDIT_SCORE.to_string(), "630".to_string());
        fields.insert(COL_REPAY.to_string(), raw.to_string());
        Record::new(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Outcome;
    use test_support::dataset_of;

    #[test]
    fn hundred_records_gives_eighty_in_play_and_first_guess_hits_index_zero() {
        let mut session = Session::new(dataset_of(100));
        assert_eq!(session.stream().len(), 80);
        assert_eq!(session.stream().holdout_len(), 20);
        assert_eq!(session.position(), 0);

        let shown = session.current().unwrap().income().unwrap();
        assert_eq!(shown, 1000.0);

        let report = session.guess(Guess::Approve).unwrap().unwrap();
        // The report describes the record that was shown, not the next one.
        assert_eq!(report.income, 1000.0);
        assert_eq!(report.actual, Outcome::Repaid);
        assert!(report.correct);
        assert_eq!(session.position(), 1);
    }

    #[test]
    fn empty_stream_guess_is_a_no_op() {
        let mut session = Session::new(dataset_of(0));
        assert!(session.current().is_none());
        assert!(session.guess(Guess::Deny).unwrap().is_none());
        assert_eq!(session.stats().guesses(), 0);
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn counter_sum_matches_guesses_across_a_full_cycle() {
        let mut session = Session::new(dataset_of(10)); // 8 in play
        let len = session.stream().len();
        for i in 0..len {
            let guess = if i % 3 == 0 { Guess::Deny } else { Guess::Approve };
            session.guess(guess).unwrap().unwrap();
        }
        assert_eq!(session.stats().guesses(), len as u64);
        // Cursor wrapped back to the first record.
        assert_eq!(session.position(), 0);
        assert_eq!(session.current().unwrap().income().unwrap(), 1000.0);
    }

    #[test]
    fn malformed_record_propagates_without_touching_state() {
        let mut dataset = dataset_of(3);
        dataset.records[0] = test_support::record_with_repay("7");
        let mut session = Session::new(dataset);

        assert!(session.guess(Guess::Approve).is_err());
        assert_eq!(session.stats().guesses(), 0);
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn fresh_session_starts_from_zero_regardless_of_prior_play() {
        let mut session = Session::new(dataset_of(10));
        for _ in 0..5 {
            session.guess(Guess::Approve).unwrap();
        }
        assert!(session.stats().guesses() > 0);
        assert_ne!(session.position(), 0);

        // Reload: the session is replaced wholesale.
        session = Session::new(dataset_of(10));
        assert_eq!(session.stats(), crate::domain::OutcomeStatistics::default());
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn report_statistics_track_the_running_totals() {
        let mut session = Session::new(dataset_of(10));
        // Record 0 repays, record 1 defaults.
        let first = session.guess(Guess::Approve).unwrap().unwrap();
        assert_eq!(first.stats.money_total, 2_000);
        let second = session.guess(Guess::Approve).unwrap().unwrap();
        assert_eq!(second.actual, Outcome::Defaulted);
        assert!(!second.correct);
        assert_eq!(second.stats.money_total, -8_000);
    }
}
