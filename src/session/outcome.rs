//! Confusion-matrix and financial-outcome accounting.

use crate::domain::{Guess, Outcome, OutcomeStatistics};

/// Profit from a repaid loan the user approved; also the foregone profit
/// when the user denies an applicant who would have repaid.
pub const REPAYMENT_PROFIT: i64 = 2_000;
/// Lost principal when the user approves a loan that defaults.
pub const DEFAULT_LOSS: i64 = 10_000;

/// Accumulates confusion-matrix counters and money totals for one session.
///
/// An owned instance is created exactly when a dataset loads and replaced
/// wholesale on reload, so guesses against a prior dataset can never leak
/// into a new session's statistics.
#[derive(Debug, Clone, Default)]
pub struct OutcomeTracker {
    stats: OutcomeStatistics,
}

impl OutcomeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one evaluated guess.
    ///
    /// Exactly one counter is incremented and at most one money effect is
    /// applied per call:
    ///
    /// | guess   | actual    | counter        | money effect       |
    /// |---------|-----------|----------------|--------------------|
    /// | approve | repaid    | true positive  | +$2,000 profit     |
    /// | approve | defaulted | false positive | -$10,000 principal |
    /// | deny    | defaulted | true negative  | none               |
    /// | deny    | repaid    | false negative | +$2,000 foregone   |
    pub fn record(&mut self, guess: Guess, actual: Outcome) {
        match (guess, actual) {
            (Guess::Approve, Outcome::Repaid) => {
                self.stats.true_positive += 1;
                self.stats.money_total += REPAYMENT_PROFIT;
            }
            (Guess::Approve, Outcome::Defaulted) => {
                self.stats.false_positive += 1;
                self.stats.money_total -= DEFAULT_LOSS;
            }
            (Guess::Deny, Outcome::Defaulted) => {
                self.stats.true_negative += 1;
            }
            (Guess::Deny, Outcome::Repaid) => {
                self.stats.false_negative += 1;
                self.stats.opportunity_cost_total += REPAYMENT_PROFIT;
            }
        }
    }

    /// Copy of the current totals for display/export. Never mutates.
    pub fn snapshot(&self) -> OutcomeStatistics {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_cell_of_the_transition_table() {
        let mut tracker = OutcomeTracker::new();

        tracker.record(Guess::Approve, Outcome::Repaid);
        let s = tracker.snapshot();
        assert_eq!((s.true_positive, s.money_total), (1, 2_000));

        tracker.record(Guess::Approve, Outcome::Defaulted);
        let s = tracker.snapshot();
        assert_eq!((s.false_positive, s.money_total), (1, -8_000));

        tracker.record(Guess::Deny, Outcome::Defaulted);
        let s = tracker.snapshot();
        assert_eq!(s.true_negative, 1);
        assert_eq!(s.money_total, -8_000);
        assert_eq!(s.opportunity_cost_total, 0);

        tracker.record(Guess::Deny, Outcome::Repaid);
        let s = tracker.snapshot();
        assert_eq!(s.false_negative, 1);
        assert_eq!(s.money_total, -8_000);
        assert_eq!(s.opportunity_cost_total, 2_000);
    }

    #[test]
    fn counters_sum_to_guess_count() {
        let mut tracker = OutcomeTracker::new();
        let sequence = [
            (Guess::Approve, Outcome::Repaid),
            (Guess::Approve, Outcome::Defaulted),
            (Guess::Deny, Outcome::Repaid),
            (Guess::Deny, Outcome::Defaulted),
            (Guess::Approve, Outcome::Repaid),
            (Guess::Deny, Outcome::Defaulted),
            (Guess::Approve, Outcome::Defaulted),
        ];
        for (guess, actual) in sequence {
            tracker.record(guess, actual);
        }
        assert_eq!(tracker.snapshot().guesses(), sequence.len() as u64);
    }

    #[test]
    fn money_example_two_profits_one_loss() {
        let mut tracker = OutcomeTracker::new();
        tracker.record(Guess::Approve, Outcome::Repaid);
        tracker.record(Guess::Approve, Outcome::Repaid);
        tracker.record(Guess::Approve, Outcome::Defaulted);

        let s = tracker.snapshot();
        assert_eq!(s.money_total, -6_000);
        assert_eq!(s.opportunity_cost_total, 0);
    }

    #[test]
    fn true_negative_touches_no_totals() {
        let mut tracker = OutcomeTracker::new();
        tracker.record(Guess::Deny, Outcome::Defaulted);
        let s = tracker.snapshot();
        assert_eq!(s.true_negative, 1);
        assert_eq!(s.money_total, 0);
        assert_eq!(s.opportunity_cost_total, 0);
    }

    #[test]
    fn snapshot_is_read_only() {
        let mut tracker = OutcomeTracker::new();
        tracker.record(Guess::Approve, Outcome::Repaid);
        let before = tracker.snapshot();
        let again = tracker.snapshot();
        assert_eq!(before, again);
    }
}
