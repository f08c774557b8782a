//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during an interactive session
//! - exported to JSON/CSV afterwards
//! - reused by the non-interactive `check` command

use std::collections::HashMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Canonical field name for applicant income.
pub const COL_INCOME: &str = "income";
/// Canonical field name for the applicant credit score.
pub const COL_CREDIT_SCORE: &str = "credit_score";
/// Canonical field name for the ground-truth repayment flag (0/1).
pub const COL_REPAY: &str = "repay_loan";

/// Difficulty level. Selects which data file is fetched from the source
/// (`easy.csv`, `medium.csv`, `hard.csv`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Easy, Level::Medium, Level::Hard];

    /// File name of the level's dataset at the data source.
    pub fn file_name(self) -> &'static str {
        match self {
            Level::Easy => "easy.csv",
            Level::Medium => "medium.csv",
            Level::Hard => "hard.csv",
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Level::Easy => "Easy",
            Level::Medium => "Medium",
            Level::Hard => "Hard",
        }
    }

    pub fn next(self) -> Level {
        match self {
            Level::Easy => Level::Medium,
            Level::Medium => Level::Hard,
            Level::Hard => Level::Easy,
        }
    }

    pub fn prev(self) -> Level {
        match self {
            Level::Easy => Level::Hard,
            Level::Medium => Level::Easy,
            Level::Hard => Level::Medium,
        }
    }
}

/// Ground-truth repayment outcome, encoded as 0/1 in the source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Defaulted,
    Repaid,
}

impl Outcome {
    /// Decode the 0/1 source encoding. Anything else is out of domain.
    pub fn from_flag(value: i64) -> Option<Outcome> {
        match value {
            0 => Some(Outcome::Defaulted),
            1 => Some(Outcome::Repaid),
            _ => None,
        }
    }

    pub fn as_flag(self) -> u8 {
        match self {
            Outcome::Defaulted => 0,
            Outcome::Repaid => 1,
        }
    }

    pub fn repaid(self) -> bool {
        self == Outcome::Repaid
    }
}

/// The user's binary prediction for the applicant currently shown.
///
/// `Deny` predicts default (source encoding 0), `Approve` predicts
/// repayment (source encoding 1). Any other raw input is rejected at the
/// key/flag boundary; this enum is the only way to express a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Guess {
    Deny,
    Approve,
}

impl Guess {
    pub fn as_flag(self) -> u8 {
        match self {
            Guess::Deny => 0,
            Guess::Approve => 1,
        }
    }

    /// Whether this guess predicts repayment.
    pub fn predicts_repayment(self) -> bool {
        self == Guess::Approve
    }

    /// The outcome this guess predicts.
    pub fn predicted_outcome(self) -> Outcome {
        match self {
            Guess::Deny => Outcome::Defaulted,
            Guess::Approve => Outcome::Repaid,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Guess::Deny => "deny (default)",
            Guess::Approve => "approve (repay)",
        }
    }
}

/// One applicant observation.
///
/// All row fields are kept in their original (trimmed) string form, keyed by
/// normalized header name; the required columns are additionally reachable
/// under their canonical keys. Numeric interpretation is deferred to the
/// accessors so a malformed value surfaces where it matters (display or
/// evaluation), never as a half-parsed record.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: HashMap<String, String>,
}

impl Record {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// Raw field value by normalized header name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Applicant income.
    pub fn income(&self) -> Result<f64, AppError> {
        self.numeric_field(COL_INCOME)
    }

    /// Applicant credit score.
    pub fn credit_score(&self) -> Result<f64, AppError> {
        self.numeric_field(COL_CREDIT_SCORE)
    }

    /// Ground-truth repayment outcome.
    ///
    /// The source encodes this as an integer 0/1; an unparseable or
    /// out-of-domain value is an invalid-record error, not a silent default.
    pub fn repaid(&self) -> Result<Outcome, AppError> {
        let raw = self
            .field(COL_REPAY)
            .ok_or_else(|| AppError::dataset(format!("Record is missing `{COL_REPAY}`.")))?;
        let flag = raw
            .parse::<i64>()
            .map_err(|_| AppError::dataset(format!("Invalid `{COL_REPAY}` value '{raw}' (expected 0 or 1).")))?;
        Outcome::from_flag(flag).ok_or_else(|| {
            AppError::dataset(format!("Out-of-domain `{COL_REPAY}` value '{raw}' (expected 0 or 1)."))
        })
    }

    fn numeric_field(&self, name: &str) -> Result<f64, AppError> {
        let raw = self
            .field(name)
            .ok_or_else(|| AppError::dataset(format!("Record is missing `{name}`.")))?;
        let value = raw
            .parse::<f64>()
            .map_err(|_| AppError::dataset(format!("Invalid `{name}` value '{raw}'.")))?;
        if !value.is_finite() {
            return Err(AppError::dataset(format!("Non-finite `{name}` value '{raw}'.")));
        }
        Ok(value)
    }
}

/// Parsed dataset: records in original file order, immutable after parse,
/// plus ingest bookkeeping for reporting.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<Record>,
    /// Data rows read from the input (excluding the header, including drops).
    pub rows_read: usize,
    /// Rows dropped because their field count differed from the header's.
    pub rows_dropped: usize,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Result of scoring one guess against a record's ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub actual: Outcome,
    pub correct: bool,
}

/// Running confusion-matrix counters and financial totals for one session.
///
/// Invariant: the four counters sum to the number of guesses evaluated since
/// the tracker was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeStatistics {
    pub true_positive: u64,
    pub false_positive: u64,
    pub true_negative: u64,
    pub false_negative: u64,
    /// Realized profit/loss in dollars.
    pub money_total: i64,
    /// Foregone profit from denied applicants who would have repaid.
    pub opportunity_cost_total: i64,
}

impl OutcomeStatistics {
    /// Number of guesses evaluated so far.
    pub fn guesses(&self) -> u64 {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }

    /// Fraction of correct guesses, if any were made.
    pub fn accuracy(&self) -> Option<f64> {
        let total = self.guesses();
        if total == 0 {
            return None;
        }
        Some((self.true_positive + self.true_negative) as f64 / total as f64)
    }
}

/// The classification facts emitted per evaluated guess, for the renderer
/// and the statistics display.
#[derive(Debug, Clone, Copy)]
pub struct GuessReport {
    pub income: f64,
    pub credit_score: f64,
    pub guess: Guess,
    pub actual: Outcome,
    pub correct: bool,
    /// Statistics snapshot after this guess was recorded.
    pub stats: OutcomeStatistics,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with(pairs: &[(&str, &str)]) -> Record {
        Record::new(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
    }

    #[test]
    fn repaid_decodes_zero_and_one() {
        let r = record_with(&[(COL_REPAY, "1")]);
        assert_eq!(r.repaid().unwrap(), Outcome::Repaid);
        let r = record_with(&[(COL_REPAY, "0")]);
        assert_eq!(r.repaid().unwrap(), Outcome::Defaulted);
    }

    #[test]
    fn repaid_rejects_out_of_domain_values() {
        for raw in ["2", "-1", "yes", "1.0", ""] {
            let r = record_with(&[(COL_REPAY, raw)]);
            assert!(r.repaid().is_err(), "expected error for {raw:?}");
        }
    }

    #[test]
    fn numeric_accessors_parse_as_presented() {
        let r = record_with(&[(COL_INCOME, "42000.5"), (COL_CREDIT_SCORE, "710")]);
        assert_eq!(r.income().unwrap(), 42000.5);
        assert_eq!(r.credit_score().unwrap(), 710.0);
    }

    #[test]
    fn level_cycle_is_closed() {
        for level in Level::ALL {
            assert_eq!(level.next().prev(), level);
        }
    }

    #[test]
    fn accuracy_is_none_before_any_guess() {
        assert_eq!(OutcomeStatistics::default().accuracy(), None);
    }
}
