//! Guess scoring.

use crate::domain::{Evaluation, Guess, Record};
use crate::error::AppError;

/// Score a guess against a record's ground truth.
///
/// The record is passed explicitly rather than re-derived from the cursor
/// position, so there is no "current index minus one" bookkeeping to get
/// wrong. Pure: mutates nothing; the caller feeds the result to the tracker
/// and the renderer.
///
/// A repayment value outside {0, 1} propagates as an error; the caller must
/// not update any statistics for that guess.
pub fn evaluate(record: &Record, guess: Guess) -> Result<Evaluation, AppError> {
    let actual = record.repaid()?;
    Ok(Evaluation {
        actual,
        correct: guess.predicted_outcome() == actual,
    })
}
