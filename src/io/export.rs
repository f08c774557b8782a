//! Session exports.
//!
//! Two artifacts, both meant to be easy to consume in spreadsheets or
//! downstream scripts:
//! - per-guess results CSV
//! - session JSON snapshot (level, timestamp, final statistics)

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::domain::{GuessReport, Level, OutcomeStatistics};
use crate::error::AppError;

/// Write per-guess results to a CSV file.
pub fn write_results_csv(path: &Path, reports: &[GuessReport]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::runtime(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(
        file,
        "income,credit_score,guess,actual,correct,money_total_after,opportunity_cost_after"
    )
    .map_err(|e| AppError::runtime(format!("Failed to write export CSV header: {e}")))?;

    for r in reports {
        writeln!(
            file,
            "{},{},{},{},{},{},{}",
            r.income,
            r.credit_score,
            r.guess.as_flag(),
            r.actual.as_flag(),
            r.correct,
            r.stats.money_total,
            r.stats.opportunity_cost_total,
        )
        .map_err(|e| AppError::runtime(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// The "portable" representation of a finished (or in-progress) session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionFile {
    pub tool: String,
    pub level: Level,
    pub exported_at: String,
    pub guesses: u64,
    pub stats: OutcomeStatistics,
}

impl SessionFile {
    pub fn new(level: Level, stats: OutcomeStatistics) -> Self {
        Self {
            tool: "loans".to_string(),
            level,
            exported_at: chrono::Local::now().to_rfc3339(),
            guesses: stats.guesses(),
            stats,
        }
    }
}

/// Write a session JSON snapshot.
pub fn write_session_json(path: &Path, session: &SessionFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::runtime(format!("Failed to create session JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, session)
        .map_err(|e| AppError::runtime(format!("Failed to write session JSON: {e}")))?;
    Ok(())
}

/// Timestamped default stem for export files (`session-YYYYmmdd-HHMMSS`).
pub fn default_export_stem() -> String {
    format!("session-{}", chrono::Local::now().format("%Y%m%d-%H%M%S"))
}
