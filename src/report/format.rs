//! Formatted terminal output.
//!
//! Formatting code lives in one place so the session/scoring code stays
//! clean and output changes are localized.

use crate::domain::{Dataset, Level, OutcomeStatistics};
use crate::session::TrainingStream;

/// Dollar amount with thousands separators; negatives as `-$6,000`.
pub fn format_money(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(amount.unsigned_abs()))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Summary of a parsed + split level for the `check` command.
pub fn format_run_summary(
    level: Level,
    source: &str,
    dataset: &Dataset,
    stream: &TrainingStream,
) -> String {
    let mut out = String::new();

    out.push_str("=== loans - level check ===\n");
    out.push_str(&format!("Level: {}\n", level.display_name()));
    out.push_str(&format!("Source: {source}\n"));
    out.push_str(&format!("Rows read: {}\n", dataset.rows_read));
    out.push_str(&format!("Rows dropped (bad field count): {}\n", dataset.rows_dropped));
    out.push_str(&format!("Records parsed: {}\n", dataset.len()));
    out.push_str(&format!("Training stream: {} records\n", stream.len()));
    out.push_str(&format!("Held out: {} records\n", stream.holdout_len()));

    if stream.is_empty() {
        out.push_str("WARNING: no playable records (empty training stream).\n");
    }

    out
}

/// Confusion-matrix counters and money totals as aligned text lines.
pub fn format_stats(stats: &OutcomeStatistics) -> String {
    let mut out = String::new();

    out.push_str(&format!("Guesses: {}\n", stats.guesses()));
    match stats.accuracy() {
        Some(acc) => out.push_str(&format!("Accuracy: {:.1}%\n", acc * 100.0)),
        None => out.push_str("Accuracy: -\n"),
    }
    out.push_str(&format!(
        "TP {:>4}  FP {:>4}\nFN {:>4}  TN {:>4}\n",
        stats.true_positive, stats.false_positive, stats.false_negative, stats.true_negative,
    ));
    out.push_str(&format!("Money: {}\n", format_money(stats.money_total)));
    out.push_str(&format!(
        "Opportunity cost: {}\n",
        format_money(stats.opportunity_cost_total)
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_formatting_groups_thousands() {
        assert_eq!(format_money(0), "$0");
        assert_eq!(format_money(2_000), "$2,000");
        assert_eq!(format_money(-6_000), "-$6,000");
        assert_eq!(format_money(1_234_567), "$1,234,567");
        assert_eq!(format_money(-10_000), "-$10,000");
        assert_eq!(format_money(999), "$999");
    }

    #[test]
    fn stats_block_reports_all_counters_and_totals() {
        let stats = OutcomeStatistics {
            true_positive: 2,
            false_positive: 1,
            true_negative: 0,
            false_negative: 0,
            money_total: -6_000,
            opportunity_cost_total: 0,
        };
        let text = format_stats(&stats);
        assert!(text.contains("Guesses: 3"));
        assert!(text.contains("Accuracy: 66.7%"));
        assert!(text.contains("-$6,000"));
    }

    #[test]
    fn empty_stream_summary_warns() {
        let dataset = Dataset {
            records: Vec::new(),
            rows_read: 4,
            rows_dropped: 4,
        };
        let stream = crate::session::split(dataset.clone());
        let text = format_run_summary(Level::Easy, "data", &dataset, &stream);
        assert!(text.contains("Rows dropped (bad field count): 4"));
        assert!(text.contains("no playable records"));
    }
}
