//! CSV ingest and normalization.
//!
//! This module turns raw delimited applicant data into a clean [`Dataset`]
//! that is safe to replay in a session.
//!
//! Design goals:
//! - **Strict schema** for the required columns (clear errors + exit code 2)
//! - **Row-level filtering**: a row whose field count differs from the
//!   header's is dropped whole, never half-parsed (counted, not fatal)
//! - **Deterministic behavior** (file order preserved, no hidden randomness)
//! - **Separation of concerns**: no scoring logic here

use std::collections::HashMap;

use csv::StringRecord;

use crate::domain::{COL_CREDIT_SCORE, COL_INCOME, COL_REPAY, Dataset, Record};
use crate::error::AppError;

/// Accepted header spellings for each required column, in preference order.
/// Matching is case/whitespace-insensitive via [`normalize_header_name`].
const INCOME_ALIASES: [&str; 3] = [COL_INCOME, "annual_income", "applicant_income"];
const CREDIT_SCORE_ALIASES: [&str; 3] = [COL_CREDIT_SCORE, "creditscore", "credit"];
const REPAY_ALIASES: [&str; 4] = [COL_REPAY, "repaid", "repay", "loan_repaid"];

/// Parse raw delimited text into a [`Dataset`].
///
/// The first line is the comma-delimited header; every subsequent line is a
/// data row. Header and value fields are trimmed before use. A data row is
/// accepted only if its field count equals the header's; otherwise it is
/// dropped and counted in `rows_dropped`.
///
/// Pure function of its input text; no I/O.
pub fn parse_records(text: &str) -> Result<Dataset, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::usage(format!("Failed to read CSV header: {e}")))?
        .clone();

    let mut names: Vec<String> = headers.iter().map(normalize_header_name).collect();
    let header_map = build_header_map(&names);
    let required = resolve_required_columns(&header_map)?;

    // Store the required columns under their canonical keys so record
    // accessors do not depend on which alias the file happened to use.
    names[required.income] = COL_INCOME.to_string();
    names[required.credit_score] = COL_CREDIT_SCORE.to_string();
    names[required.repay] = COL_REPAY.to_string();

    let mut records = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_dropped = 0usize;

    for result in reader.records() {
        rows_read += 1;

        let row = match result {
            Ok(r) => r,
            Err(_) => {
                rows_dropped += 1;
                continue;
            }
        };

        if row.len() != names.len() {
            rows_dropped += 1;
            continue;
        }

        records.push(build_record(&row, &names));
    }

    Ok(Dataset {
        records,
        rows_read,
        rows_dropped,
    })
}

/// Indices of the required columns after alias resolution.
#[derive(Debug, Clone, Copy)]
struct RequiredColumns {
    income: usize,
    credit_score: usize,
    repay: usize,
}

fn resolve_required_columns(header_map: &HashMap<String, usize>) -> Result<RequiredColumns, AppError> {
    let income = find_column(header_map, &INCOME_ALIASES)
        .ok_or_else(|| missing_column_error("income", &INCOME_ALIASES))?;
    let credit_score = find_column(header_map, &CREDIT_SCORE_ALIASES)
        .ok_or_else(|| missing_column_error("credit score", &CREDIT_SCORE_ALIASES))?;
    let repay = find_column(header_map, &REPAY_ALIASES)
        .ok_or_else(|| missing_column_error("repayment flag", &REPAY_ALIASES))?;

    Ok(RequiredColumns {
        income,
        credit_score,
        repay,
    })
}

fn find_column(header_map: &HashMap<String, usize>, aliases: &[&str]) -> Option<usize> {
    aliases.iter().find_map(|name| header_map.get(*name).copied())
}

fn missing_column_error(what: &str, aliases: &[&str]) -> AppError {
    AppError::usage(format!(
        "Missing required {what} column (accepted headers: {}).",
        aliases.join(", ")
    ))
}

fn build_header_map(names: &[String]) -> HashMap<String, usize> {
    names
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.clone(), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on
    // the first header (e.g. "﻿Income"). If we don't strip it, schema
    // resolution would incorrectly report a missing column. Internal spaces
    // are folded to underscores so "Credit Score" matches "credit_score".
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase().replace(char::is_whitespace, "_")
}

fn build_record(row: &StringRecord, names: &[String]) -> Record {
    let fields = names
        .iter()
        .zip(row.iter())
        .map(|(name, value)| (name.clone(), value.to_string()))
        .collect();
    Record::new(fields)
}
