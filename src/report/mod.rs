//! Reporting utilities: run summaries and statistics formatting.

pub mod format;

pub use format::*;
