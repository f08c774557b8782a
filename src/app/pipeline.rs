//! Shared "load a level" pipeline used by both the CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch/generate -> parse -> split -> session
//!
//! The CLI and the TUI then focus on presentation (printing vs widgets).

use crate::cli::PlayArgs;
use crate::data::{LevelSource, generate_level};
use crate::domain::{Dataset, Level};
use crate::error::AppError;
use crate::io::ingest::parse_records;
use crate::session::Session;

/// Everything produced by loading one level.
///
/// The loaded state only exists once parsing and splitting succeeded, so a
/// caller replacing an old `LoadedLevel` with a new one gets an atomic
/// switch: a failed load leaves the previous state untouched.
#[derive(Debug, Clone)]
pub struct LoadedLevel {
    pub level: Level,
    /// Where the data came from, for display.
    pub source_desc: String,
    /// The parsed dataset (ingest bookkeeping included).
    pub dataset: Dataset,
    /// Fresh session: 80% training stream, cursor at 0, zeroed statistics.
    pub session: Session,
}

/// Fetch (or generate) and load the level described by `args`.
pub fn load_level(source: &LevelSource, args: &PlayArgs) -> Result<LoadedLevel, AppError> {
    let (text, source_desc) = if args.sample {
        let text = generate_level(args.level, args.count, args.seed)?;
        (text, format!("synthetic (seed {})", args.seed))
    } else {
        (source.fetch_level(args.level)?, source.describe())
    };

    load_from_text(args.level, source_desc, &text)
}

/// Parse raw delimited text and start a fresh session over it.
pub fn load_from_text(level: Level, source_desc: String, text: &str) -> Result<LoadedLevel, AppError> {
    let dataset = parse_records(text)?;
    let session = Session::new(dataset.clone());

    Ok(LoadedLevel {
        level,
        source_desc,
        dataset,
        session,
    })
}
