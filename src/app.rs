//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - dispatches to the TUI, the level checker, or the generator

use std::path::PathBuf;

use clap::Parser;

use crate::cli::{Command, GenArgs, PlayArgs};
use crate::data::{LevelSource, generate_level};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `loans` binary.
pub fn run() -> Result<(), AppError> {
    // We want `loans` and `loans -l hard` to behave like `loans play ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while keeping the bare invocation convenient.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Play(args) => crate::tui::run(args),
        Command::Check(args) => handle_check(args),
        Command::Gen(args) => handle_gen(args),
    }
}

fn handle_check(args: PlayArgs) -> Result<(), AppError> {
    let source = LevelSource::resolve(args.data.as_deref());
    let loaded = pipeline::load_level(&source, &args)?;

    print!(
        "{}",
        crate::report::format_run_summary(
            loaded.level,
            &loaded.source_desc,
            &loaded.dataset,
            loaded.session.stream(),
        )
    );

    Ok(())
}

fn handle_gen(args: GenArgs) -> Result<(), AppError> {
    let text = generate_level(args.level, args.count, args.seed)?;
    let path = args
        .out
        .unwrap_or_else(|| PathBuf::from(args.level.file_name()));

    std::fs::write(&path, text)
        .map_err(|e| AppError::runtime(format!("Failed to write '{}': {e}", path.display())))?;

    println!("Wrote {} applicants to {}", args.count, path.display());
    Ok(())
}

/// Rewrite argv so `loans` defaults to `loans play`.
///
/// Rules:
/// - `loans`                     -> `loans play`
/// - `loans -l hard ...`         -> `loans play -l hard ...`
/// - `loans --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("play".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "play" | "check" | "gen");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "play flags".
    if arg1.starts_with('-') {
        argv.insert(1, "play".to_string());
        return argv;
    }

    argv
}
