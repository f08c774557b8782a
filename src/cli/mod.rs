//! Command-line parsing for the loan trainer.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the pipeline/session code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::Level;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "loans", version, about = "Loan repayment prediction trainer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive trainer (the default when no subcommand is given).
    Play(PlayArgs),
    /// Parse and summarize a level without playing it.
    Check(PlayArgs),
    /// Write a synthetic level CSV.
    Gen(GenArgs),
}

/// Common options for loading a level.
#[derive(Debug, Parser, Clone)]
pub struct PlayArgs {
    /// Difficulty level to load.
    #[arg(short = 'l', long, value_enum, default_value_t = Level::Easy)]
    pub level: Level,

    /// Data location: a directory containing `<level>.csv` files, or an
    /// HTTP(S) base URL. Defaults to `LOAN_DATA_URL` / `LOAN_DATA_DIR`
    /// from the environment, then `./data`.
    #[arg(short = 'd', long)]
    pub data: Option<String>,

    /// Play a generated synthetic level instead of fetching one.
    #[arg(long)]
    pub sample: bool,

    /// Number of applicants when `--sample` is used.
    #[arg(short = 'n', long, default_value_t = 200)]
    pub count: usize,

    /// Random seed when `--sample` is used.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Options for generating a synthetic level file.
#[derive(Debug, Parser)]
pub struct GenArgs {
    /// Difficulty level to generate.
    #[arg(short = 'l', long, value_enum, default_value_t = Level::Easy)]
    pub level: Level,

    /// Number of applicants to generate.
    #[arg(short = 'n', long, default_value_t = 200)]
    pub count: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output file (defaults to the level's file name, e.g. `easy.csv`).
    #[arg(short = 'o', long)]
    pub out: Option<PathBuf>,
}
