//! Shared domain types for the loan trainer.

pub mod types;

pub use types::*;
