//! Data acquisition: the level data source and the synthetic generator.

pub mod sample;
pub mod source;

pub use sample::generate_level;
pub use source::LevelSource;
