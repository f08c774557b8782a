//! Data source for level files.
//!
//! The core consumes raw delimited text keyed by a difficulty level; this
//! module resolves where that text comes from (a local directory or an HTTP
//! base URL) and fetches it. A fetch failure is surfaced to the caller,
//! which keeps the previous session untouched.

use std::fs;
use std::path::PathBuf;

use reqwest::blocking::Client;

use crate::domain::Level;
use crate::error::AppError;

const ENV_DATA_URL: &str = "LOAN_DATA_URL";
const ENV_DATA_DIR: &str = "LOAN_DATA_DIR";
const DEFAULT_DATA_DIR: &str = "data";

/// Where level files live.
#[derive(Debug, Clone)]
enum SourceBase {
    Dir(PathBuf),
    Url(String),
}

/// Resolves a [`Level`] to raw CSV text.
pub struct LevelSource {
    base: SourceBase,
    client: Client,
}

impl LevelSource {
    /// Resolve the source location.
    ///
    /// Precedence: explicit `--data` value, then `LOAN_DATA_URL` /
    /// `LOAN_DATA_DIR` from the environment (`.env` is honored), then the
    /// `./data` directory.
    pub fn resolve(data: Option<&str>) -> Self {
        dotenvy::dotenv().ok();

        let base = match data {
            Some(value) => parse_base(value),
            None => {
                if let Ok(url) = std::env::var(ENV_DATA_URL) {
                    parse_base(&url)
                } else if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
                    SourceBase::Dir(PathBuf::from(dir))
                } else {
                    SourceBase::Dir(PathBuf::from(DEFAULT_DATA_DIR))
                }
            }
        };

        Self {
            base,
            client: Client::new(),
        }
    }

    /// Human-readable description of the source for reports and the TUI.
    pub fn describe(&self) -> String {
        match &self.base {
            SourceBase::Dir(dir) => dir.display().to_string(),
            SourceBase::Url(url) => url.clone(),
        }
    }

    /// Fetch the raw delimited text for a level.
    ///
    /// Blocking and serial: one fetch at a time, so a reload can never race
    /// a previous one.
    pub fn fetch_level(&self, level: Level) -> Result<String, AppError> {
        match &self.base {
            SourceBase::Dir(dir) => {
                let path = dir.join(level.file_name());
                fs::read_to_string(&path).map_err(|e| {
                    AppError::usage(format!("Failed to read level file '{}': {e}", path.display()))
                })
            }
            SourceBase::Url(base) => {
                let url = format!("{base}/{}", level.file_name());
                let response = self
                    .client
                    .get(&url)
                    .send()
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| AppError::runtime(format!("Failed to fetch '{url}': {e}")))?;
                response
                    .text()
                    .map_err(|e| AppError::runtime(format!("Failed to read response body from '{url}': {e}")))
            }
        }
    }
}

fn parse_base(value: &str) -> SourceBase {
    if value.starts_with("http://") || value.starts_with("https://") {
        SourceBase::Url(value.trim_end_matches('/').to_string())
    } else {
        SourceBase::Dir(PathBuf::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_http_value_is_a_url_base() {
        let source = LevelSource::resolve(Some("https://example.com/levels/"));
        assert_eq!(source.describe(), "https://example.com/levels");
    }

    #[test]
    fn explicit_path_value_is_a_directory_base() {
        let source = LevelSource::resolve(Some("fixtures/levels"));
        assert_eq!(source.describe(), "fixtures/levels");
    }

    #[test]
    fn local_fetch_reads_the_level_file() {
        let dir = std::env::temp_dir().join("loan-trainer-source-test");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(Level::Easy.file_name()), "Income,Credit_Score,Repay_Loan\n1,2,1\n").unwrap();

        let source = LevelSource::resolve(Some(dir.to_str().unwrap()));
        let text = source.fetch_level(Level::Easy).unwrap();
        assert!(text.starts_with("Income,Credit_Score,Repay_Loan"));
    }

    #[test]
    fn missing_level_file_is_an_error() {
        let source = LevelSource::resolve(Some("definitely/not/a/dir"));
        let err = source.fetch_level(Level::Hard).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
