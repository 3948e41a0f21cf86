//! Errors raised outside the pure core.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load a fretboard description.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fretboard description: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for {option}: {value}")]
    InvalidArgument { option: String, value: String },
}
