// src/error.rs
// Error type shared by every stage of the scratch game pipeline.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScratchError {
    #[error("could not read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("betting amount must be a positive number, got {0}")]
    InvalidBet(f64),

    #[error("generated matrix holds no bonus symbol")]
    MissingBonus,

    #[error("symbol `{0}` is not defined in the configuration")]
    UnknownSymbol(String),

    #[error("win combination `{0}` is not defined in the configuration")]
    UnknownCombination(String),
}

pub type Result<T> = std::result::Result<T, ScratchError>;

impl ScratchError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ScratchError::InvalidConfig(message.into())
    }
}
