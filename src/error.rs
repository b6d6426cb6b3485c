//! Error types for the recommender core

use std::path::PathBuf;
use thiserror::Error;

/// Result type for numpick operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Pool source missing at load time. Fatal: nothing else can run.
    #[error("pool file {} does not exist, generate it first", .path.display())]
    PoolUnavailable { path: PathBuf },

    /// A pool token that cannot be turned into a 5-digit code
    #[error("line {line}: '{token}' is not a 5-digit code")]
    InvalidCode { line: u64, token: String },

    /// History file exists but cannot be read as a `number` column of codes
    #[error("history file {} is corrupt: {reason}", .path.display())]
    HistoryCorrupt { path: PathBuf, reason: String },

    /// Nothing left after history and sequential exclusion
    #[error("no available numbers after history and sequential filtering")]
    EmptyAfterHistoryOrSequentialFilter,

    /// Nothing left after the leading-digit filters
    #[error("no numbers available after attribute filtering")]
    EmptyAfterAttributeFilter,

    /// Requested generation count below 1
    #[error("generation count must be at least 1, got {0}")]
    InvalidCount(usize),

    /// Unparseable filter option (digit list, magnitude or parity name)
    #[error("invalid filter value '{0}'")]
    InvalidFilter(String),

    /// Language selector not in the label table
    #[error("unknown language '{0}'")]
    UnknownLanguage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Fatal errors halt the session; the rest only halt the current generation
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Error::EmptyAfterHistoryOrSequentialFilter
                | Error::EmptyAfterAttributeFilter
                | Error::InvalidCount(_)
                | Error::InvalidFilter(_)
                | Error::UnknownLanguage(_)
        )
    }

    /// True for the two "no candidates" outcomes of the filter pipeline
    pub fn is_no_candidates(&self) -> bool {
        matches!(
            self,
            Error::EmptyAfterHistoryOrSequentialFilter | Error::EmptyAfterAttributeFilter
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        let missing = Error::PoolUnavailable {
            path: PathBuf::from("favorite_patterns_pool.csv"),
        };
        assert!(missing.is_fatal());
        assert!(!missing.is_no_candidates());

        assert!(!Error::EmptyAfterHistoryOrSequentialFilter.is_fatal());
        assert!(Error::EmptyAfterAttributeFilter.is_no_candidates());
        assert!(!Error::InvalidCount(0).is_fatal());
    }

    #[test]
    fn test_messages_name_the_file() {
        let err = Error::HistoryCorrupt {
            path: PathBuf::from("history_selected.csv"),
            reason: "missing column".to_string(),
        };
        assert!(err.to_string().contains("history_selected.csv"));
    }
}
