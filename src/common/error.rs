//! Error types for pagereplay.

use thiserror::Error;

use crate::common::ProcessId;

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in pagereplay.
///
/// Eviction-impossible situations (LRU-X and Working-Set with no eligible
/// victim) are not errors: those policies load past capacity instead.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while reading an input file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration or process record.
    ///
    /// `line` is 1-based.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The policy factory does not know this name.
    #[error("unsupported policy: {0}")]
    UnsupportedPolicy(String),

    /// A parsed configuration is internally inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A hard-capacity policy returned with more pages resident than frames.
    ///
    /// This indicates a bug in the policy, not a property of the input.
    #[error("{process} holds {resident} pages but has only {capacity} frames")]
    CapacityExceeded {
        process: ProcessId,
        resident: usize,
        capacity: usize,
    },
}

impl Error {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }
}
