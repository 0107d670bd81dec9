//! Error types for the thread composition library

use thiserror::Error;

/// Result type alias for this library
pub type Result<T> = std::result::Result<T, Error>;

/// Malformed Plain-Thread input. Always names the offending line; sequence
/// errors additionally carry the expected index. Never auto-corrected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// No index line anywhere in the input
    #[error("no numeric index lines found in input")]
    NoIndexLines,

    /// Non-blank content before the first index line
    #[error("line {line}: expected an index line, found other content")]
    ExpectedIndexLine {
        /// 1-based line number of the offending line
        line: usize,
    },

    /// Index does not continue the `1, 2, 3, …` sequence
    #[error("line {line}: expected index {expected}, found {found}")]
    IndexOutOfSequence {
        /// 1-based line number of the index line
        line: usize,
        /// The index required by the sequence
        expected: usize,
        /// The index actually present
        found: usize,
    },

    /// The line after an index line is not blank
    #[error("line {line}: index {index} must be followed by a blank line")]
    MissingBlankLine {
        /// 1-based line number where the blank line was expected
        line: usize,
        /// The index whose separator is missing
        index: usize,
    },

    /// A block body is empty after trimming
    #[error("segment #{index} (line {line}) has an empty body")]
    EmptyBody {
        /// 1-based line number of the block's index line
        line: usize,
        /// The block's index
        index: usize,
    },
}

/// Errors that can occur while splitting or publishing a thread
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed Plain-Thread input ("fix your text")
    #[error(transparent)]
    Format(#[from] FormatError),

    /// AI backend unreachable, transport failure, or empty response
    /// ("check connectivity/credentials")
    #[error("AI backend error: {0}")]
    Backend(String),

    /// The backend responded, but its output failed Plain-Thread validation.
    /// The raw response is attached for diagnostics.
    #[error("AI backend produced malformed thread text: {source}")]
    BackendFormat {
        /// The validation failure
        source: FormatError,
        /// The backend's raw response text
        raw: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Publishing failure with resume state
    #[error(transparent)]
    Publish(#[from] crate::publisher::PublishError),
}

impl Error {
    /// Whether this error is the user's text to fix, as opposed to an
    /// environment or service problem.
    #[must_use]
    pub const fn is_format(&self) -> bool {
        matches!(self, Self::Format(_) | Self::BackendFormat { .. })
    }
}
