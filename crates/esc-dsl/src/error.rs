//! Error types for level loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a level from loading at all.
///
/// Everything else that is wrong with a level file is absorbed by default
/// substitution and reported as a warning diagnostic instead.
#[derive(Debug, Error)]
pub enum ParseError {
    /// No line made only of digits was found, or its value was zero or too large.
    #[error("missing or invalid room count (expected a positive number on the first non-blank line)")]
    MissingOrInvalidRoomCount,

    /// The level file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// The file that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
