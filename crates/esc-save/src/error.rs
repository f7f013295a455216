//! Error types for the save and high-score codecs.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing a save file or a high-score record.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The file could not be opened or written.
    #[error("cannot write {path}: {source}")]
    Io {
        /// File being written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A length or counter does not fit the on-disk 32-bit field.
    #[error("{0} is too large to store")]
    Oversized(&'static str),
}

/// Errors that can occur while reading a save file or the high-score ledger.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not a save file, or is damaged or cut short.
    #[error("corrupt save file: {0}")]
    CorruptFile(String),

    /// The file was written by an unknown format version.
    #[error("unsupported save format version {0}")]
    UnsupportedVersion(u8),

    /// The save was made for a level with a different number of objects.
    #[error("save file is for a different level: expected {expected} objects, found {found}")]
    ObjectCountMismatch {
        /// Object count of the loaded level.
        expected: usize,
        /// Object count stored in the file.
        found: usize,
    },
}

impl LoadError {
    pub(crate) fn corrupt(what: impl Into<String>) -> Self {
        Self::CorruptFile(what.into())
    }
}
