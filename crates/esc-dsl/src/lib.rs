//! Parser for escape room level definition files.
//!
//! The format is line oriented and forgiving: blank lines are ignored,
//! keywords match without regard to case, and missing fields fall back to
//! documented defaults. Only a missing or invalid room count is fatal; every
//! other problem becomes a warning [`Diagnostic`].

/// Line cursor over level source text.
pub mod cursor;
/// Warning and error reports with source spans.
pub mod diagnostics;
/// Error types for level loading.
pub mod error;
/// The level grammar.
pub mod parser;

use std::path::Path;

use esc_core::Level;

pub use diagnostics::{Diagnostic, Severity, render_diagnostics};
pub use error::ParseError;
pub use parser::Parsed;

/// Parse level source text into a [`Level`], discarding warnings.
pub fn parse(source: &str) -> Result<Level, ParseError> {
    parser::parse(source).map(|parsed| parsed.level)
}

/// Parse level source text, keeping the warnings raised along the way.
pub fn parse_with_diagnostics(source: &str) -> Result<Parsed, ParseError> {
    parser::parse(source)
}

/// Read a level file as text. Bytes that are not valid UTF-8 are replaced
/// with U+FFFD; the second value reports whether that happened.
pub fn read_source(path: &Path) -> Result<(String, bool), ParseError> {
    let bytes = std::fs::read(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok((text, false)),
        Err(e) => Ok((String::from_utf8_lossy(e.as_bytes()).into_owned(), true)),
    }
}

/// Read and parse a level file.
pub fn load_level(path: &Path) -> Result<Parsed, ParseError> {
    let (source, replaced) = read_source(path)?;
    let mut parsed = parser::parse(&source)?;
    if replaced {
        parsed.diagnostics.insert(
            0,
            Diagnostic::warning(0..0, "file is not valid UTF-8; invalid bytes were replaced"),
        );
    }
    for diag in &parsed.diagnostics {
        log::warn!("{}: {diag}", path.display());
    }
    log::info!(
        "loaded {} rooms and {} objects from {}",
        parsed.level.room_count(),
        parsed.level.object_count(),
        path.display()
    );
    Ok(parsed)
}
