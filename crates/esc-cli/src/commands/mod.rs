pub mod check;
pub mod init;
pub mod play;
pub mod scores;
pub mod show;

use std::path::Path;

use esc_core::Level;
use esc_dsl::{Diagnostic, ParseError, Parsed, render_diagnostics};

/// Load a level file, printing any diagnostics to stderr.
fn load_level(path: &Path) -> Result<Level, String> {
    load_parsed(path).map(|parsed| parsed.level)
}

/// Load a level file and keep its diagnostics, printing them to stderr.
fn load_parsed(path: &Path) -> Result<Parsed, String> {
    match esc_dsl::load_level(path) {
        Ok(parsed) => {
            print_diagnostics(path, &parsed.diagnostics);
            Ok(parsed)
        }
        Err(e @ ParseError::MissingOrInvalidRoomCount) => {
            print_diagnostics(path, &[Diagnostic::error(0..0, e.to_string())]);
            Err(format!("cannot load {}", path.display()))
        }
        Err(e) => Err(e.to_string()),
    }
}

/// Print diagnostics to stderr using ariadne.
fn print_diagnostics(path: &Path, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }

    // Re-read the source to give the report context.
    let source = esc_dsl::read_source(path)
        .map(|(text, _)| text)
        .unwrap_or_default();
    let filename = path.display().to_string();
    eprint!("{}", render_diagnostics(&source, &filename, diagnostics));

    let warnings = diagnostics.iter().filter(|d| !d.is_error()).count();
    if warnings > 0 {
        eprintln!(
            "  {} warning{}",
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
    }
}
