//! Answer checking and hint derivation.

use std::fmt;

use esc_core::text::{fold, lenient_int};
use esc_core::{PuzzleFacet, PuzzleKind};

/// A hint derived from a puzzle's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hint {
    /// Numeric answers: the answer lies in `low..=high`.
    Range {
        /// Half the answer.
        low: i32,
        /// The answer plus five.
        high: i32,
    },
    /// Text answers: the first one or two characters, lower-cased.
    Prefix(String),
    /// Nothing to go on.
    Generic,
}

impl Hint {
    /// Derive the hint for a facet. Deterministic in the answer.
    pub fn for_facet(facet: &PuzzleFacet) -> Self {
        match facet.kind {
            PuzzleKind::Numeric => {
                let v = lenient_int(&facet.answer);
                Hint::Range {
                    low: v / 2,
                    high: v.saturating_add(5),
                }
            }
            _ => {
                let prefix: String = fold(&facet.answer).chars().take(2).collect();
                if prefix.is_empty() {
                    Hint::Generic
                } else {
                    Hint::Prefix(prefix)
                }
            }
        }
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::Range { low, high } => write!(f, "The number is between {low} and {high}."),
            Hint::Prefix(p) => write!(f, "Starts with '{p}'."),
            Hint::Generic => write!(f, "Look around closely."),
        }
    }
}

/// Whether `input` answers the facet's puzzle.
///
/// Numeric puzzles compare integer values, with anything non-numeric read as
/// 0. Text puzzles compare trimmed, lower-cased strings. A facet without a
/// puzzle accepts any input.
pub fn check_answer(facet: &PuzzleFacet, input: &str) -> bool {
    match facet.kind {
        PuzzleKind::None => true,
        PuzzleKind::Numeric => lenient_int(&facet.answer) == lenient_int(input),
        PuzzleKind::Text => fold(&facet.answer) == fold(input),
    }
}
