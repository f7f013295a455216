use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of puzzle an object carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PuzzleKind {
    /// No puzzle; the object can be inspected freely.
    #[default]
    None,
    /// The answer is an integer.
    Numeric,
    /// The answer is free text, compared case-insensitively.
    Text,
}

impl PuzzleKind {
    /// Map a level-file type code to a kind: 0 is no puzzle, 1 numeric,
    /// every other value text.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::None,
            1 => Self::Numeric,
            _ => Self::Text,
        }
    }
}

impl fmt::Display for PuzzleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Numeric => write!(f, "numeric"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// The puzzle-bearing attributes of an object.
///
/// Kept apart from the object's identity (name and description) so that a
/// new game can move puzzles between objects by swapping whole facets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleFacet {
    /// Which kind of puzzle, if any.
    pub kind: PuzzleKind,
    /// The question shown to the player. Empty when absent.
    pub prompt: String,
    /// The expected answer. Empty when absent.
    pub answer: String,
    /// Whether resolving the object grants an item.
    pub gives_item: bool,
    /// Name of the granted item. Empty when absent.
    pub item_name: String,
}

impl PuzzleFacet {
    /// Whether the facet carries a puzzle at all.
    pub fn has_puzzle(&self) -> bool {
        self.kind != PuzzleKind::None
    }

    /// Whether resolving the object actually puts something in the inventory.
    pub fn grants_item(&self) -> bool {
        self.gives_item && !self.item_name.is_empty()
    }
}

/// An inspectable entity inside a room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameObject {
    /// Display name.
    pub name: String,
    /// Flavor text shown on inspection.
    pub description: String,
    /// Puzzle and reward attached to this object.
    pub facet: PuzzleFacet,
}

impl GameObject {
    /// Create an object with no puzzle and no reward.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            facet: PuzzleFacet::default(),
        }
    }

    /// Attach a puzzle.
    pub fn with_puzzle(
        mut self,
        kind: PuzzleKind,
        prompt: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        self.facet.kind = kind;
        self.facet.prompt = prompt.into();
        self.facet.answer = answer.into();
        self
    }

    /// Attach an item reward.
    pub fn with_item(mut self, item_name: impl Into<String>) -> Self {
        self.facet.gives_item = true;
        self.facet.item_name = item_name.into();
        self
    }

    /// Shorthand for `self.facet.has_puzzle()`.
    pub fn has_puzzle(&self) -> bool {
        self.facet.has_puzzle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_codes() {
        assert_eq!(PuzzleKind::from_code(0), PuzzleKind::None);
        assert_eq!(PuzzleKind::from_code(1), PuzzleKind::Numeric);
        assert_eq!(PuzzleKind::from_code(2), PuzzleKind::Text);
        assert_eq!(PuzzleKind::from_code(-3), PuzzleKind::Text);
    }

    #[test]
    fn has_puzzle_follows_kind() {
        let plain = GameObject::new("Chair", "Wobbly.");
        assert!(!plain.has_puzzle());

        let safe = GameObject::new("Safe", "Steel.").with_puzzle(PuzzleKind::Numeric, "Code?", "42");
        assert!(safe.has_puzzle());
    }

    #[test]
    fn grants_item_needs_a_name() {
        let mut facet = PuzzleFacet {
            gives_item: true,
            ..PuzzleFacet::default()
        };
        assert!(!facet.grants_item());
        facet.item_name = "Key".to_string();
        assert!(facet.grants_item());
        facet.gives_item = false;
        assert!(!facet.grants_item());
    }

    #[test]
    fn serializes_kind_lowercase() {
        let json = serde_json::to_string(&PuzzleKind::Numeric).unwrap();
        assert_eq!(json, "\"numeric\"");
    }
}
