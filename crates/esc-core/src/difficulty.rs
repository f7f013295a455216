use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EscError;

/// Game difficulty. The discriminant is the byte stored in save files and
/// the high-score ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Score penalty of 5 points.
    Easy = 1,
    /// No score modifier.
    #[default]
    Medium = 2,
    /// Score bonus of 10 points.
    Hard = 3,
}

impl Difficulty {
    /// The on-disk code (1, 2, or 3).
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode an on-disk code. Returns `None` for anything outside 1..=3.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Easy),
            2 => Some(Self::Medium),
            3 => Some(Self::Hard),
            _ => None,
        }
    }

    /// Points added to (or removed from) the final score.
    pub fn score_modifier(self) -> i64 {
        match self {
            Self::Easy => -5,
            Self::Medium => 0,
            Self::Hard => 10,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "Easy"),
            Self::Medium => write!(f, "Medium"),
            Self::Hard => write!(f, "Hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = EscError;

    /// Accepts names (case-insensitive) or the numeric codes 1-3.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "1" => Ok(Self::Easy),
            "medium" | "2" => Ok(Self::Medium),
            "hard" | "3" => Ok(Self::Hard),
            _ => Err(EscError::UnknownDifficulty(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(Difficulty::from_code(d.code()), Some(d));
        }
        assert_eq!(Difficulty::from_code(0), None);
        assert_eq!(Difficulty::from_code(4), None);
    }

    #[test]
    fn parse_names_and_codes() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(" easy ".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("2".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert!("nightmare".parse::<Difficulty>().is_err());
    }

    #[test]
    fn modifiers() {
        assert_eq!(Difficulty::Easy.score_modifier(), -5);
        assert_eq!(Difficulty::Medium.score_modifier(), 0);
        assert_eq!(Difficulty::Hard.score_modifier(), 10);
    }

    #[test]
    fn display() {
        assert_eq!(Difficulty::default().to_string(), "Medium");
    }
}
