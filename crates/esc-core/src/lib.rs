//! Core types for the escape room engine: rooms, objects, puzzles, and the level model.
//!
//! This crate defines the data model that the level parser produces. It is
//! independent of the parser: a [`Level`] can be assembled programmatically
//! from room headers and placed objects.

/// Difficulty levels and their scoring modifiers.
pub mod difficulty;
/// Error types used throughout the crate.
pub mod error;
/// The level model: rooms with contiguous object ranges.
pub mod level;
/// Inspectable objects and their puzzle facets.
pub mod object;
pub mod text;

/// Re-export the difficulty type.
pub use difficulty::Difficulty;
/// Re-export error types.
pub use error::{EscError, EscResult};
/// Re-export level types.
pub use level::{Level, Room, RoomHeader};
/// Re-export object types.
pub use object::{GameObject, PuzzleFacet, PuzzleKind};
