//! Game engine for escape room levels.
//!
//! Takes a parsed [`esc_core::Level`], shuffles which objects carry which
//! puzzles, and runs a playthrough: inspecting objects, answering puzzles,
//! hints, items, room progression, timing and scoring.

pub mod config;
pub mod error;
pub mod inventory;
pub mod puzzle;
pub mod score;
pub mod session;
pub mod shuffle;
pub mod summary;

pub use config::GameConfig;
pub use error::{EngineError, EngineResult};
pub use inventory::Inventory;
pub use puzzle::{Hint, check_answer};
pub use score::{MAX_SCORE, compute_score};
pub use session::{AnswerOutcome, GameSession, InspectOutcome, Progress, RuntimeState};
pub use shuffle::shuffle_puzzles;
pub use summary::{Achievement, LastGameSummary, format_time};
