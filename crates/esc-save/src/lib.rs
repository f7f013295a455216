//! On-disk formats for escape room games.
//!
//! A save file holds one [`esc_engine::RuntimeState`] and is overwritten on
//! every save. The high-score ledger is append-only and only ever grows.
//! Both are compact native-endian binary images.

pub mod bytes;
pub mod error;
pub mod highscore;
pub mod save;

pub use error::{LoadError, SaveError};
pub use highscore::{HighScoreRecord, append_high_score, read_high_scores};
pub use save::{decode_state, encode_state, load_game, save_game};
