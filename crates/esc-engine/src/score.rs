//! Final score computation.

use esc_core::Difficulty;

/// Highest possible score.
pub const MAX_SCORE: u32 = 100;

/// Score a finished (or in-progress) game.
///
/// Starts at 100 and subtracts a point per ten seconds, five per hint and
/// one per two moves, all with truncating division. The difficulty modifier
/// is applied last and the result is clamped to `0..=100`.
pub fn compute_score(elapsed_secs: u32, hints_used: u32, total_moves: u32, difficulty: Difficulty) -> u32 {
    let raw = i64::from(MAX_SCORE)
        - i64::from(elapsed_secs / 10)
        - i64::from(hints_used) * 5
        - i64::from(total_moves / 2)
        + difficulty.score_modifier();
    raw.clamp(0, i64::from(MAX_SCORE)) as u32
}
