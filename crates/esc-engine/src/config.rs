//! Configuration for a new game.

use esc_core::Difficulty;

/// Settings chosen when a new game starts.
#[derive(Debug, Clone, Default)]
pub struct GameConfig {
    /// RNG seed for the puzzle shuffle. `None` draws a fresh seed per game.
    pub seed: Option<u64>,
    /// Difficulty, which shifts the final score.
    pub difficulty: Difficulty,
}

impl GameConfig {
    /// Fix the shuffle seed for reproducible games.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }
}
