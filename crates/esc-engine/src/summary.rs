//! End-of-game summary and achievements.

use std::fmt;

use serde::Serialize;

use esc_core::Difficulty;

use crate::score::MAX_SCORE;

/// Games at or under this many seconds earn [`Achievement::Speedrunner`].
pub const SPEEDRUN_SECS: u32 = 300;

/// A badge awarded for how a game was played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Achievement {
    /// Escaped without asking for a single hint.
    MasterDetective,
    /// Escaped within five minutes.
    Speedrunner,
    /// Picked up every item the level hands out.
    Collector,
    /// Finished with the maximum score.
    Perfectionist,
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MasterDetective => "Master Detective",
            Self::Speedrunner => "Speedrunner",
            Self::Collector => "Collector",
            Self::Perfectionist => "Perfectionist",
        };
        f.write_str(name)
    }
}

/// A snapshot of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LastGameSummary {
    /// Rooms whose objects were all solved.
    pub rooms_explored: usize,
    /// Objects inspected over the whole game.
    pub total_moves: u32,
    /// Play time in seconds, across saves.
    pub elapsed_secs: u32,
    /// Hints requested.
    pub hints_used: u32,
    /// Difficulty the game was played on.
    pub difficulty: Difficulty,
    /// Final score, `0..=100`.
    pub score: u32,
    /// Items in the inventory at the end, in pickup order.
    pub items: Vec<String>,
    /// Badges earned, in a fixed order.
    pub achievements: Vec<Achievement>,
}

impl LastGameSummary {
    /// Work out which achievements the recorded numbers earn.
    ///
    /// `item_sources` is the number of objects in the level that grant an
    /// item; a level without any cannot award [`Achievement::Collector`].
    pub fn award(&mut self, item_sources: usize) {
        let mut earned = Vec::new();
        if self.hints_used == 0 {
            earned.push(Achievement::MasterDetective);
        }
        if self.elapsed_secs <= SPEEDRUN_SECS {
            earned.push(Achievement::Speedrunner);
        }
        if item_sources > 0 && self.items.len() >= item_sources {
            earned.push(Achievement::Collector);
        }
        if self.score == MAX_SCORE {
            earned.push(Achievement::Perfectionist);
        }
        self.achievements = earned;
    }

    /// Items as a comma-separated line, or `None`.
    pub fn items_line(&self) -> String {
        join_or_none(&self.items)
    }

    /// Achievements as a comma-separated line, or `None`.
    pub fn achievements_line(&self) -> String {
        join_or_none(&self.achievements)
    }
}

fn join_or_none<T: ToString>(values: &[T]) -> String {
    if values.is_empty() {
        return "None".to_string();
    }
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render seconds as `MM:SS`. Minutes are not wrapped into hours.
pub fn format_time(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
