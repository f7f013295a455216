use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use colored::Colorize;

use esc_core::{Difficulty, PuzzleKind};
use esc_engine::{
    AnswerOutcome, GameConfig, GameSession, InspectOutcome, Progress, format_time,
};
use esc_save::HighScoreRecord;

/// Everything `escape play` was invoked with.
pub struct PlayOptions {
    pub rooms: PathBuf,
    pub save: PathBuf,
    pub scores: PathBuf,
    pub seed: Option<u64>,
    pub difficulty: Difficulty,
    pub name: Option<String>,
    pub resume: bool,
}

pub fn run(opts: PlayOptions) -> Result<(), String> {
    let level = super::load_level(&opts.rooms)?;

    let session = if opts.resume {
        let state = esc_save::load_game(&opts.save, &level).map_err(|e| e.to_string())?;
        let session = GameSession::resume(level, state).map_err(|e| e.to_string())?;
        println!(
            "  {} from room {}.",
            "Resuming".bold(),
            session.current_room() + 1
        );
        session
    } else {
        let mut config = GameConfig::default().with_difficulty(opts.difficulty);
        if let Some(seed) = opts.seed {
            config = config.with_seed(seed);
        }
        println!("  {} on {}.", "Starting a new game".bold(), opts.difficulty);
        GameSession::new_game(level, &config)
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut game = Game {
        session,
        input: stdin.lock(),
        out: stdout.lock(),
        save: opts.save,
        scores: opts.scores,
        name: opts.name,
    };
    game.play().map_err(|e| e.to_string())
}

/// A game being played over a line-based terminal.
struct Game<R, W> {
    session: GameSession,
    input: R,
    out: W,
    save: PathBuf,
    scores: PathBuf,
    name: Option<String>,
}

impl<R: BufRead, W: Write> Game<R, W> {
    /// Print a prompt and read one trimmed line. `None` at end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn yes(&mut self, prompt: &str) -> io::Result<bool> {
        let answer = self.ask(prompt)?.unwrap_or_default();
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }

    fn play(&mut self) -> io::Result<()> {
        loop {
            if self.pass_completed_rooms()? {
                return self.finish();
            }

            self.show_room()?;
            let Some(cmd) = self.ask("> ")? else {
                writeln!(self.out, "Goodbye!")?;
                return Ok(());
            };

            match cmd.to_lowercase().as_str() {
                "" => {}
                "i" | "inventory" => self.inventory()?,
                "s" | "save" => self.save()?,
                "q" | "quit" => {
                    writeln!(self.out, "Goodbye! Unsaved progress is lost.")?;
                    return Ok(());
                }
                other => match other.parse::<usize>() {
                    Ok(n) if (1..=self.object_count()).contains(&n) => self.inspect(n - 1)?,
                    Ok(_) => writeln!(self.out, "{}", "Invalid object number.".yellow())?,
                    Err(_) => writeln!(self.out, "{}", "Invalid command.".yellow())?,
                },
            }
        }
    }

    /// Move on through every completed room. Returns true once the last
    /// room is behind the player.
    fn pass_completed_rooms(&mut self) -> io::Result<bool> {
        while !self.session.is_escaped() {
            match self.session.advance() {
                Ok(Progress::StillOpen(_)) => return Ok(false),
                Ok(Progress::Advanced(_)) => {
                    writeln!(
                        self.out,
                        "\n{}\nMoving to the next room...",
                        "All objects in this room are solved! Door unlocked!".green()
                    )?;
                }
                Ok(Progress::Escaped) => {
                    writeln!(
                        self.out,
                        "\n{}",
                        "Final room completed! You've escaped!".green().bold()
                    )?;
                    return Ok(true);
                }
                Err(e) => {
                    writeln!(self.out, "{}", e.to_string().yellow())?;
                    return Ok(true);
                }
            }
        }
        Ok(true)
    }

    fn object_count(&self) -> usize {
        self.session.room().map(|r| r.object_count).unwrap_or(0)
    }

    fn show_room(&mut self) -> io::Result<()> {
        let Ok(room) = self.session.room() else {
            return Ok(());
        };
        let index = self.session.current_room();
        let total = self.session.level().room_count();
        let elapsed = format_time(self.session.elapsed_secs());

        writeln!(
            self.out,
            "\n{} {}    {}",
            format!("Room {}/{}:", index + 1, total).dimmed(),
            room.name.bold(),
            format!("Time: {elapsed}").dimmed()
        )?;
        if !room.description.trim().is_empty() {
            writeln!(self.out, "{}", room.description)?;
        }

        writeln!(self.out, "\nObjects:")?;
        let objects = self.session.level().objects_in(index).unwrap_or_default();
        for (n, object) in objects.iter().enumerate() {
            let solved = self.session.is_solved(index, n).unwrap_or(false);
            if solved {
                writeln!(self.out, "  {}. {} {}", n + 1, object.name, "(solved)".dimmed())?;
            } else {
                writeln!(self.out, "  {}. {}", n + 1, object.name)?;
            }
        }
        writeln!(self.out, "  I. Inventory\n  S. Save game\n  Q. Quit")
    }

    fn inspect(&mut self, local: usize) -> io::Result<()> {
        let room = self.session.current_room();
        let (name, description) = match self.session.level().object(room, local) {
            Ok(object) => (object.name.clone(), object.description.clone()),
            Err(e) => return writeln!(self.out, "{}", e.to_string().yellow()),
        };
        let outcome = match self.session.inspect(room, local) {
            Ok(outcome) => outcome,
            Err(e) => return writeln!(self.out, "{}", e.to_string().yellow()),
        };

        writeln!(self.out, "\nInspecting: {}\n{}\n", name.bold(), description)?;
        match outcome {
            InspectOutcome::AlreadySolved => writeln!(self.out, "(Already solved)"),
            InspectOutcome::NoPuzzle { item } => {
                writeln!(self.out, "No puzzle here.")?;
                if let Some(item) = item {
                    writeln!(self.out, "You picked up: {}", item.cyan())?;
                }
                Ok(())
            }
            InspectOutcome::Puzzle { kind, prompt } => {
                if prompt.is_empty() {
                    writeln!(self.out, "(No prompt available)")?;
                } else {
                    writeln!(self.out, "{prompt}")?;
                }
                if kind == PuzzleKind::Numeric {
                    writeln!(self.out, "{}", "(The answer is a number.)".dimmed())?;
                }
                self.puzzle_menu(room, local)
            }
        }
    }

    fn puzzle_menu(&mut self, room: usize, local: usize) -> io::Result<()> {
        loop {
            let Some(choice) = self.ask("[s]olve, [h]int (costs points), [b]ack: ")? else {
                return Ok(());
            };
            match choice.to_lowercase().as_str() {
                "s" | "solve" => return self.answer(room, local),
                "h" | "hint" => match self.session.request_hint(room, local) {
                    Ok(hint) => writeln!(self.out, "{} {hint}", "HINT:".magenta())?,
                    Err(e) => return writeln!(self.out, "{}", e.to_string().yellow()),
                },
                "b" | "back" | "" => return Ok(()),
                _ => writeln!(self.out, "Choose s, h or b.")?,
            }
        }
    }

    fn answer(&mut self, room: usize, local: usize) -> io::Result<()> {
        let input = self.ask("Your answer: ")?.unwrap_or_default();
        match self.session.submit_answer(room, local, &input) {
            Ok(AnswerOutcome::Correct { item }) => {
                writeln!(self.out, "{}", "Correct! Puzzle solved.".green())?;
                if let Some(item) = item {
                    writeln!(self.out, "You received: {}", item.cyan())?;
                }
                Ok(())
            }
            Ok(AnswerOutcome::Incorrect) => {
                writeln!(self.out, "{}", "Incorrect answer. Try again later.".red())
            }
            Ok(AnswerOutcome::Blank) => writeln!(self.out, "No answer entered."),
            Err(e) => writeln!(self.out, "{}", e.to_string().yellow()),
        }
    }

    fn inventory(&mut self) -> io::Result<()> {
        let items = self.session.inventory().items().to_vec();
        if items.is_empty() {
            return writeln!(self.out, "Your inventory is empty.");
        }

        writeln!(self.out, "\nInventory:")?;
        for (n, item) in items.iter().enumerate() {
            writeln!(self.out, "  {}. {}", n + 1, item)?;
        }

        let choice = self
            .ask("Use an item? Enter its number, or press Enter to go back: ")?
            .unwrap_or_default();
        let Some(item) = pick(&choice, items.len()) else {
            return Ok(());
        };

        let count = self.object_count();
        if count == 0 {
            return writeln!(self.out, "No objects in this room to use it on.");
        }
        let prompt = format!("Use it on which object (1-{count})? ");
        let target = self.ask(&prompt)?.unwrap_or_default();
        let Some(target) = pick(&target, count) else {
            return writeln!(self.out, "{}", "Invalid object number.".yellow());
        };

        let room = self.session.current_room();
        match self.session.use_item(item, room, target) {
            Ok(true) => {
                let object = self
                    .session
                    .level()
                    .object(room, target)
                    .map(|o| o.name.clone())
                    .unwrap_or_default();
                writeln!(
                    self.out,
                    "{}",
                    format!("The {} fits and unlocks the {object}!", items[item]).green()
                )?;
                if self.yes("Consume item after use? (y/n): ")? {
                    let consumed = self.session.consume_item(item);
                    if let Err(e) = consumed {
                        writeln!(self.out, "{}", e.to_string().yellow())?;
                    }
                }
                Ok(())
            }
            Ok(false) => writeln!(self.out, "Using the item had no noticeable effect."),
            Err(e) => writeln!(self.out, "{}", e.to_string().yellow()),
        }
    }

    fn save(&mut self) -> io::Result<()> {
        match esc_save::save_game(&self.save, &self.session.snapshot()) {
            Ok(()) => writeln!(
                self.out,
                "{}",
                format!("Progress saved to {}.", self.save.display()).green()
            ),
            Err(e) => writeln!(self.out, "{}", format!("Could not save: {e}").red()),
        }
    }

    fn finish(&mut self) -> io::Result<()> {
        let summary = self.session.summary();

        writeln!(self.out, "\n{}", "You escaped all rooms!".green().bold())?;
        writeln!(
            self.out,
            "Time: {} ({} seconds)",
            format_time(summary.elapsed_secs),
            summary.elapsed_secs
        )?;
        writeln!(
            self.out,
            "Moves: {}   Hints used: {}",
            summary.total_moves, summary.hints_used
        )?;
        writeln!(self.out, "Final score: {}/100", summary.score)?;

        writeln!(self.out, "\n{}", "GAME SUMMARY".bold())?;
        writeln!(self.out, "Rooms explored  : {}", summary.rooms_explored)?;
        writeln!(self.out, "Items collected : {}", summary.items_line())?;
        writeln!(self.out, "Difficulty      : {}", summary.difficulty)?;
        writeln!(self.out, "Achievements    : {}", summary.achievements_line())?;

        let name = match self.name.clone() {
            Some(name) => name,
            None => self
                .ask("Enter your name for high score (max 31 chars): ")?
                .unwrap_or_default(),
        };
        let record = HighScoreRecord::new(
            &name,
            summary.difficulty,
            summary.elapsed_secs,
            summary.score,
            summary.hints_used,
        );
        match esc_save::append_high_score(&self.scores, &record) {
            Ok(()) => writeln!(self.out, "High score recorded for {}.", record.name),
            Err(e) => writeln!(self.out, "{}", format!("Could not record high score: {e}").red()),
        }
    }
}

/// Parse a 1-based menu choice into a 0-based index below `count`.
fn pick(input: &str, count: usize) -> Option<usize> {
    match input.trim().parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Some(n - 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    const VAULT: &str = "1\nROOM\nVault\nA dark vault.\nOBJECTS 1\nOBJECT\nSafe\nA locked safe.\n1\nEnter code\n42\n1\nGoldBar\n";

    const CELLAR: &str = "2\n\
        ROOM\nCellar\nDamp.\nOBJECTS 2\n\
        OBJECT\nHook\nA rusty hook.\n0\nNOPROMPT\nNOANSWER\n1\nIron Key\n\
        OBJECT\nTrapdoor\nBolted shut.\n0\nNOPROMPT\nNOANSWER\n0\nNOITEM\n\
        ROOM\nAttic\nDusty.\nOBJECTS 0\n";

    fn game(source: &str, script: &str, dir: &TempDir) -> Game<Cursor<Vec<u8>>, Vec<u8>> {
        colored::control::set_override(false);
        let level = esc_dsl::parse(source).unwrap();
        let session = GameSession::new_game(level, &GameConfig::default().with_seed(3));
        Game {
            session,
            input: Cursor::new(script.as_bytes().to_vec()),
            out: Vec::new(),
            save: dir.path().join("savegame.dat"),
            scores: dir.path().join("highscores.dat"),
            name: Some("Tess".to_string()),
        }
    }

    fn output(game: &Game<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(game.out.clone()).unwrap()
    }

    #[test]
    fn solving_the_vault_escapes_and_records_a_score() {
        let dir = TempDir::new().unwrap();
        let mut g = game(VAULT, "1\nh\ns\n42\n", &dir);
        g.play().unwrap();

        let out = output(&g);
        assert!(out.contains("Enter code"));
        assert!(out.contains("HINT: The number is between 21 and 47."));
        assert!(out.contains("You received: GoldBar"));
        assert!(out.contains("You've escaped!"));
        assert!(out.contains("Items collected : GoldBar"));
        assert!(out.contains("High score recorded for Tess."));

        let scores = esc_save::read_high_scores(&dir.path().join("highscores.dat")).unwrap();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].name, "Tess");
        assert_eq!(scores[0].hints_used, 1);
    }

    #[test]
    fn wrong_answers_keep_the_player_in_the_room() {
        let dir = TempDir::new().unwrap();
        let mut g = game(VAULT, "1\ns\n7\n1\ns\n\nq\n", &dir);
        g.play().unwrap();

        let out = output(&g);
        assert!(out.contains("Incorrect answer."));
        assert!(out.contains("No answer entered."));
        assert!(!out.contains("escaped"));
        assert_eq!(g.session.state().total_moves, 2);
    }

    #[test]
    fn keys_unlock_doors_from_the_inventory() {
        let dir = TempDir::new().unwrap();
        let mut g = game(CELLAR, "1\n2\ni\n1\n2\ny\n", &dir);
        g.play().unwrap();

        let out = output(&g);
        assert!(out.contains("You picked up: Iron Key"));
        assert!(out.contains("The Iron Key fits and unlocks the Trapdoor!"));
        // The attic holds nothing, so it is passed straight away.
        assert!(out.contains("You've escaped!"));
        assert!(g.session.inventory().is_empty());
    }

    #[test]
    fn saving_writes_the_save_file() {
        let dir = TempDir::new().unwrap();
        let mut g = game(CELLAR, "1\nsave\nq\n", &dir);
        g.play().unwrap();

        assert!(output(&g).contains("Progress saved"));
        let level = g.session.level().clone();
        let state = esc_save::load_game(&dir.path().join("savegame.dat"), &level).unwrap();
        assert_eq!(state.inventory.items(), ["Iron Key"]);
        assert_eq!(state.total_moves, 1);
    }

    #[test]
    fn bad_commands_are_reported() {
        let dir = TempDir::new().unwrap();
        let mut g = game(VAULT, "look\n9\n", &dir);
        g.play().unwrap();

        let out = output(&g);
        assert!(out.contains("Invalid command."));
        assert!(out.contains("Invalid object number."));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn menu_choices_are_one_based() {
        assert_eq!(pick("1", 3), Some(0));
        assert_eq!(pick(" 3 ", 3), Some(2));
        assert_eq!(pick("0", 3), None);
        assert_eq!(pick("4", 3), None);
        assert_eq!(pick("x", 3), None);
    }
}
