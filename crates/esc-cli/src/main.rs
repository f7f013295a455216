//! CLI frontend for the escape room game.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use esc_core::Difficulty;

#[derive(Parser)]
#[command(
    name = "escape",
    about = "Escape room simulator: solve every puzzle to get out",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new directory with a sample rooms.txt
    Init {
        /// Name of the directory to create
        name: String,
    },

    /// Parse a level file and report diagnostics
    Check {
        /// Level definition file
        #[arg(short, long, default_value = "rooms.txt")]
        rooms: PathBuf,
    },

    /// List the rooms and objects of a level
    Show {
        /// Level definition file
        #[arg(short, long, default_value = "rooms.txt")]
        rooms: PathBuf,

        /// Dump the parsed level as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play a level
    Play {
        /// Level definition file
        #[arg(short, long, default_value = "rooms.txt")]
        rooms: PathBuf,

        /// Save file
        #[arg(long, default_value = "savegame.dat")]
        save: PathBuf,

        /// High-score ledger
        #[arg(long, default_value = "highscores.dat")]
        scores: PathBuf,

        /// RNG seed for the puzzle shuffle
        #[arg(long)]
        seed: Option<u64>,

        /// Difficulty: easy, medium or hard
        #[arg(short, long, default_value = "medium")]
        difficulty: Difficulty,

        /// Player name for the high-score ledger (asked for if omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Continue from the save file instead of starting over
        #[arg(long)]
        resume: bool,
    },

    /// Show the high-score table
    Scores {
        /// High-score ledger
        #[arg(long, default_value = "highscores.dat")]
        scores: PathBuf,

        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { name } => commands::init::run(&name),
        Commands::Check { rooms } => commands::check::run(&rooms),
        Commands::Show { rooms, json } => commands::show::run(&rooms, json),
        Commands::Play {
            rooms,
            save,
            scores,
            seed,
            difficulty,
            name,
            resume,
        } => commands::play::run(commands::play::PlayOptions {
            rooms,
            save,
            scores,
            seed,
            difficulty,
            name,
            resume,
        }),
        Commands::Scores { scores, limit } => commands::scores::run(&scores, limit),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
