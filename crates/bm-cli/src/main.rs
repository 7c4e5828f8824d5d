//! Terminal frontend for Blockmath, a block-mining division quiz.

mod commands;
mod store;
mod terminal;

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "blockmath",
    about = "Blockmath: mine loot by solving division questions",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a ten-question session in the terminal
    Play {
        /// Character to play as (steve, alex, creeper, skeleton, cat)
        #[arg(short, long)]
        character: String,

        /// Topic key (see `blockmath topics`)
        #[arg(short, long, default_value = "basic")]
        topic: String,

        /// RNG seed for reproducible questions and loot
        #[arg(short, long)]
        seed: Option<u64>,

        /// Pause after a correct answer, in milliseconds
        #[arg(long, default_value = "2000")]
        delay_ms: u64,

        /// Directory holding saved progress
        #[arg(short, long, default_value = ".blockmath")]
        data_dir: PathBuf,
    },

    /// Show character levels, experience, and items
    Stats {
        /// Only show this character
        character: Option<String>,

        /// Directory holding saved progress
        #[arg(short, long, default_value = ".blockmath")]
        data_dir: PathBuf,
    },

    /// List the available topics
    Topics,

    /// Show a character's past sessions, most recent first
    History {
        /// Character whose history to show
        character: String,

        /// Expand per-question details for every entry
        #[arg(long)]
        details: bool,

        /// Directory holding saved progress
        #[arg(short, long, default_value = ".blockmath")]
        data_dir: PathBuf,
    },

    /// Show or hide the details of a history entry
    Toggle {
        /// Entry number as listed by `blockmath history`
        index: usize,

        /// Re-list this character's history afterwards
        #[arg(short, long)]
        character: Option<String>,

        /// Directory holding saved progress
        #[arg(short, long, default_value = ".blockmath")]
        data_dir: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            character,
            topic,
            seed,
            delay_ms,
            data_dir,
        } => commands::play::run(&data_dir, &character, &topic, seed, delay_ms),
        Commands::Stats {
            character,
            data_dir,
        } => commands::stats::run(&data_dir, character.as_deref()),
        Commands::Topics => commands::topics::run(),
        Commands::History {
            character,
            details,
            data_dir,
        } => commands::history::run(&data_dir, &character, details),
        Commands::Toggle {
            index,
            character,
            data_dir,
        } => commands::toggle::run(&data_dir, index, character.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
