pub mod deck;

pub use deck::{DeckCard, DeckConfig, DeckInfo};

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "leitner")]
#[command(about = "Leitner-box flashcard review from a TOML deck")]
pub struct CliConfig {
    /// TOML deck file to load
    #[arg(long)]
    pub deck: PathBuf,

    /// Learner id (defaults to the deck's default_user, then "anonymous")
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Pin the clock to an RFC 3339 instant
    #[arg(long, global = true)]
    pub now: Option<String>,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the ids of cards due now
    Due,
    /// List cards, optionally filtered
    Cards {
        #[arg(long)]
        tag: Option<String>,
        #[arg(long)]
        category: Option<i64>,
    },
    /// Show one card
    Show { card_id: String },
    /// Cards carrying any of the given tags
    Tags {
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Today's quiz status
    Status,
    /// Run today's quiz interactively
    Quiz,
    /// Answer a single card
    Answer { card_id: String, answer: String },
    /// Validate a card without answering it
    Force { card_id: String },
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}
