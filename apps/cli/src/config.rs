//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use study_core::{Performance, SchedulerSettings};

#[derive(Debug, Parser)]
#[command(name = "study-sync", version, about = "Spaced repetition scheduler for flashcard decks")]
pub struct Cli {
    /// SQLite database holding review records.
    #[arg(long, env = "STUDY_SYNC_DB", global = true)]
    pub db: Option<PathBuf>,

    /// Hour of day (UTC) at which a new study day begins.
    #[arg(
        long,
        env = "STUDY_SYNC_RESET_HOUR",
        default_value_t = 0,
        value_parser = clap::value_parser!(u32).range(0..24),
        global = true
    )]
    pub reset_hour: u32,

    /// Interval in days at which a card counts as mature.
    #[arg(long, env = "STUDY_SYNC_MATURE_DAYS", default_value_t = 21, global = true)]
    pub mature_days: u32,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a review and print the next review time.
    Grade {
        card: String,
        /// easy, medium or hard
        performance: Performance,
    },
    /// List cards that are due now.
    Due(DeckArgs),
    /// Print deck statistics as JSON.
    Stats(DeckArgs),
    /// Print a card's review record as JSON.
    Show { card: String },
    /// Merge a JSON snapshot into the database.
    Import { file: PathBuf },
    /// Write all records as a JSON snapshot (stdout if no file is given).
    Export { file: Option<PathBuf> },
    /// Delete a card's review record.
    Forget { card: String },
}

/// Which cards a query runs over.
#[derive(Debug, Clone, Default, Args)]
pub struct DeckArgs {
    /// JSON file with an array of flashcards, each having an `id`.
    #[arg(long)]
    pub deck: Option<PathBuf>,

    /// Card ids. With neither ids nor --deck, every card with a record is used.
    pub cards: Vec<String>,
}

/// Resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub settings: SchedulerSettings,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            db_path: cli.db.clone().unwrap_or_else(default_db_path),
            settings: SchedulerSettings {
                mature_interval_days: cli.mature_days,
                daily_reset_hour: cli.reset_hour,
            },
        }
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("study-sync")
        .join("reviews.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_grade() {
        let cli = Cli::try_parse_from(["study-sync", "grade", "card-1", "easy"]).unwrap();
        match cli.command {
            Command::Grade { card, performance } => {
                assert_eq!(card, "card-1");
                assert_eq!(performance, Performance::Easy);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_grade() {
        assert!(Cli::try_parse_from(["study-sync", "grade", "card-1", "perfect"]).is_err());
    }

    #[test]
    fn rejects_out_of_range_reset_hour() {
        assert!(Cli::try_parse_from(["study-sync", "--reset-hour", "24", "due"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "study-sync", "stats", "a", "b", "--db", "/tmp/x.db", "--mature-days", "30",
        ])
        .unwrap();
        let config = Config::from_cli(&cli);
        assert_eq!(config.db_path, PathBuf::from("/tmp/x.db"));
        assert_eq!(config.settings.mature_interval_days, 30);
        match cli.command {
            Command::Stats(args) => assert_eq!(args.cards, vec!["a", "b"]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn default_db_path_is_under_app_dir() {
        let path = default_db_path();
        assert!(path.ends_with("study-sync/reviews.db"));
    }
}
