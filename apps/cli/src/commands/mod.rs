//! Subcommand handlers.

pub mod stats;
pub mod study;
pub mod transfer;

use std::io::Write;

use chrono::{DateTime, Utc};
use study_core::SchedulerSettings;

use crate::config::Command;
use crate::db::SqliteRepository;

/// Run one subcommand against an open repository, writing results to `out`.
pub fn execute(
    command: Command,
    repo: &mut SqliteRepository,
    settings: &SchedulerSettings,
    now: DateTime<Utc>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match command {
        Command::Grade { card, performance } => study::grade(repo, settings, &card, performance, now, out),
        Command::Show { card } => study::show(repo, &card, out),
        Command::Forget { card } => study::forget(repo, &card, out),
        Command::Due(args) => stats::due(repo, settings, &args, now, out),
        Command::Stats(args) => stats::stats(repo, settings, &args, now, out),
        Command::Import { file } => transfer::import(repo, &file, out),
        Command::Export { file } => transfer::export(repo, file.as_deref(), out),
    }
}
