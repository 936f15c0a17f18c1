//! Command-line host for the review scheduler.
//!
//! Owns the session: loads configuration, opens the SQLite review store,
//! and runs one subcommand against it.

pub mod commands;
pub mod config;
pub mod db;
pub mod deck;

use std::io;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Cli, Config};
use crate::db::SqliteRepository;

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_cli(&cli);

    // Ensure data directory exists
    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    tracing::debug!(path = %config.db_path.display(), "opening review database");
    let mut repo = SqliteRepository::open(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::execute(cli.command, &mut repo, &config.settings, Utc::now(), &mut out)
}
