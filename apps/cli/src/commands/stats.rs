//! Due-set and statistics commands.

use std::io::Write;

use chrono::{DateTime, Utc};
use study_core::{ReviewStore, Scheduler, SchedulerSettings};

use crate::config::DeckArgs;
use crate::db::SqliteRepository;
use crate::deck;

pub fn due(
    repo: &mut SqliteRepository,
    settings: &SchedulerSettings,
    args: &DeckArgs,
    now: DateTime<Utc>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let card_ids = resolve_card_ids(repo, args)?;
    let scheduler = Scheduler::new(repo).with_settings(settings.clone());
    for card_id in scheduler.due_cards(card_ids, now)? {
        writeln!(out, "{card_id}")?;
    }
    Ok(())
}

pub fn stats(
    repo: &mut SqliteRepository,
    settings: &SchedulerSettings,
    args: &DeckArgs,
    now: DateTime<Utc>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let card_ids = resolve_card_ids(repo, args)?;
    let scheduler = Scheduler::new(repo).with_settings(settings.clone());
    let stats = scheduler.statistics(card_ids, now)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
    Ok(())
}

/// Deck file ids first, then positional ids. Falls back to every reviewed card.
fn resolve_card_ids(repo: &SqliteRepository, args: &DeckArgs) -> anyhow::Result<Vec<String>> {
    let mut card_ids = match &args.deck {
        Some(path) => deck::load_card_ids(path)?,
        None => Vec::new(),
    };
    card_ids.extend(args.cards.iter().cloned());

    if card_ids.is_empty() && args.deck.is_none() {
        card_ids = repo.keys()?;
    }
    Ok(card_ids)
}
