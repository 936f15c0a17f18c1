//! Card id sources for due and stats queries.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// A flashcard as exported by the study app. Only the id matters here.
#[derive(Debug, Deserialize)]
struct DeckEntry {
    id: String,
}

/// Read card ids, in file order, from a JSON array of flashcards.
pub fn load_card_ids(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read deck file {}", path.display()))?;
    parse_card_ids(&content).with_context(|| format!("invalid deck file {}", path.display()))
}

pub fn parse_card_ids(json: &str) -> anyhow::Result<Vec<String>> {
    let entries: Vec<DeckEntry> = serde_json::from_str(json)?;
    Ok(entries.into_iter().map(|entry| entry.id).collect())
}
