//! Spaced repetition algorithm implementations.

pub mod sm2;

use crate::types::{Performance, ReviewRecord};
use chrono::{DateTime, Utc};

/// Trait for spaced repetition algorithms.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Calculate the next review record after a review at `now`.
    ///
    /// The returned record's `next_review` is the card's new due time.
    fn schedule(&self, record: &ReviewRecord, performance: Performance, now: DateTime<Utc>) -> ReviewRecord;

    /// Record used for a card that has never been reviewed.
    fn initial_record(&self, card_id: &str, now: DateTime<Utc>) -> ReviewRecord;

    /// Bring a record loaded from storage back inside the algorithm's bounds.
    ///
    /// Returns `true` if anything was changed.
    fn repair(&self, record: &mut ReviewRecord) -> bool;
}
