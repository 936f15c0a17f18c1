//! Review scheduler.
//!
//! Owns the grading flow over a borrowed or owned [`ReviewStore`]: look up
//! the card's record (or synthesize one for a new card), run the
//! algorithm, and write the result back. Queries never mutate the store.

use chrono::{DateTime, Utc};

use crate::algorithm::sm2::Sm2;
use crate::algorithm::SpacedRepetitionAlgorithm;
use crate::calendar;
use crate::error::{Result, SchedulerError};
use crate::store::ReviewStore;
use crate::types::{Performance, ReviewRecord, SchedulerSettings, StudyStatistics};

pub struct Scheduler<S> {
    store: S,
    algorithm: Box<dyn SpacedRepetitionAlgorithm>,
    settings: SchedulerSettings,
}

impl<S: ReviewStore> Scheduler<S> {
    /// Scheduler using SM-2 with default parameters.
    pub fn new(store: S) -> Self {
        Self::with_algorithm(store, Box::new(Sm2::default()))
    }

    pub fn with_algorithm(store: S, algorithm: Box<dyn SpacedRepetitionAlgorithm>) -> Self {
        Self {
            store,
            algorithm,
            settings: SchedulerSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: SchedulerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current record for a card, if it has ever been reviewed.
    pub fn record(&self, card_id: &str) -> Result<Option<ReviewRecord>> {
        let record = self.store.get(card_id).map_err(SchedulerError::store)?;
        Ok(record.map(|mut record| {
            record.card_id = card_id.to_string();
            self.repaired(record)
        }))
    }

    /// Apply one review to a card and return its next review time.
    ///
    /// Each call is a separate review event; grading the same card twice
    /// advances it twice.
    pub fn grade_card(&mut self, card_id: &str, performance: Performance, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let current = match self.record(card_id)? {
            Some(record) => record,
            None => self.algorithm.initial_record(card_id, now),
        };

        let updated = self.algorithm.schedule(&current, performance, now);
        let next_review = updated.next_review;

        tracing::debug!(
            card_id,
            algorithm = self.algorithm.name(),
            %performance,
            ease_factor = updated.ease_factor,
            interval = updated.interval,
            repetition = updated.repetition,
            "graded card"
        );

        self.store
            .put(card_id, updated)
            .map_err(SchedulerError::store)?;

        Ok(next_review)
    }

    /// Cards to show at `as_of`, in input order.
    ///
    /// A card with no record is always due.
    pub fn due_cards<I, T>(&self, card_ids: I, as_of: DateTime<Utc>) -> Result<Vec<T>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut due = Vec::new();
        for card_id in card_ids {
            let is_due = match self.record(card_id.as_ref())? {
                Some(record) => record.is_due(as_of),
                None => true,
            };
            if is_due {
                due.push(card_id);
            }
        }
        Ok(due)
    }

    /// Aggregate counts for a deck at `now`.
    ///
    /// `reviews` and `streak_days` cover the whole store, not just the deck.
    /// Deck cards are looked up by store key, as in [`Scheduler::due_cards`].
    pub fn statistics<I, T>(&self, card_ids: I, now: DateTime<Utc>) -> Result<StudyStatistics>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let records = self.store.records().map_err(SchedulerError::store)?;

        let mut stats = StudyStatistics {
            reviews: records.len(),
            streak_days: calendar::streak_days(
                records.iter().map(|r| r.next_review),
                now,
                self.settings.daily_reset_hour,
            ),
            ..Default::default()
        };

        for card_id in card_ids {
            stats.total += 1;
            match self.record(card_id.as_ref())? {
                None => {
                    stats.new_cards += 1;
                    stats.due_today += 1;
                }
                Some(record) => {
                    if record.is_due(now) {
                        stats.due_today += 1;
                    }
                    if record.is_mature(self.settings.mature_interval_days) {
                        stats.mature += 1;
                    }
                }
            }
        }

        Ok(stats)
    }

    fn repaired(&self, mut record: ReviewRecord) -> ReviewRecord {
        let before = (record.ease_factor, record.interval);
        if self.algorithm.repair(&mut record) {
            tracing::warn!(
                card_id = %record.card_id,
                ease_factor = before.0,
                interval = before.1,
                "repaired out-of-range review record"
            );
        }
        record
    }
}
