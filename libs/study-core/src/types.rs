//! Core types for the review scheduler.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;

/// Learner self-assessment after seeing a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Performance {
    Easy,
    Medium,
    Hard,
}

impl Performance {
    /// SM-2 quality score (0-5 scale) for this grade.
    pub fn quality(self) -> u8 {
        match self {
            Self::Easy => 5,
            Self::Medium => 3,
            Self::Hard => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Performance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Performance {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(SchedulerError::InvalidPerformance(s.to_string())),
        }
    }
}

/// Review state for a single flashcard.
///
/// Serializes with the camelCase field names the study app keeps in its
/// local storage, so snapshots can be exchanged with it directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub card_id: String,
    pub ease_factor: f64,
    /// Days until the next review. Always at least 1.
    pub interval: u32,
    /// Consecutive passing reviews since the last lapse.
    pub repetition: u32,
    pub next_review: DateTime<Utc>,
}

impl ReviewRecord {
    /// Whether the card should be shown at `as_of`.
    pub fn is_due(&self, as_of: DateTime<Utc>) -> bool {
        self.next_review <= as_of
    }

    pub fn is_mature(&self, mature_interval_days: u32) -> bool {
        self.interval >= mature_interval_days
    }
}

/// Aggregate counts over a deck.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyStatistics {
    pub total: usize,
    pub due_today: usize,
    pub new_cards: usize,
    pub mature: usize,
    pub reviews: usize,
    pub streak_days: usize,
}

/// Scheduler-level settings that are not part of the update rule itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerSettings {
    /// Interval (days) at which a card counts as mature.
    pub mature_interval_days: u32,
    /// Hour of day (0-23, UTC) at which a new study day begins.
    pub daily_reset_hour: u32,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            mature_interval_days: 21,
            daily_reset_hour: 0,
        }
    }
}
